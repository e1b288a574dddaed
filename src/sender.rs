//! The sender owns the transport session and turns a [`Mail`] into a MIME message

use std::{
    error::Error as StdError,
    fmt::{self, Debug, Formatter},
    fs,
    path::Path,
};

use lettre::{
    message::{header::ContentType, Attachment, Message, MultiPart, SinglePart},
    transport::smtp::client::{Tls, TlsParameters},
    SmtpTransport, Transport,
};

use crate::{
    address,
    authenticator::Authenticator,
    config::{Security, SenderConfig},
    encoding,
    error::{self, Error},
    mail::Mail,
};

/// Configured transport and the credentials it was built with
struct Session<T> {
    host: String,
    authenticator: Authenticator,
    transport: T,
}

/// Sends [`Mail`]s through a configured relay
///
/// Recipients are picked in this order: the mail's own recipients, the sender's default
/// recipients, and finally the sender address itself.
///
/// ```rust,no_run
/// use simple_mail::{Mail, Sender};
///
/// # fn main() -> Result<(), simple_mail::Error> {
/// let sender = Sender::infer("user@example.com", "password")?;
/// sender.send(&Mail::new("Hello", "First line\nSecond line"))?;
/// # Ok(())
/// # }
/// ```
pub struct Sender<T = SmtpTransport> {
    session: Option<Session<T>>,
    default_recipients: Vec<String>,
}

impl Sender<SmtpTransport> {
    /// Creates a sender for an explicit relay host
    ///
    /// The sender address is not validated.
    pub fn new<H, A, S>(host: H, sender_address: A, secret: S) -> Result<Self, Error>
    where
        H: Into<String>,
        A: Into<String>,
        S: Into<String>,
    {
        Self::from_config(SenderConfig::new(host, sender_address, secret))
    }

    /// Creates a sender for an explicit relay host, with default recipients
    pub fn with_recipients<H, A, S, I>(
        host: H,
        sender_address: A,
        secret: S,
        recipients: I,
    ) -> Result<Self, Error>
    where
        H: Into<String>,
        A: Into<String>,
        S: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let config = SenderConfig::new(host, sender_address, secret).default_recipients(recipients);
        Self::from_config(config)
    }

    /// Creates a sender whose relay host is inferred from the sender address
    ///
    /// Fails with a configuration error, before any transport is built, when the
    /// address does not match the accepted sender format.
    pub fn infer<A, S>(sender_address: A, secret: S) -> Result<Self, Error>
    where
        A: Into<String>,
        S: Into<String>,
    {
        Self::from_config(SenderConfig::infer(sender_address, secret)?)
    }

    /// Creates a sender from a full configuration
    ///
    /// No connection is opened until a mail is sent.
    pub fn from_config(config: SenderConfig) -> Result<Self, Error> {
        let authenticator = config.authenticator();

        let parameters = || TlsParameters::new(config.host.clone()).map_err(error::configuration);
        let tls = match config.security {
            Security::None => Tls::None,
            Security::Opportunistic => Tls::Opportunistic(parameters()?),
            Security::StartTls => Tls::Required(parameters()?),
            Security::Wrapper => Tls::Wrapper(parameters()?),
        };

        let mut builder = SmtpTransport::builder_dangerous(config.host.as_str())
            .port(config.effective_port())
            .tls(tls);
        if config.authentication {
            builder = builder.credentials(authenticator.credentials());
        }

        tracing::debug!(
            host = %config.host,
            port = config.effective_port(),
            security = ?config.security,
            authentication = config.authentication,
            "configured smtp sender"
        );

        Ok(Self::configured(config, authenticator, builder.build()))
    }

    /// Tests the connection to the relay
    pub fn test_connection(&self) -> Result<bool, Error> {
        self.session()?
            .transport
            .test_connection()
            .map_err(error::transport)
    }
}

impl<T> Sender<T> {
    /// Creates a sender delivering through `transport`
    ///
    /// Only the addresses and default recipients of `config` are used, the transport
    /// is expected to be set up already.
    pub fn with_transport(config: SenderConfig, transport: T) -> Self {
        let authenticator = config.authenticator();
        Self::configured(config, authenticator, transport)
    }

    fn configured(config: SenderConfig, authenticator: Authenticator, transport: T) -> Self {
        Sender {
            session: Some(Session {
                host: config.host,
                authenticator,
                transport,
            }),
            default_recipients: config.default_recipients,
        }
    }

    fn session(&self) -> Result<&Session<T>, Error> {
        self.session
            .as_ref()
            .ok_or_else(|| error::configuration("sender is not configured"))
    }

    /// Returns true if the sender has a transport to send with
    pub fn is_configured(&self) -> bool {
        self.session.is_some()
    }

    /// The relay host
    pub fn host(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.host.as_str())
    }

    /// The address mails are sent from
    pub fn sender_address(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|session| session.authenticator.sender_address())
    }

    pub fn transport(&self) -> Option<&T> {
        self.session.as_ref().map(|session| &session.transport)
    }

    pub fn default_recipients(&self) -> &[String] {
        &self.default_recipients
    }

    /// Replaces the recipients used for mails that do not name their own
    pub fn set_default_recipients<I>(&mut self, recipients: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.default_recipients = recipients.into_iter().map(Into::into).collect();
    }

    /// Builds the MIME message for `mail` without sending it
    ///
    /// The message is a `multipart/mixed` with the HTML body first, line feeds turned
    /// into `<br/>`, followed by one part per attachment.
    pub fn build_message(&self, mail: &Mail) -> Result<Message, Error> {
        let sender_address = self.session()?.authenticator.sender_address();

        let to = address::resolve_recipients(
            mail.recipients(),
            &self.default_recipients,
            sender_address,
        )
        .into_iter()
        .map(address::parse_mailbox)
        .collect::<Result<Vec<_>, _>>()?;

        let mut builder = Message::builder()
            .from(address::parse_mailbox(sender_address)?)
            .subject(mail.subject());
        for mailbox in to {
            builder = builder.to(mailbox);
        }

        let mut multipart = MultiPart::mixed().singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_HTML)
                .body(encoding::html_line_breaks(mail.body())),
        );
        for path in mail.attachments() {
            multipart = multipart.singlepart(attachment(path)?);
        }

        builder.multipart(multipart).map_err(error::encoding)
    }
}

impl<T> Sender<T>
where
    T: Transport,
    T::Error: StdError + Send + Sync + 'static,
{
    /// Sends `mail`, blocking until the transport is done
    ///
    /// The whole message is built before anything reaches the transport, so an invalid
    /// recipient or an unreadable attachment sends nothing. Failures are logged before
    /// being returned.
    pub fn send(&self, mail: &Mail) -> Result<T::Ok, Error> {
        self.try_send(mail).map_err(|err| {
            tracing::error!(error = %err, subject = mail.subject(), "failed to send mail");
            err
        })
    }

    fn try_send(&self, mail: &Mail) -> Result<T::Ok, Error> {
        let session = self.session()?;
        let message = self.build_message(mail)?;

        let response = session.transport.send(&message).map_err(error::transport)?;

        tracing::debug!(
            recipients = message.envelope().to().len(),
            attachments = mail.attachments().len(),
            "mail sent"
        );
        Ok(response)
    }
}

impl<T> Default for Sender<T> {
    /// An unconfigured sender, sending fails until it is replaced by a configured one
    fn default() -> Self {
        Sender {
            session: None,
            default_recipients: Vec::new(),
        }
    }
}

impl<T> Debug for Sender<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender")
            .field("host", &self.host())
            .field("sender_address", &self.sender_address())
            .field("default_recipients", &self.default_recipients)
            .finish_non_exhaustive()
    }
}

fn attachment(path: &Path) -> Result<SinglePart, Error> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            error::encoding(format!(
                "attachment name is missing or not valid UTF-8: {}",
                path.display()
            ))
        })?;
    let content = fs::read(path).map_err(error::io)?;

    Ok(Attachment::new(encoding::encode_word(filename))
        .body(content, ContentType::from(mime::APPLICATION_OCTET_STREAM)))
}
