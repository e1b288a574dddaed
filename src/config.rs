//! Sender configuration

use std::fmt::{self, Debug, Formatter};

use lettre::transport::smtp::{SMTP_PORT, SUBMISSIONS_PORT, SUBMISSION_PORT};

use crate::{address, authenticator::Authenticator, error::Error};

/// How the connection to the relay is secured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Security {
    /// Plain text connection
    None,
    /// Upgrade with STARTTLS when the server offers it
    #[default]
    Opportunistic,
    /// Require STARTTLS
    StartTls,
    /// Connect over TLS from the start
    Wrapper,
}

impl Security {
    /// The port used when none is configured
    pub fn default_port(self) -> u16 {
        match self {
            Security::None | Security::Opportunistic => SMTP_PORT,
            Security::StartTls => SUBMISSION_PORT,
            Security::Wrapper => SUBMISSIONS_PORT,
        }
    }
}

/// Everything a [`Sender`](crate::Sender) needs to reach and authenticate with its relay
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SenderConfig {
    /// SMTP relay host
    pub host: String,
    /// Address mails are sent from, also used to authenticate
    pub sender_address: String,
    /// Password of the sender address
    pub secret: String,
    /// Recipients of mails that do not name their own
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_recipients: Vec<String>,
    /// Relay port, derived from `security` when absent
    #[cfg_attr(feature = "serde", serde(default))]
    pub port: Option<u16>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub security: Security,
    /// Authenticate with the sender address and secret
    #[cfg_attr(feature = "serde", serde(default = "default_authentication"))]
    pub authentication: bool,
}

#[cfg(feature = "serde")]
fn default_authentication() -> bool {
    true
}

impl SenderConfig {
    /// Creates a configuration for an explicit relay host
    ///
    /// The sender address is not validated.
    pub fn new<H, A, S>(host: H, sender_address: A, secret: S) -> SenderConfig
    where
        H: Into<String>,
        A: Into<String>,
        S: Into<String>,
    {
        SenderConfig {
            host: host.into(),
            sender_address: sender_address.into(),
            secret: secret.into(),
            default_recipients: Vec::new(),
            port: None,
            security: Security::default(),
            authentication: true,
        }
    }

    /// Creates a configuration whose relay host is `smtp.` followed by the sender domain
    ///
    /// ```rust
    /// use simple_mail::SenderConfig;
    ///
    /// let config = SenderConfig::infer("user@sub.example.com", "secret").unwrap();
    /// assert_eq!(config.host, "smtp.sub.example.com");
    ///
    /// assert!(SenderConfig::infer("not-an-address", "secret").is_err());
    /// ```
    pub fn infer<A, S>(sender_address: A, secret: S) -> Result<SenderConfig, Error>
    where
        A: Into<String>,
        S: Into<String>,
    {
        let sender_address = sender_address.into();
        let host = address::infer_host(&sender_address)?;
        Ok(SenderConfig::new(host, sender_address, secret))
    }

    /// Set the default recipients
    pub fn default_recipients<I>(mut self, recipients: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.default_recipients = recipients.into_iter().map(Into::into).collect();
        self
    }

    /// Set the port to use
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the connection security
    pub fn security(mut self, security: Security) -> Self {
        self.security = security;
        self
    }

    /// Enable or disable authentication
    pub fn authentication(mut self, authentication: bool) -> Self {
        self.authentication = authentication;
        self
    }

    pub(crate) fn authenticator(&self) -> Authenticator {
        Authenticator::new(self.sender_address.clone(), self.secret.clone())
    }

    /// The port the transport connects to
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.security.default_port())
    }
}

impl Debug for SenderConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderConfig")
            .field("host", &self.host)
            .field("sender_address", &self.sender_address)
            .field("default_recipients", &self.default_recipients)
            .field("port", &self.port)
            .field("security", &self.security)
            .field("authentication", &self.authentication)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_has_documented_defaults() {
        let config = SenderConfig::new("mail.example.com", "bad sender", "pw");
        assert_eq!(config.host, "mail.example.com");
        assert_eq!(config.sender_address, "bad sender");
        assert!(config.default_recipients.is_empty());
        assert_eq!(config.port, None);
        assert_eq!(config.security, Security::Opportunistic);
        assert!(config.authentication);
        assert_eq!(config.effective_port(), 25);
    }

    #[test]
    fn port_follows_security() {
        let config = SenderConfig::new("h", "a", "s");
        assert_eq!(config.clone().security(Security::StartTls).effective_port(), 587);
        assert_eq!(config.clone().security(Security::Wrapper).effective_port(), 465);
        assert_eq!(
            config.security(Security::Wrapper).port(2525).effective_port(),
            2525
        );
    }

    #[test]
    fn infer_rejects_malformed_sender() {
        let err = SenderConfig::infer("user@localhost", "pw").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn debug_hides_secret() {
        let config = SenderConfig::new("h", "a@example.com", "hunter2");
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_with_defaults() {
        let config: SenderConfig = serde_json::from_str(
            r#"{"host":"smtp.example.com","sender_address":"a@example.com","secret":"pw"}"#,
        )
        .unwrap();
        assert_eq!(config, SenderConfig::new("smtp.example.com", "a@example.com", "pw"));

        let config: SenderConfig = serde_json::from_str(
            r#"{
                "host": "h",
                "sender_address": "a",
                "secret": "s",
                "security": "wrapper",
                "authentication": false,
                "default_recipients": ["b@example.com"]
            }"#,
        )
        .unwrap();
        assert_eq!(config.security, Security::Wrapper);
        assert!(!config.authentication);
        assert_eq!(config.default_recipients, ["b@example.com"]);
    }
}
