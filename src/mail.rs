//! The outgoing mail, as described by the caller

use std::path::PathBuf;

/// One outgoing email
///
/// `Mail` only stores what the caller wants to send. Recipients left empty fall back to
/// the [`Sender`](crate::Sender) defaults when the mail is sent.
///
/// ```rust
/// use simple_mail::Mail;
///
/// let mail = Mail::new("Weekly report", "Numbers are up.\nSee attachment.")
///     .recipient("boss@example.com")
///     .attachment("report.pdf");
///
/// assert_eq!(mail.recipients(), ["boss@example.com"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mail {
    subject: String,
    body: String,
    recipients: Vec<String>,
    attachments: Vec<PathBuf>,
}

impl Mail {
    /// Creates a mail with a subject and an HTML body
    pub fn new<S, B>(subject: S, body: B) -> Mail
    where
        S: Into<String>,
        B: Into<String>,
    {
        Mail {
            subject: subject.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    /// Adds a recipient
    pub fn recipient<R: Into<String>>(mut self, recipient: R) -> Self {
        self.recipients.push(recipient.into());
        self
    }

    /// Adds a file to attach
    pub fn attachment<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.attachments.push(path.into());
        self
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn set_subject<S: Into<String>>(&mut self, subject: S) {
        self.subject = subject.into();
    }

    /// The HTML body, line feeds not yet converted
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body<B: Into<String>>(&mut self, body: B) {
        self.body = body.into();
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// Replaces the recipients. An empty list lets the sender pick them.
    pub fn set_recipients<I>(&mut self, recipients: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.recipients = recipients.into_iter().map(Into::into).collect();
    }

    pub fn attachments(&self) -> &[PathBuf] {
        &self.attachments
    }

    pub fn set_attachments<I>(&mut self, attachments: I)
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        self.attachments = attachments.into_iter().map(Into::into).collect();
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::Mail;

    #[test]
    fn defaults_are_empty() {
        let mail = Mail::default();
        assert_eq!(mail.subject(), "");
        assert_eq!(mail.body(), "");
        assert!(mail.recipients().is_empty());
        assert!(mail.attachments().is_empty());
    }

    #[test]
    fn setters_replace() {
        let mut mail = Mail::new("a", "b").recipient("x@example.com");
        mail.set_subject("subject");
        mail.set_body("body");
        mail.set_recipients(["y@example.com", "z@example.com"]);
        mail.set_attachments(vec![PathBuf::from("/tmp/a.txt")]);

        assert_eq!(mail.subject(), "subject");
        assert_eq!(mail.body(), "body");
        assert_eq!(mail.recipients(), ["y@example.com", "z@example.com"]);
        assert_eq!(mail.attachments(), [PathBuf::from("/tmp/a.txt")]);
    }
}
