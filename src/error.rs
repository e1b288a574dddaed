//! Error and result type for sending mail

use std::{error::Error as StdError, fmt};

use crate::BoxError;

/// The Errors that may occur while configuring a [`Sender`](crate::Sender) or sending a mail
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: ErrorKind,
    source: Option<BoxError>,
}

/// The cause of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The sender is missing configuration, or the configuration was rejected
    Configuration,
    /// A sender or recipient address could not be parsed
    AddressSyntax,
    /// An attachment name or the MIME message could not be encoded
    Encoding,
    /// An attachment could not be read
    Io,
    /// The transport failed to deliver the message
    Transport,
}

impl Error {
    pub(crate) fn new<E>(kind: ErrorKind, source: Option<E>) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            inner: Box::new(Inner {
                kind,
                source: source.map(Into::into),
            }),
        }
    }

    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        self.inner.kind
    }

    /// Returns true if the error comes from the sender configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Configuration)
    }

    /// Returns true if an address could not be parsed
    pub fn is_address_syntax(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::AddressSyntax)
    }

    /// Returns true if the message could not be encoded
    pub fn is_encoding(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Encoding)
    }

    /// Returns true if an attachment could not be read
    pub fn is_io(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Io)
    }

    /// Returns true if the error comes from the transport
    pub fn is_transport(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Transport)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("simple_mail::Error");

        builder.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            builder.field("source", source);
        }

        builder.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.inner.kind {
            ErrorKind::Configuration => "configuration error",
            ErrorKind::AddressSyntax => "invalid address",
            ErrorKind::Encoding => "encoding error",
            ErrorKind::Io => "attachment i/o error",
            ErrorKind::Transport => "transport error",
        })?;

        if let Some(ref e) = self.inner.source {
            write!(f, ": {e}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| {
            let r: &(dyn StdError + 'static) = &**e;
            r
        })
    }
}

pub(crate) fn configuration<E: Into<BoxError>>(e: E) -> Error {
    Error::new(ErrorKind::Configuration, Some(e))
}

pub(crate) fn address<E: Into<BoxError>>(e: E) -> Error {
    Error::new(ErrorKind::AddressSyntax, Some(e))
}

pub(crate) fn encoding<E: Into<BoxError>>(e: E) -> Error {
    Error::new(ErrorKind::Encoding, Some(e))
}

pub(crate) fn io<E: Into<BoxError>>(e: E) -> Error {
    Error::new(ErrorKind::Io, Some(e))
}

pub(crate) fn transport<E: Into<BoxError>>(e: E) -> Error {
    Error::new(ErrorKind::Transport, Some(e))
}
