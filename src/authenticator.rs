//! Credentials handed to the SMTP transport

use std::fmt::{self, Debug, Formatter};

use lettre::transport::smtp::authentication::Credentials;

/// Holds the sender address and its secret
///
/// The sender address doubles as the authentication identity, the `From` header and
/// the recipient of last resort.
#[derive(PartialEq, Eq, Clone, Hash)]
pub struct Authenticator {
    sender_address: String,
    secret: String,
}

impl Authenticator {
    /// Create an `Authenticator` from a sender address and its password
    pub fn new(sender_address: String, secret: String) -> Authenticator {
        Authenticator {
            sender_address,
            secret,
        }
    }

    /// The configured sender address
    pub fn sender_address(&self) -> &str {
        &self.sender_address
    }

    /// The credentials the transport answers authentication challenges with
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.sender_address.clone(), self.secret.clone())
    }
}

impl Debug for Authenticator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("sender_address", &self.sender_address)
            .finish_non_exhaustive()
    }
}
