//! Send HTML email with attachments over SMTP with a few lines of setup.
//!
//! A [`Sender`] holds the relay configuration and credentials, a [`Mail`] describes one
//! outgoing message. [`Sender::send`] picks the recipients, assembles a
//! `multipart/mixed` message (HTML body first, then one part per attached file) and
//! hands it to the transport, blocking until it is done.
//!
//! The SMTP conversation, TLS and MIME encoding are done by [`lettre`].
//!
//! ## Relay host
//!
//! The relay can be given explicitly, or inferred from the sender address: mail sent
//! from `user@sub.example.com` goes through `smtp.sub.example.com`.
//!
//! ```rust,no_run
//! use simple_mail::{Mail, Sender};
//!
//! # fn main() -> Result<(), simple_mail::Error> {
//! let sender = Sender::infer("user@example.com", "password")?;
//!
//! let mail = Mail::new("Monthly report", "Hello,\nplease find the report attached.")
//!     .recipient("Boss <boss@example.com>")
//!     .attachment("report.pdf");
//! sender.send(&mail)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Recipients
//!
//! The recipients of a mail are, in order of preference:
//!
//! * the recipients set on the [`Mail`]
//! * the default recipients of the [`Sender`]
//! * the sender address itself
//!
//! ## Configuration
//!
//! [`SenderConfig`] carries everything else: port, connection [`Security`] and whether
//! to authenticate. With the `serde` feature it can be deserialized from any format.
//!
//! ```rust,no_run
//! use simple_mail::{Security, Sender, SenderConfig};
//!
//! # fn main() -> Result<(), simple_mail::Error> {
//! let config = SenderConfig::new("mail.example.com", "noreply@example.com", "password")
//!     .security(Security::Wrapper)
//!     .default_recipients(["ops@example.com"]);
//! let _sender = Sender::from_config(config)?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces,
    rust_2018_idioms,
    clippy::string_add,
    clippy::string_add_assign,
    clippy::clone_on_ref_ptr,
    clippy::verbose_file_reads,
    clippy::unnecessary_self_imports,
    clippy::string_to_string,
    clippy::mem_forget,
    clippy::cast_lossless,
    clippy::inefficient_to_string,
    clippy::inline_always,
    clippy::linkedlist,
    clippy::macro_use_imports,
    clippy::manual_assert,
    clippy::unnecessary_join,
    clippy::zero_sized_map_values
)]

pub mod address;
mod authenticator;
mod config;
pub mod encoding;
pub mod error;
mod mail;
mod sender;

pub use lettre;

pub use crate::{
    authenticator::Authenticator,
    config::{Security, SenderConfig},
    error::{Error, ErrorKind},
    mail::Mail,
    sender::Sender,
};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;
