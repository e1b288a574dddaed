//! Sender address validation, relay host inference and recipient resolution

use lettre::message::Mailbox;

use crate::error::{self, Error};

/// CJK Unified Ideographs accepted in the local part of a sender address
const CJK_IDEOGRAPHS: std::ops::RangeInclusive<char> = '\u{4e00}'..='\u{9fa5}';

fn is_local_start(c: char) -> bool {
    c.is_ascii_alphanumeric() || CJK_IDEOGRAPHS.contains(&c)
}

fn is_local_char(c: char) -> bool {
    is_local_start(c) || c == '-' || c == '_'
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Checks that `address` is a sender address from which a relay host can be inferred
///
/// The local part is at least two characters long, made of ASCII alphanumerics, CJK
/// ideographs, `-` and `_`, and does not start with `-` or `_`. The domain has at least
/// two non-empty dot-separated labels made of ASCII alphanumerics, `-` and `_`.
pub fn is_valid_sender(address: &str) -> bool {
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };

    let mut chars = local.chars();
    if !chars.next().is_some_and(is_local_start) {
        return false;
    }
    let rest = chars.as_str();
    if rest.is_empty() || !rest.chars().all(is_local_char) {
        return false;
    }

    let mut labels = domain.split('.');
    labels.clone().count() >= 2
        && labels.all(|label| !label.is_empty() && label.chars().all(is_domain_char))
}

/// Derives the SMTP relay host of a sender address, `smtp.` followed by its domain
///
/// Fails with a configuration error when the address is rejected by [`is_valid_sender`].
pub fn infer_host(address: &str) -> Result<String, Error> {
    match address.split_once('@') {
        Some((_, domain)) if is_valid_sender(address) => Ok(format!("smtp.{domain}")),
        _ => Err(error::configuration(format!("illegal mail format: {address}"))),
    }
}

/// Picks the recipients of a mail
///
/// The mail's own recipients win, then the sender defaults, and when both are empty
/// the mail goes back to the sender itself.
pub fn resolve_recipients<'a>(
    recipients: &'a [String],
    defaults: &'a [String],
    sender_address: &'a str,
) -> Vec<&'a str> {
    if !recipients.is_empty() {
        recipients.iter().map(String::as_str).collect()
    } else if !defaults.is_empty() {
        defaults.iter().map(String::as_str).collect()
    } else {
        vec![sender_address]
    }
}

pub(crate) fn parse_mailbox(address: &str) -> Result<Mailbox, Error> {
    address
        .parse::<Mailbox>()
        .map_err(|err| error::address(format!("{address}: {err}")))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn valid_senders() {
        for address in [
            "user@example.com",
            "user@sub.example.com",
            "a1@b.c",
            "first-last_x@mail-host.example.org",
            "小明@example.com",
            "9lives@example.co.uk",
        ] {
            assert!(is_valid_sender(address), "{address}");
        }
    }

    #[test]
    fn invalid_senders() {
        for address in [
            "",
            "a@example.com",
            "-user@example.com",
            "_user@example.com",
            "user@localhost",
            "user@example..com",
            "user@.example.com",
            "user@example.com.",
            "user.name@example.com",
            "user@exa@mple.com",
            "user+tag@example.com",
            "user@exämple.com",
            "not-an-address",
        ] {
            assert!(!is_valid_sender(address), "{address}");
        }
    }

    #[test]
    fn infers_host_from_domain() {
        assert_eq!(
            infer_host("user@sub.example.com").unwrap(),
            "smtp.sub.example.com"
        );
        assert_eq!(infer_host("小明@qq.com").unwrap(), "smtp.qq.com");
    }

    #[test]
    fn infer_host_rejects_invalid_sender() {
        let err = infer_host("user@localhost").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn mail_recipients_win() {
        let recipients = vec!["c@x.com".to_owned(), "d@x.com".to_owned()];
        let defaults = vec!["b@x.com".to_owned()];
        assert_eq!(
            resolve_recipients(&recipients, &defaults, "a@x.com"),
            ["c@x.com", "d@x.com"]
        );
    }

    #[test]
    fn defaults_used_without_mail_recipients() {
        let defaults = vec!["b@x.com".to_owned()];
        assert_eq!(resolve_recipients(&[], &defaults, "a@x.com"), ["b@x.com"]);
    }

    #[test]
    fn falls_back_to_sender() {
        assert_eq!(resolve_recipients(&[], &[], "a@x.com"), ["a@x.com"]);
    }

    #[test]
    fn parse_mailbox_rejects_garbage() {
        assert!(parse_mailbox("not-an-address").unwrap_err().is_address_syntax());
        assert_eq!(
            parse_mailbox("Alice <alice@example.com>").unwrap().email.to_string(),
            "alice@example.com"
        );
    }
}
