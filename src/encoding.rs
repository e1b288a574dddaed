//! Header word encoding and HTML body preparation
//!
//! See [RFC 2047](https://tools.ietf.org/html/rfc2047)

use base64::{engine::general_purpose::STANDARD, Engine};

const PREFIX: &str = "=?utf-8?b?";
const SUFFIX: &str = "?=";

/// An encoded word may not be more than 75 characters long.
/// 45 bytes of input encode to 60 characters, which fits next to the delimiters.
const MAX_CHUNK_BYTES: usize = 45;

fn allowed_char(c: char) -> bool {
    (c.is_ascii() && !c.is_ascii_control()) || c == '\t'
}

/// Encodes `s` as RFC 2047 `B` encoded words when it is not plain ASCII
///
/// Plain ASCII input is returned unchanged. Longer input is split on character
/// boundaries into several space-separated encoded words.
pub fn encode_word(s: &str) -> String {
    if s.chars().all(allowed_char) {
        return s.to_owned();
    }

    let mut words = Vec::new();
    let mut start = 0;
    for (idx, c) in s.char_indices() {
        if idx + c.len_utf8() - start > MAX_CHUNK_BYTES {
            words.push(&s[start..idx]);
            start = idx;
        }
    }
    words.push(&s[start..]);

    words
        .into_iter()
        .map(|chunk| format!("{PREFIX}{}{SUFFIX}", STANDARD.encode(chunk)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces every line feed in `body` with an HTML line break
pub fn html_line_breaks(body: &str) -> String {
    body.replace('\n', "<br/>")
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{encode_word, html_line_breaks};

    #[test]
    fn encode_ascii() {
        assert_eq!(encode_word("report 2024.pdf"), "report 2024.pdf");
    }

    #[test]
    fn encode_utf8() {
        assert_eq!(encode_word("报告.txt"), "=?utf-8?b?5oql5ZGKLnR4dA==?=");
        assert_eq!(
            encode_word("Привет, мир!"),
            "=?utf-8?b?0J/RgNC40LLQtdGCLCDQvNC40YAh?="
        );
    }

    #[test]
    fn encode_long_utf8_splits_words() {
        let encoded = encode_word("季度报告-2024-最终版-第二次修订-附录材料.pdf");
        assert_eq!(
            encoded,
            concat!(
                "=?utf-8?b?5a2j5bqm5oql5ZGKLTIwMjQt5pyA57uI54mILeesrOS6jOasoeS/ruiuoi0=?= ",
                "=?utf-8?b?6ZmE5b2V5p2Q5paZLnBkZg==?="
            )
        );
        assert!(encoded.split(' ').all(|word| word.len() <= 75));
    }

    #[test]
    fn line_breaks() {
        assert_eq!(html_line_breaks("line1\nline2"), "line1<br/>line2");
        assert_eq!(html_line_breaks("\n\n"), "<br/><br/>");
    }

    #[test]
    fn line_breaks_without_newline_is_identity() {
        let body = "<p>Hello, world</p>\r";
        assert_eq!(html_line_breaks(body), body);
        assert_eq!(html_line_breaks(&html_line_breaks(body)), body);
    }
}
