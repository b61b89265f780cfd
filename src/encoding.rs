//! Response body decoding.
//!
//! Fetched pages arrive as raw bytes. The charset is taken from the page's own
//! `<meta>` declaration; pages without one are treated as UTF-8.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// `<meta charset="...">` or `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>;]+)"#).expect("valid regex")
});

/// Only the head of the document is scanned for a declaration.
const SNIFF_LEN: usize = 2048;

/// Detect the declared encoding, defaulting to UTF-8.
#[must_use]
pub fn detect_encoding(body: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&body[..body.len().min(SNIFF_LEN)]);

    META_CHARSET
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode a response body to UTF-8 text.
///
/// Invalid sequences are replaced with U+FFFD rather than failing.
#[must_use]
pub fn decode_body(body: &[u8]) -> Cow<'_, str> {
    let encoding = detect_encoding(body);
    if encoding != UTF_8 {
        tracing::debug!(encoding = encoding.name(), "transcoding response body");
    }

    let (text, _, had_errors) = encoding.decode(body);
    if had_errors {
        tracing::debug!("response body contained invalid sequences");
    }
    text
}
