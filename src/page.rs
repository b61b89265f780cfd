//! Page identification.
//!
//! Every page on the site carries its page type in the `<body>` id
//! (`<body id="pageid-browse">`). Extractors check it before touching the
//! rest of the document so a wrong page is reported as such rather than as a
//! missing element.

use dom_query::Document;

use crate::dom;
use crate::patterns::PAGE_ID_PREFIX;
use crate::{Error, Result};

/// Read the page token from the document root marker.
///
/// Returns `None` when the body has no id or the id lacks the `pageid-` prefix.
#[must_use]
pub fn page_id(doc: &Document) -> Option<String> {
    let body = dom::find(doc, "body")?;
    let marker = dom::attr(&body, "id")?;

    marker
        .strip_prefix(PAGE_ID_PREFIX)
        .map(str::to_string)
}

/// Fail with [`Error::PageMismatch`] unless the document carries `expected`.
pub fn expect_page(doc: &Document, expected: &'static str) -> Result<()> {
    let actual = page_id(doc);

    if actual.as_deref() == Some(expected) {
        return Ok(());
    }

    tracing::debug!(expected, actual = actual.as_deref(), "page id mismatch");
    Err(Error::PageMismatch { expected, actual })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_strips_prefix() {
        let doc = dom::parse(r#"<html><body id="pageid-browse"></body></html>"#);
        assert_eq!(page_id(&doc), Some("browse".to_string()));
    }

    #[test]
    fn test_page_id_absent_without_marker() {
        let doc = dom::parse("<html><body><p>hi</p></body></html>");
        assert_eq!(page_id(&doc), None);
    }

    #[test]
    fn test_page_id_absent_with_foreign_id() {
        let doc = dom::parse(r#"<html><body id="main"></body></html>"#);
        assert_eq!(page_id(&doc), None);
    }

    #[test]
    fn test_expect_page() {
        let doc = dom::parse(r#"<html><body id="pageid-search"></body></html>"#);
        assert!(expect_page(&doc, "search").is_ok());

        match expect_page(&doc, "galery") {
            Err(Error::PageMismatch { expected, actual }) => {
                assert_eq!(expected, "galery");
                assert_eq!(actual.as_deref(), Some("search"));
            }
            other => panic!("expected PageMismatch, got {other:?}"),
        }
    }
}
