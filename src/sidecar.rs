//! Embedded sidecar payload resolution.
//!
//! Listing pages follow the post grid with a script that assigns a JSON
//! object keyed by post id:
//!
//! ```text
//! <script>
//!     var descriptions = {"12345": {"title": "...", "description": "...", ...}};
//!     //
//!     ...
//! </script>
//! ```
//!
//! The payload enriches the DOM cards with fields the cards do not carry.

use std::collections::HashMap;

use dom_query::Selection;
use serde_json::{Map, Value};

use crate::dom;
use crate::{Error, Result};

/// Which following `<script>` sibling holds the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPosition {
    /// The first script after the container.
    First,
    /// The last script among the container's following siblings.
    Last,
}

/// Id-keyed property mappings parsed from a sidecar script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sidecar {
    entries: HashMap<String, Map<String, Value>>,
}

impl Sidecar {
    /// Properties for a post id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Map<String, Value>> {
        self.entries.get(&id.to_string())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a JSON object of objects.
    pub fn from_json(payload: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| Error::unparsable("sidecar", e))?;

        let Value::Object(map) = value else {
            return Err(Error::unparsable("sidecar", "payload is not an object"));
        };

        let mut entries = HashMap::with_capacity(map.len());
        for (id, props) in map {
            let Value::Object(props) = props else {
                return Err(Error::unparsable(
                    "sidecar",
                    format!("entry '{id}' is not an object"),
                ));
            };
            entries.insert(id, props);
        }

        Ok(Self { entries })
    }
}

/// Locate and parse the sidecar script following `container`.
///
/// A missing script is not an error: enrichment is optional. A script that is
/// present but does not hold a parsable assignment is.
pub fn resolve_sidecar(container: &Selection, position: ScriptPosition) -> Result<Option<Sidecar>> {
    let script = match position {
        ScriptPosition::First => dom::next_sibling_of_tag(container, "script"),
        ScriptPosition::Last => dom::last_sibling_of_tag(container, "script"),
    };

    let Some(script) = script else {
        tracing::debug!("no sidecar script after container");
        return Ok(None);
    };

    let source = script.text();
    let payload =
        assignment_payload(&source).ok_or_else(|| Error::unparsable("sidecar", "no assignment in script"))?;

    let sidecar = Sidecar::from_json(payload)?;
    tracing::debug!(entries = sidecar.len(), "resolved sidecar");
    Ok(Some(sidecar))
}

/// Right-hand side of the first assignment in a script.
///
/// The value runs until the first line that starts with a `//` comment, with
/// trailing whitespace, statement terminators and a trailing `// ...`
/// comment after the closing brace removed. Returns `None` when the script
/// has no `=`.
#[must_use]
pub fn assignment_payload(script: &str) -> Option<&str> {
    let (_, rhs) = script.split_once('=')?;

    let mut end = rhs.len();
    let mut offset = 0;
    for line in rhs.split_inclusive('\n') {
        if offset > 0 && line.trim_start().starts_with("//") {
            end = offset;
            break;
        }
        offset += line.len();
    }

    let payload = trim_statement(&rhs[..end]);
    if payload.ends_with('}') {
        return Some(payload);
    }

    // Only text after the last brace can be a comment; `//` inside the
    // object belongs to protocol-relative URLs.
    let trailing_comment = payload
        .rfind('}')
        .filter(|&close| trim_statement(&payload[close + 1..]).starts_with("//"));
    Some(match trailing_comment {
        Some(close) => trim_statement(&payload[..=close]),
        None => payload,
    })
}

fn trim_statement(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == ';')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_payload_simple() {
        let script = "var descriptions = {\"1\": {\"title\": \"a\"}};\n";
        assert_eq!(assignment_payload(script), Some("{\"1\": {\"title\": \"a\"}}"));
    }

    #[test]
    fn test_assignment_payload_stops_at_comment_line() {
        let script = "\n    var descriptions = {\"1\": {}};\n    //\n    var other = 5;\n";
        assert_eq!(assignment_payload(script), Some("{\"1\": {}}"));
    }

    #[test]
    fn test_assignment_payload_keeps_urls() {
        let script = "var d = {\n\"1\": {\"preview_img\": \"//t.example.net/1.jpg\"}\n};";
        let payload = assignment_payload(script).expect("payload");
        assert!(payload.contains("//t.example.net/1.jpg"));
        assert!(Sidecar::from_json(payload).is_ok());
    }

    #[test]
    fn test_assignment_payload_drops_inline_comment() {
        let script = "var d = {\"1\": {\"preview_img\": \"//t.example.net/1.jpg\"}}; // trailing";
        let payload = assignment_payload(script).expect("payload");
        assert_eq!(payload, "{\"1\": {\"preview_img\": \"//t.example.net/1.jpg\"}}");
        assert!(Sidecar::from_json(payload).is_ok());
    }

    #[test]
    fn test_assignment_payload_without_assignment() {
        assert_eq!(assignment_payload("console.log('hi');"), None);
    }

    #[test]
    fn test_from_json_rejects_non_object_entries() {
        assert!(matches!(
            Sidecar::from_json(r#"{"1": "title"}"#),
            Err(Error::MalformedDocument { .. })
        ));
        assert!(matches!(
            Sidecar::from_json("[1, 2]"),
            Err(Error::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_resolve_absent_script() {
        let doc = dom::parse(r#"<div><section id="s"></section><div>no script</div></div>"#);
        let result = resolve_sidecar(&doc.select("#s"), ScriptPosition::First);
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_resolve_first_and_last() {
        let doc = dom::parse(
            r#"<div><section id="s"></section>
            <script>var a = {"1": {"title": "first"}};</script>
            <script>var b = {"2": {"title": "last"}};</script></div>"#,
        );
        let section = doc.select("#s");

        let first = resolve_sidecar(&section, ScriptPosition::First)
            .expect("parse")
            .expect("present");
        assert!(first.get(1).is_some());
        assert!(first.get(2).is_none());

        let last = resolve_sidecar(&section, ScriptPosition::Last)
            .expect("parse")
            .expect("present");
        assert_eq!(last.get(2).and_then(|p| p.get("title")), Some(&Value::from("last")));
    }

    #[test]
    fn test_resolve_unparsable_payload_is_malformed() {
        let doc = dom::parse(
            r#"<div><section id="s"></section><script>var d = {not json};</script></div>"#,
        );
        match resolve_sidecar(&doc.select("#s"), ScriptPosition::First) {
            Err(Error::MalformedDocument { role, detail }) => {
                assert_eq!(role, "sidecar");
                assert!(detail.is_some());
            }
            other => panic!("expected MalformedDocument, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_script_without_assignment_is_malformed() {
        let doc = dom::parse(
            r#"<div><section id="s"></section><script>initGallery();</script></div>"#,
        );
        match resolve_sidecar(&doc.select("#s"), ScriptPosition::First) {
            Err(Error::MalformedDocument { role, detail }) => {
                assert_eq!(role, "sidecar");
                assert_eq!(detail.as_deref(), Some("no assignment in script"));
            }
            other => panic!("expected MalformedDocument, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_single_line_with_trailing_comment() {
        let doc = dom::parse(
            r#"<div><section id="s"></section><script>var d = {"1": {"title": "a"}}; // set by gallery</script></div>"#,
        );
        let sidecar = resolve_sidecar(&doc.select("#s"), ScriptPosition::First)
            .expect("parse")
            .expect("present");
        assert_eq!(sidecar.len(), 1);
        assert!(sidecar.get(1).is_some());
    }
}
