//! Label/value block parsing.
//!
//! Submission stats are laid out as loose inline markup rather than a table:
//!
//! ```text
//! <b>Category:</b> Artwork (Digital)<br>
//! <b>Posted:</b> <span class="popup_date" title="May 1st, 2021 10:00 AM">3 days ago</span><br>
//! ```
//!
//! [`key_value_pairs`] turns such a block into ordered `(label, value node)`
//! pairs; [`Stats`] resolves the nodes to strings under a per-field
//! [`ValuePolicy`].

use std::collections::HashMap;

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::patterns::{COUNT_SEPARATOR, EXACT_VALUE_ATTR};
use crate::{Error, Result};

/// The node holding a label's value.
pub enum ValueNode<'a> {
    /// A bare text node, already trimmed.
    Text(String),
    /// A tagged element such as a date display.
    Element(Selection<'a>),
    /// Nothing between the label and its terminator.
    Empty,
}

/// How a value node is turned into a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePolicy {
    /// Use the element's display text.
    DisplayText,
    /// Use the attribute when the element has it, display text otherwise.
    PreferAttribute(&'static str),
    /// Only the attribute is trusted; display text is ignored.
    RequireAttribute(&'static str),
}

impl ValuePolicy {
    /// Policy for a normalized stats label.
    #[must_use]
    pub fn for_label(label: &str) -> Self {
        match label {
            "posted" => Self::RequireAttribute(EXACT_VALUE_ATTR),
            _ => Self::PreferAttribute(EXACT_VALUE_ATTR),
        }
    }

    /// Resolve a value node. Blank results are `None`.
    #[must_use]
    pub fn resolve(self, node: &ValueNode) -> Option<String> {
        let value = match (self, node) {
            (_, ValueNode::Empty) => None,
            (_, ValueNode::Text(text)) => Some(text.clone()),
            (Self::DisplayText, ValueNode::Element(el)) => Some(dom::trimmed_text(el)),
            (Self::PreferAttribute(name), ValueNode::Element(el)) => {
                dom::non_empty_attr(el, name).or_else(|| Some(dom::trimmed_text(el)))
            }
            (Self::RequireAttribute(name), ValueNode::Element(el)) => dom::non_empty_attr(el, name),
        };
        value.filter(|v| !v.is_empty())
    }
}

/// Lower-case a label and drop its trailing colon.
#[must_use]
pub fn normalize_label(raw: &str) -> String {
    raw.trim().trim_end_matches(':').trim_end().to_lowercase()
}

/// Ordered `(label, value)` pairs of a label/value block.
///
/// For each element matching `label_selector`, the value is the sibling
/// immediately preceding the next `terminator_tag` sibling, ignoring
/// whitespace-only text. The end of the parent acts as a terminator.
#[must_use]
pub fn key_value_pairs<'a>(
    container: &Selection<'a>,
    label_selector: &str,
    terminator_tag: &str,
) -> Vec<(String, ValueNode<'a>)> {
    let mut pairs = Vec::new();

    for label in dom::query_all(container, label_selector) {
        let Some(label_node) = label.nodes().first().copied() else {
            continue;
        };

        let mut preceding: Option<NodeRef<'a>> = None;
        let siblings = std::iter::successors(label_node.next_sibling(), NodeRef::next_sibling);
        for sibling in siblings {
            if dom::is_tag(&sibling, terminator_tag) {
                break;
            }
            if is_meaningful(&sibling) {
                preceding = Some(sibling);
            }
        }

        let value = match preceding {
            Some(node) if node.is_element() => ValueNode::Element(Selection::from(node)),
            Some(node) => ValueNode::Text(node.text().trim().to_string()),
            None => ValueNode::Empty,
        };

        pairs.push((normalize_label(&label.text()), value));
    }

    pairs
}

/// Elements and non-blank text nodes; comments and whitespace are skipped.
fn is_meaningful(node: &NodeRef) -> bool {
    node.is_element() || (node.is_text() && !node.text().trim().is_empty())
}

/// Resolved stats of a submission, keyed by normalized label.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    values: HashMap<String, String>,
}

impl Stats {
    /// Parse a stats block, resolving each value with its label's policy.
    #[must_use]
    pub fn parse(block: &Selection, label_selector: &str, terminator_tag: &str) -> Self {
        let mut values = HashMap::new();

        for (label, node) in key_value_pairs(block, label_selector, terminator_tag) {
            let policy = ValuePolicy::for_label(&label);
            match policy.resolve(&node) {
                Some(value) => {
                    tracing::trace!(%label, %value, "stats entry");
                    values.insert(label, value);
                }
                None => tracing::trace!(%label, "stats entry without value"),
            }
        }

        Self { values }
    }

    /// Remove and return an optional value.
    pub fn take(&mut self, label: &str) -> Option<String> {
        self.values.remove(label)
    }

    /// Remove and return a required value.
    pub fn take_required(&mut self, label: &'static str) -> Result<String> {
        self.take(label).ok_or_else(|| Error::missing(label))
    }

    /// Remove and parse a required counter such as `1,234`.
    pub fn take_count(&mut self, label: &'static str) -> Result<u64> {
        let raw = self.take_required(label)?;
        COUNT_SEPARATOR
            .replace_all(&raw, "")
            .parse()
            .map_err(|e| Error::unparsable(label, format!("'{raw}': {e}")))
    }
}
