//! Tree query layer.
//!
//! A small, stable query contract over `dom_query` that the extractors use
//! instead of ad-hoc traversal: query by selector, by class token, by tag,
//! and "next sibling of kind X".

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attributes ===

/// Get an attribute value as an owned string.
#[inline]
#[must_use]
pub fn attr(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get an attribute value, treating blank values as absent.
#[must_use]
pub fn non_empty_attr(sel: &Selection, name: &str) -> Option<String> {
    attr(sel, name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Whitespace-separated tokens of the `class` attribute, in attribute order.
#[must_use]
pub fn class_tokens(sel: &Selection) -> Vec<String> {
    sel.attr("class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Whether a node is an element with the given tag name.
#[must_use]
pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    node.is_element()
        && node
            .node_name()
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
}

// === Text ===

/// Text content of the selection and its descendants, trimmed.
#[must_use]
pub fn trimmed_text(sel: &Selection) -> String {
    sel.text().trim().to_string()
}

// === Querying ===

/// First element matching `selector` below `scope`.
#[must_use]
pub fn query_first<'a>(scope: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    scope.select(selector).nodes().first().map(|n| Selection::from(*n))
}

/// First element matching `selector` anywhere in the document.
#[must_use]
pub fn find<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    doc.select(selector).nodes().first().map(|n| Selection::from(*n))
}

/// All elements matching `selector` below `scope`, in document order.
#[must_use]
pub fn query_all<'a>(scope: &Selection<'a>, selector: &str) -> Vec<Selection<'a>> {
    scope.select(selector).iter().collect()
}

/// Element found by its `id` attribute.
#[must_use]
pub fn by_id<'a>(doc: &'a Document, id: &str) -> Option<Selection<'a>> {
    find(doc, &format!("#{id}"))
}

/// Elements below `scope` carrying the given class token.
#[must_use]
pub fn by_class<'a>(scope: &Selection<'a>, token: &str) -> Vec<Selection<'a>> {
    query_all(scope, &format!(".{token}"))
}

/// Elements below `scope` with the given tag name.
#[must_use]
pub fn by_tag<'a>(scope: &Selection<'a>, tag: &str) -> Vec<Selection<'a>> {
    query_all(scope, tag)
}

// === Tree Navigation ===

/// Following element siblings of the first node, in document order.
fn following_elements<'a>(sel: &Selection<'a>) -> impl Iterator<Item = NodeRef<'a>> {
    let start = sel.nodes().first().and_then(NodeRef::next_sibling);
    std::iter::successors(start, NodeRef::next_sibling).filter(NodeRef::is_element)
}

/// Next sibling with the given tag, skipping any other siblings in between.
#[must_use]
pub fn next_sibling_of_tag<'a>(sel: &Selection<'a>, tag: &str) -> Option<Selection<'a>> {
    following_elements(sel)
        .find(|node| is_tag(node, tag))
        .map(Selection::from)
}

/// Last of the following siblings with the given tag.
#[must_use]
pub fn last_sibling_of_tag<'a>(sel: &Selection<'a>, tag: &str) -> Option<Selection<'a>> {
    following_elements(sel)
        .filter(|node| is_tag(node, tag))
        .last()
        .map(Selection::from)
}

/// Nearest ancestor with the given tag.
#[must_use]
pub fn enclosing<'a>(sel: &Selection<'a>, tag: &str) -> Option<Selection<'a>> {
    let start = sel.nodes().first().and_then(NodeRef::parent);
    std::iter::successors(start, NodeRef::parent)
        .find(|node| is_tag(node, tag))
        .map(Selection::from)
}

// === Detached Copies ===

/// Copy an element with all descendants into a standalone document.
///
/// Edits on the copy leave the source document untouched.
#[must_use]
pub fn detach(sel: &Selection) -> Document {
    Document::from(sel.html().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes() {
        let doc = parse(r#"<div id="main" class="a  b c" data-x="  ">content</div>"#);
        let div = doc.select("div");

        assert_eq!(attr(&div, "id"), Some("main".to_string()));
        assert_eq!(class_tokens(&div), vec!["a", "b", "c"]);
        assert_eq!(non_empty_attr(&div, "data-x"), None);
        assert_eq!(attr(&div, "missing"), None);
    }

    #[test]
    fn test_class_tokens_without_class() {
        let doc = parse("<p>text</p>");
        assert!(class_tokens(&doc.select("p")).is_empty());
    }

    #[test]
    fn test_query_first_and_all() {
        let doc = parse(
            r#"
            <div id="container">
                <p class="text">First</p>
                <p class="text">Second</p>
                <span>Third</span>
            </div>
        "#,
        );

        let container = by_id(&doc, "container").expect("container");
        let first = query_first(&container, "p").expect("first p");
        assert_eq!(trimmed_text(&first), "First");
        assert_eq!(query_all(&container, "p").len(), 2);
        assert_eq!(by_class(&container, "text").len(), 2);
        assert_eq!(by_tag(&container, "span").len(), 1);
        assert!(query_first(&container, "table").is_none());
        assert!(by_id(&doc, "nope").is_none());
    }

    #[test]
    fn test_next_sibling_of_tag_skips_other_elements() {
        let doc = parse(
            r#"<div><section id="s"></section> <div>x</div><script>one</script><script>two</script></div>"#,
        );
        let section = doc.select("#s");

        let first_script = next_sibling_of_tag(&section, "script").expect("script");
        assert_eq!(trimmed_text(&first_script), "one");

        let last_script = last_sibling_of_tag(&section, "script").expect("script");
        assert_eq!(trimmed_text(&last_script), "two");
    }

    #[test]
    fn test_sibling_of_tag_none() {
        let doc = parse(r#"<div><p id="last">Last</p></div>"#);
        let p = doc.select("#last");
        assert!(next_sibling_of_tag(&p, "script").is_none());
        assert!(last_sibling_of_tag(&p, "script").is_none());
    }

    #[test]
    fn test_enclosing() {
        let doc = parse(r#"<a href="/view/1/"><u><img src="x.jpg"></u></a>"#);
        let img = doc.select("img");
        let link = enclosing(&img, "a").expect("link");
        assert_eq!(attr(&link, "href"), Some("/view/1/".to_string()));
        assert!(enclosing(&img, "table").is_none());
    }

    #[test]
    fn test_detach_leaves_source_untouched() {
        let doc = parse(r#"<div id="d"><span class="drop">x</span>keep</div>"#);
        let copy = detach(&doc.select("#d"));
        copy.select(".drop").remove();

        assert!(copy.select(".drop").is_empty());
        assert!(doc.select(".drop").exists());
        assert_eq!(trimmed_text(&copy.select("#d")), "keep");
    }
}
