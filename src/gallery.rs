//! Listing (search, browse, gallery) extraction.
//!
//! Each listing page holds a grid of post cards:
//!
//! ```text
//! <figure id="sid-12345" class="r-general t-image u-someone">
//!   <b><u><a href="/view/12345/"><img src="//t.furaffinity.net/12345@200.jpg"></a></u></b>
//!   <figcaption><p><a href="/view/12345/" title="Title">Title</a></p>...</figcaption>
//! </figure>
//! ```
//!
//! followed by a sidecar script (see [`crate::sidecar`]) carrying the fields
//! the cards lack. Cards are turned into records in document order.

use dom_query::{Document, Selection};
use serde::{Deserialize, Serialize};

use crate::dom;
use crate::page;
use crate::patterns::{
    BROWSE_CONTAINER, ENTRY_TITLE_LINK, GALLERY_CONTAINER, GALLERY_SECTION, PAGE_BROWSE,
    PAGE_GALLERY, PAGE_SEARCH, POST_ENTRY, POST_ID_PREFIX, RATING_PREFIX, SEARCH_CONTAINER,
    TYPE_PREFIX, USER_PREFIX,
};
use crate::record::{ListSummaryBuilder, ListSummaryRecord};
use crate::sidecar::{resolve_sidecar, ScriptPosition, Sidecar};
use crate::{Error, Result};

/// The kinds of listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Search,
    Browse,
    /// Artist gallery, scraps and folder pages.
    Gallery,
}

impl ListingKind {
    /// Page token the document must carry.
    #[must_use]
    pub fn page_token(self) -> &'static str {
        match self {
            Self::Search => PAGE_SEARCH,
            Self::Browse => PAGE_BROWSE,
            Self::Gallery => PAGE_GALLERY,
        }
    }

    /// Element the sidecar script follows.
    fn container(self) -> &'static str {
        match self {
            Self::Search => SEARCH_CONTAINER,
            Self::Browse => BROWSE_CONTAINER,
            Self::Gallery => GALLERY_CONTAINER,
        }
    }

    /// Search pages put other scripts between the grid and the payload.
    fn script_position(self) -> ScriptPosition {
        match self {
            Self::Search => ScriptPosition::Last,
            Self::Browse | Self::Gallery => ScriptPosition::First,
        }
    }
}

/// Extract list records from a listing page of the given kind.
pub fn extract_listing(html: &str, kind: ListingKind) -> Result<Vec<ListSummaryRecord>> {
    let doc = dom::parse(html);
    extract_listing_document(&doc, kind)
}

/// Extract list records from an already parsed listing page.
pub fn extract_listing_document(doc: &Document, kind: ListingKind) -> Result<Vec<ListSummaryRecord>> {
    page::expect_page(doc, kind.page_token())?;

    let container = dom::find(doc, kind.container()).ok_or_else(|| Error::missing("listing container"))?;
    let sidecar = resolve_sidecar(&container, kind.script_position())?;

    let section = if kind == ListingKind::Search {
        container
    } else {
        dom::query_first(&container, GALLERY_SECTION).ok_or_else(|| Error::missing("gallery section"))?
    };

    let records = extract_entries(&section, sidecar.as_ref())?;
    tracing::debug!(?kind, posts = records.len(), enriched = sidecar.is_some(), "extracted listing");
    Ok(records)
}

/// Turn every post card in `section` into a record, in document order.
///
/// Cards whose id lacks the post prefix are skipped.
pub fn extract_entries(section: &Selection, sidecar: Option<&Sidecar>) -> Result<Vec<ListSummaryRecord>> {
    let mut records = Vec::new();

    for entry in dom::by_tag(section, POST_ENTRY) {
        let Some(id) = entry_id(&entry)? else {
            tracing::trace!(id = dom::attr(&entry, "id").as_deref(), "skipping non-post entry");
            continue;
        };

        let props = sidecar
            .map(|sidecar| sidecar.get(id).ok_or(Error::SidecarKeyMissing(id)))
            .transpose()?;

        let mut builder = entry_base(&entry, id)?;
        if let Some(props) = props {
            builder = builder.merge(props)?;
        }

        records.push(builder.build()?);
    }

    Ok(records)
}

/// Post id from a `sid-<id>` element id; `None` for other entries.
fn entry_id(entry: &Selection) -> Result<Option<u64>> {
    let Some(raw) = dom::attr(entry, "id") else {
        return Ok(None);
    };
    let Some(digits) = raw.strip_prefix(POST_ID_PREFIX) else {
        return Ok(None);
    };

    digits
        .parse()
        .map(Some)
        .map_err(|e| Error::unparsable("post id", format!("'{raw}': {e}")))
}

/// Fields a card carries in its own markup.
fn entry_base(entry: &Selection, id: u64) -> Result<ListSummaryBuilder> {
    let mut builder = ListSummaryBuilder::new().id(id);

    for token in dom::class_tokens(entry) {
        if let Some(rating) = token.strip_prefix(RATING_PREFIX) {
            builder = builder.rating(rating);
        } else if let Some(media_type) = token.strip_prefix(TYPE_PREFIX) {
            builder = builder.media_type(media_type);
        } else if let Some(user) = token.strip_prefix(USER_PREFIX) {
            builder = builder.username(user);
        }
    }

    if let Some(link) = dom::query_first(entry, ENTRY_TITLE_LINK) {
        let title = dom::non_empty_attr(&link, "title").unwrap_or_else(|| dom::trimmed_text(&link));
        if !title.is_empty() {
            builder = builder.title(title);
        }
    }

    let img = dom::query_first(entry, "img").ok_or_else(|| Error::missing("preview image"))?;
    let preview = dom::non_empty_attr(&img, "src").ok_or_else(|| Error::missing("preview image"))?;
    let permalink = dom::enclosing(&img, "a")
        .and_then(|link| dom::non_empty_attr(&link, "href"))
        .ok_or_else(|| Error::missing("permalink"))?;

    Ok(builder.preview_img(preview).permalink(permalink))
}
