//! Submission (detail page) extraction.
//!
//! A submission page is turned into one [`DetailRecord`]. The work is split
//! across the page's distinct regions: the primary image and metadata tags,
//! the stats block, the keyword list and the description block.

pub mod stats;

use dom_query::{Document, Selection};

use crate::date::normalize_date;
use crate::dom;
use crate::media::MediaType;
use crate::page;
use crate::patterns::{
    AVATAR_CLASS, AVATAR_IMAGE, DESCRIPTION_BLOCK, DOWNLOAD_TEXT, KEYWORD_CONTAINER_ID, KEYWORD_LINK,
    PAGE_LOGIN, PAGE_MATURE_BLOCKED, PAGE_SUBMISSION, PERMALINK_META, PREVIEW_META,
    PRIMARY_IMAGE_ID, RATING_META, STATS_BLOCK, STATS_LABEL, STATS_TERMINATOR,
    TITLE_BLOCK_USER_LINK, VIEW_ID,
};
use crate::record::{DetailRecord, ListSummaryBuilder};
use crate::{Error, Result};

pub use stats::{key_value_pairs, Stats, ValueNode, ValuePolicy};

/// Extract the detail record from a submission page.
pub fn extract_submission(html: &str) -> Result<DetailRecord> {
    let doc = dom::parse(html);
    extract_submission_document(&doc)
}

/// Extract the detail record from an already parsed submission page.
pub fn extract_submission_document(doc: &Document) -> Result<DetailRecord> {
    check_page(doc)?;

    let title = dom::by_id(doc, PRIMARY_IMAGE_ID)
        .ok_or_else(|| Error::missing("primary image"))
        .and_then(|img| dom::non_empty_attr(&img, "alt").ok_or_else(|| Error::missing("title")))?;
    let preview_img = meta_content(doc, PREVIEW_META, "preview image")?;
    let file_url = download_link(doc)?;

    let block = dom::find(doc, STATS_BLOCK).ok_or_else(|| Error::missing("stats block"))?;
    let mut stats = Stats::parse(&block, STATS_LABEL, STATS_TERMINATOR);

    let posted = stats.take_required("posted")?;
    let date_posted = normalize_date(&posted)?;
    let category = stats.take_required("category")?;
    let theme = stats.take_required("theme")?;
    let favorites = stats.take_count("favorites")?;
    let comments = stats.take_count("comments")?;
    let views = stats.take_count("views")?;
    let species = stats.take("species");
    let gender = stats.take("gender");
    let resolution = stats.take("resolution");

    let keywords = keywords(doc);
    let Description { text: description, lower } = description(doc)?;

    let rating = meta_content(doc, RATING_META, "rating")?;
    let permalink = meta_content(doc, PERMALINK_META, "permalink")?;
    let id = submission_id(&permalink)?;
    let username = dom::find(doc, TITLE_BLOCK_USER_LINK)
        .map(|link| dom::trimmed_text(&link))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::missing("username"))?;

    let media_type = MediaType::classify(&category);
    tracing::debug!(id, %category, %media_type, keywords = keywords.len(), "extracted submission");

    let summary = ListSummaryBuilder::new()
        .id(id)
        .title(title)
        .description(description)
        .username(username)
        .lower(lower)
        .rating(rating)
        .media_type(media_type.as_str())
        .preview_img(preview_img)
        .permalink(permalink)
        .build()?;

    Ok(DetailRecord {
        summary,
        file_url,
        date_posted,
        category,
        theme,
        species,
        gender,
        favorites,
        comments,
        views,
        resolution,
        keywords,
    })
}

/// Map the page token to the submission outcome.
fn check_page(doc: &Document) -> Result<()> {
    match page::page_id(doc).as_deref() {
        Some(PAGE_SUBMISSION) => Ok(()),
        Some(PAGE_MATURE_BLOCKED) => Err(Error::PermissionDenied),
        Some(PAGE_LOGIN) => Err(Error::AuthRequired),
        other => Err(Error::PageMismatch {
            expected: PAGE_SUBMISSION,
            actual: other.map(str::to_string),
        }),
    }
}

fn meta_content(doc: &Document, selector: &str, role: &'static str) -> Result<String> {
    dom::find(doc, selector)
        .and_then(|meta| dom::non_empty_attr(&meta, "content"))
        .ok_or_else(|| Error::missing(role))
}

/// Target of the link labelled "Download".
fn download_link(doc: &Document) -> Result<String> {
    doc.select("a[href]")
        .iter()
        .find(|link| dom::trimmed_text(link).eq_ignore_ascii_case(DOWNLOAD_TEXT))
        .and_then(|link| dom::non_empty_attr(&link, "href"))
        .ok_or_else(|| Error::missing("download link"))
}

/// Submission id from a `/view/<id>/` permalink.
fn submission_id(permalink: &str) -> Result<u64> {
    let digits = VIEW_ID
        .captures(permalink)
        .and_then(|c| c.get(1))
        .ok_or_else(|| Error::unparsable("submission id", format!("no id in '{permalink}'")))?;

    digits
        .as_str()
        .parse()
        .map_err(|e| Error::unparsable("submission id", e))
}

/// Keyword link texts in page order; empty when the page has no keyword list.
fn keywords(doc: &Document) -> Vec<String> {
    let Some(container) = dom::by_id(doc, KEYWORD_CONTAINER_ID) else {
        return Vec::new();
    };

    dom::query_all(&container, KEYWORD_LINK)
        .iter()
        .map(dom::trimmed_text)
        .filter(|k| !k.is_empty())
        .collect()
}

struct Description {
    text: String,
    lower: String,
}

/// Description text with the byline removed, plus the byline avatar's name.
fn description(doc: &Document) -> Result<Description> {
    let block = dom::find(doc, DESCRIPTION_BLOCK).ok_or_else(|| Error::missing("description block"))?;

    let avatar = dom::query_first(&block, AVATAR_IMAGE).ok_or_else(|| Error::missing("byline"))?;
    let lower = dom::non_empty_attr(&avatar, "alt").ok_or_else(|| Error::missing("byline name"))?;

    let copy = dom::detach(&block);
    let remaining = copy.select(DESCRIPTION_BLOCK);
    remove_byline(&remaining);

    Ok(Description {
        text: dom::trimmed_text(&remaining),
        lower,
    })
}

/// Remove the avatar together with the link wrapping it, if any.
fn remove_byline(block: &Selection) {
    for avatar in dom::by_class(block, AVATAR_CLASS) {
        match dom::enclosing(&avatar, "a") {
            Some(link) => link.remove(),
            None => avatar.remove(),
        }
    }
}
