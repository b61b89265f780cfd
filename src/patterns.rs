//! Page tokens, class prefixes, CSS selectors and compiled regex patterns.
//!
//! Everything that encodes an assumption about the site's markup lives here,
//! so a layout change is fixed in one place. Regexes are compiled once on
//! first use via `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Page Tokens
// =============================================================================

/// Prefix of the `<body>` id carrying the page token.
pub const PAGE_ID_PREFIX: &str = "pageid-";

pub const PAGE_SEARCH: &str = "search";
pub const PAGE_BROWSE: &str = "browse";
/// The site spells it this way.
pub const PAGE_GALLERY: &str = "galery";
pub const PAGE_SUBMISSION: &str = "submission";
/// Shown instead of a submission when the content filter hides it.
pub const PAGE_MATURE_BLOCKED: &str = "matureimage-error";
/// Shown instead of a submission when a session is required.
pub const PAGE_LOGIN: &str = "login";

// =============================================================================
// Listing Markup
// =============================================================================

pub const SEARCH_CONTAINER: &str = "section.gallery";
pub const BROWSE_CONTAINER: &str = "#browse";
pub const GALLERY_CONTAINER: &str = "#page-galleryscraps";
/// Section holding the post cards inside a browse/gallery container.
pub const GALLERY_SECTION: &str = "section.gallery";

pub const POST_ENTRY: &str = "figure";
pub const POST_ID_PREFIX: &str = "sid-";
pub const RATING_PREFIX: &str = "r-";
pub const TYPE_PREFIX: &str = "t-";
pub const USER_PREFIX: &str = "u-";

pub const ENTRY_TITLE_LINK: &str = r#"figcaption a[href*="/view/"]"#;

// =============================================================================
// Submission Markup
// =============================================================================

/// Element id of the full-size image.
pub const PRIMARY_IMAGE_ID: &str = "submissionImg";
pub const PREVIEW_META: &str = r#"meta[property="og:image:secure_url"]"#;
pub const RATING_META: &str = r#"meta[name="twitter:data2"]"#;
pub const PERMALINK_META: &str = r#"meta[property="og:url"]"#;
pub const DOWNLOAD_TEXT: &str = "download";
pub const TITLE_BLOCK_USER_LINK: &str = r#".classic-submission-title a[href*="/user/"]"#;

pub const STATS_BLOCK: &str = ".stats-container";
pub const STATS_LABEL: &str = "b";
pub const STATS_TERMINATOR: &str = "br";

pub const KEYWORD_CONTAINER_ID: &str = "keywords";
pub const KEYWORD_LINK: &str = "a";

pub const DESCRIPTION_BLOCK: &str = ".submission-description";
pub const AVATAR_IMAGE: &str = "img.avatar";
pub const AVATAR_CLASS: &str = "avatar";

/// Attribute holding the exact value behind a relative display text.
pub const EXACT_VALUE_ATTR: &str = "title";

// =============================================================================
// Regex Patterns
// =============================================================================

/// Submission id inside a permalink such as `https://www.furaffinity.net/view/12345/`.
pub static VIEW_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/view/(\d+)").expect("VIEW_ID regex"));

/// Ordinal suffix on a day number (`1st`, `22nd`, `3rd`, `4th`).
pub static DAY_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)\b").expect("DAY_ORDINAL regex"));

/// Runs of whitespace, collapsed in date strings.
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));

/// Thousands separators in displayed counters.
pub static COUNT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]").expect("COUNT_SEPARATOR regex"));
