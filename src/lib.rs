//! # fa-extract
//!
//! Typed record extraction for FurAffinity pages.
//!
//! The crate turns fetched listing pages (search, browse, artist gallery)
//! into ordered [`ListSummaryRecord`]s and submission pages into a single
//! [`DetailRecord`]. Fetching is left to the caller; [`request`] describes
//! what to fetch.
//!
//! ## Quick Start
//!
//! ```rust
//! use fa_extract::{extract_browse, Error};
//!
//! let html = r#"<html><body id="pageid-search"></body></html>"#;
//!
//! match extract_browse(html) {
//!     Err(Error::PageMismatch { actual, .. }) => assert_eq!(actual.as_deref(), Some("search")),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```
//!
//! ## Errors
//!
//! Every failure is classified: a wrong page type ([`Error::PageMismatch`]),
//! restricted content ([`Error::PermissionDenied`], [`Error::AuthRequired`]),
//! or a layout the extractors no longer understand
//! ([`Error::MalformedDocument`], [`Error::SidecarKeyMissing`]). Nothing is
//! silently defaulted and no partial results are returned.

mod date;
mod error;
mod media;
mod options;
mod patterns;
mod record;

/// Tree query layer over `dom_query`.
pub mod dom;

/// Page token identification.
pub mod page;

/// Embedded sidecar payload resolution.
pub mod sidecar;

/// Listing page extraction.
pub mod gallery;

/// Submission page extraction.
pub mod submission;

/// Request descriptors for the pages the extractors understand.
pub mod request;

/// Response body charset handling.
pub mod encoding;

// Public API - re-exports
pub use date::normalize_date;
pub use error::{Error, Result};
pub use gallery::{extract_listing, ListingKind};
pub use media::MediaType;
pub use options::{
    BrowseOptions, GalleryOptions, GallerySection, OrderDirection, PageSize, RatingFilter,
    SearchMode, SearchOptions, SearchOrder, SearchRange,
};
pub use record::{DetailRecord, ListSummaryBuilder, ListSummaryRecord};
pub use submission::extract_submission;

/// Extracts records from a search results page.
pub fn extract_search(html: &str) -> Result<Vec<ListSummaryRecord>> {
    extract_listing(html, ListingKind::Search)
}

/// Extracts records from a browse page.
pub fn extract_browse(html: &str) -> Result<Vec<ListSummaryRecord>> {
    extract_listing(html, ListingKind::Browse)
}

/// Extracts records from an artist gallery, scraps or folder page.
pub fn extract_gallery(html: &str) -> Result<Vec<ListSummaryRecord>> {
    extract_listing(html, ListingKind::Gallery)
}

/// Extracts listing records from a raw response body.
///
/// The body is decoded using the charset the page declares (UTF-8 when it
/// declares none) before extraction.
///
/// # Example
///
/// ```rust
/// use fa_extract::{extract_listing_bytes, ListingKind};
///
/// let body = b"<html><head><meta charset=\"ISO-8859-1\"></head><body id=\"pageid-browse\"></body></html>";
/// let result = extract_listing_bytes(body, ListingKind::Browse);
/// assert!(result.is_err()); // no #browse container on this page
/// ```
pub fn extract_listing_bytes(body: &[u8], kind: ListingKind) -> Result<Vec<ListSummaryRecord>> {
    let html = encoding::decode_body(body);
    extract_listing(&html, kind)
}

/// Extracts the detail record from a raw submission response body.
pub fn extract_submission_bytes(body: &[u8]) -> Result<DetailRecord> {
    let html = encoding::decode_body(body);
    extract_submission(&html)
}
