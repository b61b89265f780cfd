//! Request descriptors for the site's listing and submission pages.
//!
//! Nothing here touches the network: each builder validates its options and
//! returns the method, URL and form body a client should send, together with
//! the page token the response is expected to carry. The response body is
//! then handed to the matching `extract_*` function unmodified.

use std::sync::LazyLock;

use url::Url;

use crate::gallery::ListingKind;
use crate::options::{BrowseOptions, GalleryOptions, GallerySection, SearchOptions};
use crate::patterns::PAGE_SUBMISSION;
use crate::Result;

/// Site root all request paths are resolved against.
pub const BASE_URL: &str = "https://www.furaffinity.net/";

#[allow(clippy::expect_used)]
static BASE: LazyLock<Url> = LazyLock::new(|| Url::parse(BASE_URL).expect("valid base url"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully described HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    /// Form fields for `POST` requests, in submission order.
    pub form: Vec<(String, String)>,
    /// Page token the response should carry.
    pub expected_page: &'static str,
}

impl Request {
    fn get(url: Url, expected_page: &'static str) -> Self {
        Self {
            method: Method::Get,
            url,
            form: Vec::new(),
            expected_page,
        }
    }

    fn post(url: Url, form: Vec<(String, String)>, expected_page: &'static str) -> Self {
        Self {
            method: Method::Post,
            url,
            form,
            expected_page,
        }
    }
}

/// Accumulates form fields; disabled flags are left out entirely.
#[derive(Default)]
struct Form(Vec<(String, String)>);

impl Form {
    fn field(mut self, name: &str, value: impl ToString) -> Self {
        self.0.push((name.to_string(), value.to_string()));
        self
    }

    fn flag(self, name: &str, enabled: bool, on: &str) -> Self {
        if enabled {
            self.field(name, on)
        } else {
            self
        }
    }
}

/// Base URL with the given path segments appended, keeping a trailing slash.
fn site_url(segments: &[&str]) -> Url {
    let mut url = BASE.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments).push("");
    }
    url
}

/// `POST /search/`.
pub fn search_request(options: &SearchOptions) -> Result<Request> {
    options.validate()?;

    let mut form = Form::default()
        .field("mode", options.mode.as_str())
        .field("q", options.q.trim())
        .field("page", options.page)
        .field("perpage", options.perpage.count())
        .field("order-by", options.order_by.as_str())
        .field("order-direction", options.order_direction.as_str())
        .field("range", options.range.as_str())
        .flag("rating-general", options.ratings.rating_general, "on")
        .flag("rating-mature", options.ratings.rating_mature, "on")
        .flag("rating-adult", options.ratings.rating_adult, "on");

    for (name, enabled) in options.type_flags() {
        form = form.flag(name, enabled, "on");
    }
    let form = form.field("do_search", "Search");

    Ok(Request::post(site_url(&["search"]), form.0, ListingKind::Search.page_token()))
}

/// `POST /browse/`.
pub fn browse_request(options: &BrowseOptions) -> Result<Request> {
    options.validate()?;

    let form = Form::default()
        .field("cat", options.cat)
        .field("atype", options.atype)
        .field("species", options.species)
        .field("gender", options.gender)
        .field("perpage", options.perpage.count())
        .field("page", options.page)
        .flag("rating_general", options.ratings.rating_general, "1")
        .flag("rating_mature", options.ratings.rating_mature, "1")
        .flag("rating_adult", options.ratings.rating_adult, "1")
        .field("go", "Update");

    Ok(Request::post(site_url(&["browse"]), form.0, ListingKind::Browse.page_token()))
}

/// `GET /gallery/<artist>/<page>/`, `/scraps/...` or a gallery folder.
pub fn gallery_request(options: &GalleryOptions) -> Result<Request> {
    options.validate()?;

    let artist = options.artist.trim();
    let page = options.page.to_string();
    let mut url = match &options.section {
        GallerySection::Gallery => site_url(&["gallery", artist, page.as_str()]),
        GallerySection::Scraps => site_url(&["scraps", artist, page.as_str()]),
        GallerySection::Folder { id, name } => {
            let folder = id.to_string();
            site_url(&["gallery", artist, "folder", folder.as_str(), name.as_str(), page.as_str()])
        }
    };
    url.query_pairs_mut()
        .append_pair("perpage", &options.perpage.count().to_string());

    Ok(Request::get(url, ListingKind::Gallery.page_token()))
}

/// `GET /view/<id>/`.
#[must_use]
pub fn submission_request(id: u64) -> Request {
    let id = id.to_string();
    Request::get(site_url(&["view", id.as_str()]), PAGE_SUBMISSION)
}
