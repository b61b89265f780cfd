//! Caller-supplied request configuration.
//!
//! These structs describe which listing page to ask the site for. They carry
//! the site's defaults, deserialize from partial JSON, and are turned into
//! [`Request`](crate::request::Request) descriptors by [`crate::request`].
//!
//! # Example
//!
//! ```rust
//! use fa_extract::{PageSize, RatingFilter, SearchOptions};
//!
//! let options = SearchOptions {
//!     q: "fox".to_string(),
//!     perpage: PageSize::Large,
//!     ratings: RatingFilter {
//!         rating_mature: true,
//!         ..RatingFilter::default()
//!     },
//!     ..SearchOptions::default()
//! };
//! assert!(options.validate().is_ok());
//! ```

#![allow(clippy::struct_excessive_bools)]

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of posts per listing page. The site only accepts these sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl PageSize {
    #[must_use]
    pub fn count(self) -> u32 {
        match self {
            Self::Small => 24,
            Self::Medium => 48,
            Self::Large => 72,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            24 => Ok(Self::Small),
            48 => Ok(Self::Medium),
            72 => Ok(Self::Large),
            other => Err(Error::InvalidOptions(format!(
                "perpage must be 24, 48 or 72, got {other}"
            ))),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.count()
    }
}

/// How search terms are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Any,
    All,
    /// Sphinx-style query syntax.
    #[default]
    Extended,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchOrder {
    Relevancy,
    #[default]
    Date,
    Popularity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    #[default]
    Desc,
}

/// Age of the posts a search covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchRange {
    #[serde(rename = "day")]
    Day,
    #[serde(rename = "3days")]
    ThreeDays,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
    #[default]
    #[serde(rename = "all")]
    All,
}

macro_rules! wire_names {
    ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Value sent to the site.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }
    };
}

wire_names!(SearchMode { Any => "any", All => "all", Extended => "extended" });
wire_names!(SearchOrder { Relevancy => "relevancy", Date => "date", Popularity => "popularity" });
wire_names!(OrderDirection { Asc => "asc", Desc => "desc" });
wire_names!(SearchRange {
    Day => "day",
    ThreeDays => "3days",
    Week => "week",
    Month => "month",
    All => "all",
});

const fn yes() -> bool {
    true
}

const fn first_page() -> u32 {
    1
}

/// Content ratings to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingFilter {
    #[serde(default = "yes")]
    pub rating_general: bool,
    #[serde(default)]
    pub rating_mature: bool,
    #[serde(default)]
    pub rating_adult: bool,
}

impl Default for RatingFilter {
    fn default() -> Self {
        Self {
            rating_general: true,
            rating_mature: false,
            rating_adult: false,
        }
    }
}

impl RatingFilter {
    fn validate(self) -> Result<()> {
        if self.rating_general || self.rating_mature || self.rating_adult {
            Ok(())
        } else {
            Err(Error::InvalidOptions("at least one rating must be enabled".to_string()))
        }
    }
}

/// Search form configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(default)]
    pub mode: SearchMode,
    /// Query text; extended mode follows the site's search help.
    pub q: String,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub perpage: PageSize,
    #[serde(default)]
    pub order_by: SearchOrder,
    #[serde(default)]
    pub order_direction: OrderDirection,
    #[serde(default)]
    pub range: SearchRange,
    #[serde(flatten)]
    pub ratings: RatingFilter,
    #[serde(default = "yes")]
    pub type_art: bool,
    #[serde(default = "yes")]
    pub type_flash: bool,
    #[serde(default = "yes")]
    pub type_photo: bool,
    #[serde(default = "yes")]
    pub type_music: bool,
    #[serde(default = "yes")]
    pub type_story: bool,
    #[serde(default = "yes")]
    pub type_poetry: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            q: String::new(),
            page: 1,
            perpage: PageSize::default(),
            order_by: SearchOrder::default(),
            order_direction: OrderDirection::default(),
            range: SearchRange::default(),
            ratings: RatingFilter::default(),
            type_art: true,
            type_flash: true,
            type_photo: true,
            type_music: true,
            type_story: true,
            type_poetry: true,
        }
    }
}

impl SearchOptions {
    /// Search for `q` with default settings.
    #[must_use]
    pub fn query(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }

    /// Type flags in form order.
    #[must_use]
    pub fn type_flags(&self) -> [(&'static str, bool); 6] {
        [
            ("type-art", self.type_art),
            ("type-flash", self.type_flash),
            ("type-photo", self.type_photo),
            ("type-music", self.type_music),
            ("type-story", self.type_story),
            ("type-poetry", self.type_poetry),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        if self.q.trim().is_empty() {
            return Err(Error::InvalidOptions("search query must not be empty".to_string()));
        }
        validate_page(self.page)?;
        self.ratings.validate()?;
        if !self.type_flags().iter().any(|(_, on)| *on) {
            return Err(Error::InvalidOptions("at least one post type must be enabled".to_string()));
        }
        Ok(())
    }
}

/// Browse form configuration. Numeric fields are the site's own
/// category/type/species/gender codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseOptions {
    #[serde(default = "BrowseOptions::default_cat")]
    pub cat: u32,
    #[serde(default = "BrowseOptions::default_atype")]
    pub atype: u32,
    #[serde(default = "BrowseOptions::default_species")]
    pub species: u32,
    #[serde(default)]
    pub gender: u32,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub perpage: PageSize,
    #[serde(flatten)]
    pub ratings: RatingFilter,
}

impl BrowseOptions {
    const fn default_cat() -> u32 {
        1
    }

    const fn default_atype() -> u32 {
        1
    }

    /// "Any" species.
    const fn default_species() -> u32 {
        2006
    }

    pub fn validate(&self) -> Result<()> {
        validate_page(self.page)?;
        self.ratings.validate()
    }
}

impl Default for BrowseOptions {
    fn default() -> Self {
        Self {
            cat: Self::default_cat(),
            atype: Self::default_atype(),
            species: Self::default_species(),
            gender: 0,
            page: 1,
            perpage: PageSize::default(),
            ratings: RatingFilter::default(),
        }
    }
}

/// Which part of an artist's uploads to list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum GallerySection {
    #[default]
    Gallery,
    Scraps,
    Folder { id: u64, name: String },
}

/// Artist gallery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryOptions {
    pub artist: String,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub perpage: PageSize,
    #[serde(default)]
    pub section: GallerySection,
}

impl GalleryOptions {
    /// First page of an artist's main gallery.
    #[must_use]
    pub fn artist(artist: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            page: 1,
            perpage: PageSize::default(),
            section: GallerySection::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let artist = self.artist.trim();
        if artist.is_empty() {
            return Err(Error::InvalidOptions("artist name must not be empty".to_string()));
        }
        if artist.contains('/') {
            return Err(Error::InvalidOptions(format!("invalid artist name '{artist}'")));
        }
        validate_page(self.page)
    }
}

fn validate_page(page: u32) -> Result<()> {
    if page == 0 {
        return Err(Error::InvalidOptions("page numbers start at 1".to_string()));
    }
    Ok(())
}
