//! Record types produced by extraction.
//!
//! Records are built fresh for every call through [`ListSummaryBuilder`],
//! which checks that every required field was resolved and names the first
//! one that was not.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// A post as shown in search, browse and gallery listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummaryRecord {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub username: String,
    /// Auxiliary display-name field, kept verbatim.
    pub lower: String,
    /// Content rating label (e.g. `general`, `mature`, `adult`).
    pub rating: String,
    /// Media kind label (e.g. `image`, `text`, `audio`).
    #[serde(rename = "type")]
    pub media_type: String,
    pub preview_img: String,
    pub permalink: String,
}

/// Full metadata of a single submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    #[serde(flatten)]
    pub summary: ListSummaryRecord,
    pub file_url: String,
    pub date_posted: NaiveDateTime,
    pub category: String,
    pub theme: String,
    pub species: Option<String>,
    pub gender: Option<String>,
    pub favorites: u64,
    pub comments: u64,
    pub views: u64,
    pub resolution: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Accumulates list-summary fields from several sources, later writes winning.
#[derive(Debug, Clone, Default)]
pub struct ListSummaryBuilder {
    id: Option<u64>,
    title: Option<String>,
    description: Option<String>,
    username: Option<String>,
    lower: Option<String>,
    rating: Option<String>,
    media_type: Option<String>,
    preview_img: Option<String>,
    permalink: Option<String>,
}

impl ListSummaryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn lower(mut self, lower: impl Into<String>) -> Self {
        self.lower = Some(lower.into());
        self
    }

    #[must_use]
    pub fn rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    #[must_use]
    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    #[must_use]
    pub fn preview_img(mut self, url: impl Into<String>) -> Self {
        self.preview_img = Some(url.into());
        self
    }

    #[must_use]
    pub fn permalink(mut self, url: impl Into<String>) -> Self {
        self.permalink = Some(url.into());
        self
    }

    /// Overwrite fields from a sidecar property mapping.
    ///
    /// Unknown keys are ignored. Strings and numbers are accepted as values;
    /// anything else is a malformed document naming the key.
    pub fn merge(mut self, props: &serde_json::Map<String, Value>) -> Result<Self> {
        for (key, value) in props {
            let slot = match key.as_str() {
                "title" => &mut self.title,
                "description" => &mut self.description,
                "username" => &mut self.username,
                "lower" => &mut self.lower,
                "rating" => &mut self.rating,
                "type" => &mut self.media_type,
                "preview_img" => &mut self.preview_img,
                "permalink" => &mut self.permalink,
                _ => continue,
            };

            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(Error::unparsable(
                        format!("sidecar field '{key}'"),
                        format!("expected string, found {other}"),
                    ))
                }
            };
            *slot = Some(text);
        }
        Ok(self)
    }

    /// Validate and build the record.
    pub fn build(self) -> Result<ListSummaryRecord> {
        Ok(ListSummaryRecord {
            id: self.id.ok_or_else(|| Error::missing("id"))?,
            title: require(self.title, "title")?,
            description: require(self.description, "description")?,
            username: require(self.username, "username")?,
            lower: require(self.lower, "lower")?,
            rating: require(self.rating, "rating")?,
            media_type: require(self.media_type, "type")?,
            preview_img: require(self.preview_img, "preview_img")?,
            permalink: require(self.permalink, "permalink")?,
        })
    }
}

fn require(field: Option<String>, role: &'static str) -> Result<String> {
    field.ok_or_else(|| Error::missing(role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> ListSummaryBuilder {
        ListSummaryBuilder::new()
            .id(7)
            .title("Title")
            .description("Desc")
            .username("Someone")
            .lower("someone")
            .rating("general")
            .media_type("image")
            .preview_img("//t.example.net/7.jpg")
            .permalink("/view/7/")
    }

    #[test]
    fn test_build_complete() {
        let record = complete().build().expect("record");
        assert_eq!(record.id, 7);
        assert_eq!(record.media_type, "image");
    }

    #[test]
    fn test_build_names_missing_field() {
        let builder = ListSummaryBuilder::new().id(1).title("t");
        match builder.build() {
            Err(Error::MalformedDocument { role, .. }) => assert_eq!(role, "description"),
            other => panic!("expected MalformedDocument, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_overrides_and_ignores_unknown() {
        let props = json!({"title": "Foo", "lower": 42, "unrelated": [1, 2]});
        let record = complete()
            .merge(props.as_object().expect("object"))
            .expect("merge")
            .build()
            .expect("record");

        assert_eq!(record.title, "Foo");
        assert_eq!(record.lower, "42");
        assert_eq!(record.description, "Desc");
    }

    #[test]
    fn test_merge_rejects_structured_value() {
        let props = json!({"title": {"nested": true}});
        let result = complete().merge(props.as_object().expect("object"));
        assert!(matches!(result, Err(Error::MalformedDocument { .. })));
    }

    #[test]
    fn test_detail_serializes_flat_with_type_key() {
        let summary = complete().build().expect("record");
        let detail = DetailRecord {
            summary,
            file_url: "//d.example.net/7.png".to_string(),
            date_posted: chrono::NaiveDate::from_ymd_opt(2021, 5, 1)
                .and_then(|d| d.and_hms_opt(10, 0, 0))
                .expect("date"),
            category: "Artwork (Digital)".to_string(),
            theme: "General".to_string(),
            species: None,
            gender: None,
            favorites: 1,
            comments: 2,
            views: 3,
            resolution: None,
            keywords: Vec::new(),
        };

        let value = serde_json::to_value(&detail).expect("json");
        assert_eq!(value["type"], "image");
        assert_eq!(value["id"], 7);
        assert_eq!(value["date_posted"], "2021-05-01T10:00:00");
        assert!(value["species"].is_null());
    }
}
