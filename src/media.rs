//! Coarse media kind of a submission, derived from its category label.

use serde::{Deserialize, Serialize};

/// Media kind of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Text,
    Audio,
}

impl MediaType {
    /// Classify a category label. Unknown and empty labels are images.
    #[must_use]
    pub fn classify(category: &str) -> Self {
        match category {
            "Story" | "Poetry" | "Prose" => Self::Text,
            "Music" => Self::Audio,
            _ => Self::Image,
        }
    }

    /// Label used in records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Text => "text",
            Self::Audio => "audio",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
