//! Error types for fa-extract.
//!
//! Every extraction failure is classified so callers can tell restricted
//! content apart from a changed site layout or the wrong kind of page.

use std::borrow::Cow;

/// Error type for extraction and request-building operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document's page token is not the one the operation expected.
    #[error("unexpected page id '{}' (expected '{expected}')", actual.as_deref().unwrap_or("<none>"))]
    PageMismatch {
        /// Token the operation was looking for.
        expected: &'static str,
        /// Token found on the document, if any.
        actual: Option<String>,
    },

    /// The submission is hidden by the content-filter setting.
    #[error("content is blocked by the mature content filter")]
    PermissionDenied,

    /// The page requires a logged-in session.
    #[error("content requires an authenticated session")]
    AuthRequired,

    /// An element or attribute the extractor relies on is missing or unparsable.
    #[error("malformed document: {role}{}", detail.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    MalformedDocument {
        /// Role of the element that could not be resolved (e.g. "download link").
        role: Cow<'static, str>,
        /// Parser message when the element was present but unusable.
        detail: Option<String>,
    },

    /// A listing entry has no counterpart in the embedded sidecar payload.
    #[error("sidecar payload has no entry for post {0}")]
    SidecarKeyMissing(u64),

    /// Caller-supplied request options failed validation.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl Error {
    /// A required element was not found.
    pub(crate) fn missing(role: impl Into<Cow<'static, str>>) -> Self {
        Self::MalformedDocument {
            role: role.into(),
            detail: None,
        }
    }

    /// A required element was found but its value could not be used.
    pub(crate) fn unparsable(role: impl Into<Cow<'static, str>>, detail: impl ToString) -> Self {
        Self::MalformedDocument {
            role: role.into(),
            detail: Some(detail.to_string()),
        }
    }

    /// Stable machine-readable code for this error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::PageMismatch { .. } => "page_mismatch",
            Self::PermissionDenied => "permission_denied",
            Self::AuthRequired => "auth_required",
            Self::MalformedDocument { .. } => "malformed_document",
            Self::SidecarKeyMissing(_) => "sidecar_key_missing",
            Self::InvalidOptions(_) => "invalid_options",
        }
    }

    /// HTTP status a routing layer should answer with for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::PageMismatch { .. } => 502,
            Self::PermissionDenied => 403,
            Self::AuthRequired => 401,
            Self::MalformedDocument { .. } => 500,
            Self::SidecarKeyMissing(_) => 409,
            Self::InvalidOptions(_) => 400,
        }
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
