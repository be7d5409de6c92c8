//! Post entities and the presence rules a submission must satisfy.

use serde::Serialize;
use time::OffsetDateTime;

/// A stored post. The slug is the identity; authors are referenced, never
/// owned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub slug: String,
    pub title: String,
    pub markdown: String,
    pub author_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Listing projection. Deliberately excludes the markdown body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub author_id: String,
}

/// A validated set of post fields, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub slug: String,
    pub title: String,
    pub markdown: String,
    pub author_id: String,
}

/// Raw form fields as submitted. Absent and empty are treated alike.
#[derive(Debug, Clone, Default)]
pub struct PostDraftInput {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub markdown: Option<String>,
    pub author_id: Option<String>,
}

pub const TITLE_REQUIRED: &str = "A title is required.";
pub const SLUG_REQUIRED: &str = "A slug is required.";
pub const MARKDOWN_REQUIRED: &str = "A markdown body is required.";
pub const AUTHOR_REQUIRED: &str = "An author id is required.";

/// One message per missing field, `None` for each field that was present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub title: Option<&'static str>,
    pub slug: Option<&'static str>,
    pub markdown: Option<&'static str>,
    pub author_id: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.markdown.is_none()
            && self.author_id.is_none()
    }
}

impl PostDraft {
    /// Presence-only validation: every field must be a non-empty string.
    /// No length limits, no slug-format checks, no markdown sanitization.
    pub fn validate(input: PostDraftInput) -> Result<Self, FieldErrors> {
        let errors = FieldErrors {
            title: require(&input.title, TITLE_REQUIRED),
            slug: require(&input.slug, SLUG_REQUIRED),
            markdown: require(&input.markdown, MARKDOWN_REQUIRED),
            author_id: require(&input.author_id, AUTHOR_REQUIRED),
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            title: input.title.unwrap_or_default(),
            slug: input.slug.unwrap_or_default(),
            markdown: input.markdown.unwrap_or_default(),
            author_id: input.author_id.unwrap_or_default(),
        })
    }
}

fn require(value: &Option<String>, message: &'static str) -> Option<&'static str> {
    match value {
        Some(value) if !value.is_empty() => None,
        _ => Some(message),
    }
}

impl PostRecord {
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            author_id: self.author_id.clone(),
        }
    }
}
