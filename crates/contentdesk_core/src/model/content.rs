//! Content record model and input validation.
//!
//! # Responsibility
//! - Define the canonical record persisted in the durable slot.
//! - Turn raw form input into a validated `ContentInput`.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused.
//! - `title` and `body` are stored trimmed and non-empty.
//! - `updated_at` equals `created_at` until the first edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier of one content record.
///
/// Serialized as a bare string so the slot layout stays `{"id": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ContentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ContentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ContentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Category label selected from the form's type control.
///
/// Serialized lowercase; deserialized through `FromStr`, so stored labels
/// follow the same case-insensitive rules as form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ContentType {
    Article,
    Blog,
    Note,
    Page,
}

impl ContentType {
    /// All selectable types in selector order.
    pub const ALL: [ContentType; 4] = [
        ContentType::Article,
        ContentType::Blog,
        ContentType::Note,
        ContentType::Page,
    ];

    /// Stable wire label, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Blog => "blog",
            Self::Note => "note",
            Self::Page => "page",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ContentValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ContentValidationError::UnknownType(value.trim().to_string()))
    }
}

impl TryFrom<String> for ContentType {
    type Error = ContentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Validation failure for user-provided content fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentValidationError {
    EmptyTitle,
    MissingType,
    UnknownType(String),
    EmptyBody,
}

impl Display for ContentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be blank"),
            Self::MissingType => write!(f, "content type must be selected"),
            Self::UnknownType(value) => write!(f, "unknown content type `{value}`"),
            Self::EmptyBody => write!(f, "body must not be blank"),
        }
    }
}

impl Error for ContentValidationError {}

/// Validated title/type/body triple accepted by store writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentInput {
    pub title: String,
    pub kind: ContentType,
    pub body: String,
}

impl ContentInput {
    /// Validates field values coming from the form, trimming title and body.
    ///
    /// # Errors
    /// - Returns the first failing field in form order (title, type, body).
    pub fn new(
        title: &str,
        kind: Option<ContentType>,
        body: &str,
    ) -> Result<Self, ContentValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ContentValidationError::EmptyTitle);
        }
        let kind = kind.ok_or(ContentValidationError::MissingType)?;
        let body = body.trim();
        if body.is_empty() {
            return Err(ContentValidationError::EmptyBody);
        }

        Ok(Self {
            title: title.to_string(),
            kind,
            body: body.to_string(),
        })
    }

    /// Validates raw text values; `kind` is the selector label.
    ///
    /// `None` or a blank label means no type was selected. An unknown label
    /// is reported before any other field.
    pub fn parse(
        title: &str,
        kind: Option<&str>,
        body: &str,
    ) -> Result<Self, ContentValidationError> {
        let kind = match kind.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<ContentType>()?),
        };
        Self::new(title, kind, body)
    }
}

/// One persisted content entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub id: ContentId,
    pub title: String,
    /// Serialized as `type` to match the slot schema.
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentRecord {
    /// Creates a record with a fresh id and `created_at == updated_at == now`.
    pub fn new(input: ContentInput, now: DateTime<Utc>) -> Self {
        Self {
            id: ContentId::generate(),
            title: input.title,
            kind: input.kind,
            body: input.body,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces editable fields in place; identity and `created_at` stay.
    pub fn apply_edit(&mut self, input: ContentInput, updated_at: DateTime<Utc>) {
        self.title = input.title;
        self.kind = input.kind;
        self.body = input.body;
        self.updated_at = updated_at;
    }

    /// Returns whether the record has been edited since creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at != self.created_at
    }
}
