//! Core domain entities
//!
//! Projections of the remote resources. Wire shapes that need default
//! substitution (labels, comment actions) are decoded into `Raw*` types first
//! and projected through `From`.

use std::fmt;

use serde::Deserialize;

use crate::domain::DomainError;

/// Display name used for labels the board owner never named.
pub const UNNAMED_LABEL: &str = "Unnamed Label";

/// Display color used for labels without a color.
pub const NO_COLOR: &str = "No Color";

/// API key and token pair, appended to every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_token: String,
}

impl Credentials {
    /// Both values must be non-empty.
    pub fn new(
        api_key: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let api_key = api_key.into();
        let api_token = api_token.into();
        if api_key.is_empty() {
            return Err(DomainError::MissingCredential("api key"));
        }
        if api_token.is_empty() {
            return Err(DomainError::MissingCredential("api token"));
        }
        Ok(Self { api_key, api_token })
    }

    /// Authentication query parameters in request order.
    pub fn query_params(&self) -> [(String, String); 2] {
        [
            ("key".to_string(), self.api_key.clone()),
            ("token".to_string(), self.api_token.clone()),
        ]
    }
}

// Never print secrets, not even in debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("api_token", &"***")
            .finish()
    }
}

/// A board owned by the authenticated member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
}

/// A list (column) on a board.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct List {
    pub id: String,
    pub name: String,
}

/// A card, reduced to what the CLI displays.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(rename = "shortUrl")]
    pub short_url: String,
}

/// A board label with display defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// Label as returned by the API: name may be empty, color may be null.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLabel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl From<RawLabel> for Label {
    fn from(raw: RawLabel) -> Self {
        Self {
            id: raw.id,
            name: non_empty_or(raw.name, UNNAMED_LABEL),
            color: non_empty_or(raw.color, NO_COLOR),
        }
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

/// Only the `name` field of a single list.
#[derive(Debug, Clone, Deserialize)]
pub struct ListName {
    pub name: String,
}

/// Search endpoint envelope, restricted to card results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// A comment created on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Id of the comment action
    pub id: String,
    pub card_id: String,
    pub text: String,
}

/// Comment action as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommentAction {
    pub id: String,
    #[serde(default)]
    pub data: RawCommentData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCommentData {
    #[serde(default)]
    pub text: Option<String>,
}

impl RawCommentAction {
    /// Project onto the target card; falls back to the submitted text when the
    /// action payload omits it.
    pub fn into_comment(self, card_id: &str, submitted: &str) -> Comment {
        Comment {
            id: self.id,
            card_id: card_id.to_string(),
            text: self.data.text.unwrap_or_else(|| submitted.to_string()),
        }
    }
}

/// Reject empty identifiers before they end up as an empty path segment.
pub fn require_id<'a>(value: &'a str, what: &'static str) -> Result<&'a str, DomainError> {
    if value.trim().is_empty() {
        Err(DomainError::EmptyIdentifier(what))
    } else {
        Ok(value)
    }
}
