//! Write models: card creation and partial card updates
//!
//! These types know how to encode themselves as query parameters. Anything
//! not explicitly set is left out of the request, so the remote value stays
//! unchanged.

/// A value that is either left alone or explicitly set.
///
/// Unlike `Option`, the intent is spelled out: `Unset` means "do not send",
/// `Set(false)` means "send false".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    #[default]
    Unset,
    Set(T),
}

impl<T> Field<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Field::Set(_))
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Set(v),
            None => Field::Unset,
        }
    }
}

/// Join label ids into the single comma-separated parameter value.
///
/// Returns `None` for an empty set so the parameter is omitted entirely.
pub fn join_label_ids(labels: &[String]) -> Option<String> {
    let ids: Vec<&str> = labels
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    if ids.is_empty() {
        None
    } else {
        Some(ids.join(","))
    }
}

/// A card to create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCard {
    pub list_id: String,
    pub name: String,
    pub label_ids: Vec<String>,
    /// Added as a separate comment after the card exists
    pub comment: Option<String>,
}

impl NewCard {
    pub fn new(list_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            list_id: list_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_ids = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Query parameters for `POST /cards`.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("idList".to_string(), self.list_id.clone()),
            ("name".to_string(), self.name.clone()),
        ];
        if let Some(labels) = join_label_ids(&self.label_ids) {
            params.push(("idLabels".to_string(), labels));
        }
        params
    }
}

/// A partial card update; only `Set` fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardUpdate {
    pub name: Field<String>,
    pub list_id: Field<String>,
    /// `closed` on the wire.
    pub archive: Field<bool>,
    pub comment: Field<String>,
}

impl CardUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Field::Set(name.into());
        self
    }

    pub fn list_id(mut self, list_id: impl Into<String>) -> Self {
        self.list_id = Field::Set(list_id.into());
        self
    }

    pub fn archive(mut self, archive: bool) -> Self {
        self.archive = Field::Set(archive);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Field::Set(comment.into());
        self
    }

    /// True when nothing at all would change.
    pub fn is_empty(&self) -> bool {
        !self.name.is_set()
            && !self.list_id.is_set()
            && !self.archive.is_set()
            && !self.comment.is_set()
    }

    /// Query parameters for `PUT /cards/{id}` (comment excluded).
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Field::Set(name) = &self.name {
            params.push(("name".to_string(), name.clone()));
        }
        if let Field::Set(list_id) = &self.list_id {
            params.push(("idList".to_string(), list_id.clone()));
        }
        if let Field::Set(closed) = self.archive {
            params.push(("closed".to_string(), closed.to_string()));
        }
        params
    }
}
