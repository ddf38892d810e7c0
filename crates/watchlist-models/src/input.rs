use serde::{Deserialize, Serialize};

/// Request body for creating a movie
///
/// Only `title` is required; everything else falls back to defaults.
/// Fields the server owns (`id`, `addedDate`, `priority`, `watched`) are not
/// part of the schema and are dropped if a client sends them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
}

impl NewMovie {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Partial update: every provided field replaces the stored value
///
/// `id`, `addedDate` and `updatedDate` are never accepted from callers.
/// A JSON `null` counts as "not provided".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
    pub watched: Option<bool>,
    pub priority: Option<u64>,
}

impl MovieUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.genre.is_none()
            && self.year.is_none()
            && self.director.is_none()
            && self.rating.is_none()
            && self.poster_url.is_none()
            && self.watched.is_none()
            && self.priority.is_none()
    }
}
