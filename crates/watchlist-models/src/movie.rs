use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry on the watchlist
///
/// Serialized with camelCase keys, which is both the persisted document
/// format and the shape returned by the HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub genre: String,
    pub year: i32,
    pub director: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub poster_url: String,
    pub added_date: DateTime<Utc>,
    /// Absent until the first update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub watched: bool,
    /// Insertion counter assigned at creation; not renumbered on delete
    #[serde(default)]
    pub priority: u64,
}

/// The whole persisted document: `{ "movies": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieCollection {
    #[serde(default)]
    pub movies: Vec<Movie>,
}

impl MovieCollection {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.movies.iter().any(|m| m.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.movies.iter().position(|m| m.id == id)
    }
}

/// Placeholder values substituted when optional fields are omitted on create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDefaults {
    pub genre: String,
    pub director: String,
}

impl Default for MovieDefaults {
    fn default() -> Self {
        Self {
            genre: "Unspecified".to_string(),
            director: "Unknown".to_string(),
        }
    }
}
