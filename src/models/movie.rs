use serde::{Deserialize, Serialize};

/// A single row of the movie catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieEntry {
    /// Display title, used as the lookup key
    pub title: String,
    /// Poster image reference, if one was assigned
    #[serde(default)]
    pub poster_url: Option<String>,
}

impl MovieEntry {
    /// Creates a new catalog row
    pub fn new(title: impl Into<String>, poster_url: Option<&str>) -> Self {
        Self {
            title: title.into(),
            poster_url: poster_url.map(str::to_string),
        }
    }

    /// Poster reference, treating an empty string the same as a missing one
    pub fn poster(&self) -> Option<&str> {
        self.poster_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}
