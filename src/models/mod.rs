use serde::{Deserialize, Serialize};

pub mod movie;

pub use movie::MovieEntry;

/// Number of cards in every populated recommendation result
pub const RECOMMENDATION_COUNT: usize = 5;

/// A movie picked by the recommender whose poster has not been verified yet
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub title: String,
    pub poster_url: Option<String>,
}

impl From<&MovieEntry> for Candidate {
    fn from(movie: &MovieEntry) -> Self {
        Self {
            title: movie.title.clone(),
            poster_url: movie.poster().map(str::to_string),
        }
    }
}

/// A recommendation ready to render: title plus a poster the UI can display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub poster_url: String,
}

/// Response body for a recommendation query
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Title the recommendations were computed for, as supplied by the caller
    pub selected: String,
    pub recommendations: Vec<Card>,
}
