use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    catalog::{CatalogStore, EntryId},
    models::{Candidate, Card, RECOMMENDATION_COUNT},
    services::posters::{resolve_posters, ImageResolver},
};

/// Picks similar movies for a selected title
///
/// Results favour the highest-similarity matches, then fill up from catalog
/// order, and as a last resort repeat earlier picks so that a non-empty
/// catalog always yields a full set of cards.
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<CatalogStore>,
    resolver: Arc<dyn ImageResolver>,
}

impl Recommender {
    pub fn new(catalog: Arc<CatalogStore>, resolver: Arc<dyn ImageResolver>) -> Self {
        Self { catalog, resolver }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Chooses the movies to recommend, without touching posters
    ///
    /// Returns exactly `RECOMMENDATION_COUNT` candidates unless no other title
    /// exists in the catalog, in which case the result is empty. An unknown
    /// title is not an error; it just has no ranked matches.
    pub fn recommend(&self, selected_title: &str) -> Vec<Candidate> {
        let ranked = rank(&self.catalog, selected_title);
        let ranked_count = ranked.len();
        let candidates = backfill(&self.catalog, selected_title, ranked);

        tracing::debug!(
            selected = %selected_title,
            ranked = ranked_count,
            returned = candidates.len(),
            "Selected recommendations"
        );

        candidates
    }

    /// Chooses the movies to recommend and resolves a displayable poster for each
    pub async fn recommend_cards(&self, selected_title: &str) -> Vec<Card> {
        let candidates = self.recommend(selected_title);
        resolve_posters(self.resolver.clone(), candidates).await
    }
}

/// Most similar entries to the selected title, best first
///
/// Ties keep catalog order. The selected entry itself is never included.
fn rank(catalog: &CatalogStore, selected_title: &str) -> Vec<Candidate> {
    let selected = match catalog.index_of(selected_title) {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!(error = %e, "No ranked matches for unknown title");
            return Vec::new();
        }
    };

    let scores = catalog.similarities(selected).unwrap_or_default();

    let mut ranked: Vec<(EntryId, f64)> = catalog
        .entries()
        .map(|(id, _)| id)
        .zip(scores.iter().copied())
        .collect();

    // Stable sort, so equal scores stay in catalog order.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    ranked
        .into_iter()
        .filter(|(id, _)| *id != selected)
        .take(RECOMMENDATION_COUNT)
        .filter_map(|(id, _)| catalog.entry(id))
        .map(|entry| Candidate::from(entry.movie()))
        .collect()
}

/// Pads the ranked candidates to exactly `RECOMMENDATION_COUNT`
fn backfill(
    catalog: &CatalogStore,
    selected_title: &str,
    mut candidates: Vec<Candidate>,
) -> Vec<Candidate> {
    let mut used: HashSet<String> = candidates.iter().map(|c| c.title.clone()).collect();
    used.insert(selected_title.to_string());

    if candidates.len() < RECOMMENDATION_COUNT {
        for (_, entry) in catalog.entries() {
            if candidates.len() >= RECOMMENDATION_COUNT {
                break;
            }
            if used.insert(entry.movie().title.clone()) {
                candidates.push(Candidate::from(entry.movie()));
            }
        }
    }

    // Too few distinct titles: cycle through what we have.
    if !candidates.is_empty() && candidates.len() < RECOMMENDATION_COUNT {
        tracing::debug!(
            selected = %selected_title,
            distinct = candidates.len(),
            "Catalog exhausted, repeating recommendations"
        );

        let distinct = candidates.len();
        let mut i = 0;
        while candidates.len() < RECOMMENDATION_COUNT {
            candidates.push(candidates[i % distinct].clone());
            i += 1;
        }
    }

    candidates.truncate(RECOMMENDATION_COUNT);
    candidates
}
