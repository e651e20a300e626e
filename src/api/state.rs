use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{catalog::CatalogStore, services::ImageResolver, services::Recommender};

/// Shared application state
///
/// Everything in here is immutable after startup, so handlers read it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    /// Creates the state around an already loaded catalog
    pub fn new(catalog: Arc<CatalogStore>, resolver: Arc<dyn ImageResolver>) -> Self {
        Self {
            recommender: Arc::new(Recommender::new(catalog, resolver)),
            loaded_at: Utc::now(),
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        self.recommender.catalog()
    }
}
