//! Poster image resolution
//!
//! A resolver turns a raw poster reference into the reference the UI should
//! render. Implementations never fail: anything that cannot be verified
//! collapses to the configured default poster.

use std::sync::Arc;

use crate::models::{Candidate, Card};

pub mod cached;
pub mod http;
pub mod passthrough;

pub use cached::CachedImageResolver;
pub use http::HttpImageResolver;
pub use passthrough::PassthroughImageResolver;

/// Capability for deciding which poster reference to display
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ImageResolver: Send + Sync {
    /// Returns `reference` when it is usable, otherwise the default poster
    ///
    /// An empty reference stands for a movie without a poster.
    async fn resolve(&self, reference: &str) -> String;

    /// Like `resolve`, but `None` when no verdict could be reached
    ///
    /// A rejection by the remote host is a verdict. A timeout or a connection
    /// failure is not, and asking again later may give a different answer.
    async fn verdict(&self, reference: &str) -> Option<String> {
        Some(self.resolve(reference).await)
    }

    /// Poster handed out whenever a reference is rejected
    fn default_reference(&self) -> String;

    /// Resolver name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Resolves the poster of every candidate, keeping the candidate order
///
/// Checks run concurrently, one task per card. A task that dies yields the
/// default poster for its card.
pub async fn resolve_posters(
    resolver: Arc<dyn ImageResolver>,
    candidates: Vec<Candidate>,
) -> Vec<Card> {
    let mut tasks = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let resolver = resolver.clone();
        let reference = candidate.poster_url.clone().unwrap_or_default();
        let task = tokio::spawn(async move { resolver.resolve(&reference).await });
        tasks.push((candidate.title, task));
    }

    let mut cards = Vec::with_capacity(tasks.len());
    for (title, task) in tasks {
        let poster_url = match task.await {
            Ok(poster_url) => poster_url,
            Err(e) => {
                tracing::error!(error = %e, title = %title, "Poster resolution task failed");
                resolver.default_reference()
            }
        };
        cards.push(Card { title, poster_url });
    }

    tracing::debug!(
        resolver = resolver.name(),
        cards = cards.len(),
        "Resolved posters"
    );

    cards
}
