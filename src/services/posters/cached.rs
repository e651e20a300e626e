use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::services::posters::ImageResolver;

/// Memoizes another resolver's verdict per poster reference
///
/// Lives for the process lifetime alongside the catalog, so each distinct
/// poster is checked at most once in the common case. Two concurrent misses on
/// the same reference may both be checked. Lookups that reach no verdict, such as
/// timeouts, are not remembered and get retried on the next request.
pub struct CachedImageResolver<R> {
    inner: R,
    resolved: RwLock<HashMap<String, String>>,
}

impl<R: ImageResolver> CachedImageResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            resolved: RwLock::new(HashMap::new()),
        }
    }

    /// Number of references with a remembered verdict
    pub async fn len(&self) -> usize {
        self.resolved.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.resolved.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl<R: ImageResolver> ImageResolver for CachedImageResolver<R> {
    async fn resolve(&self, reference: &str) -> String {
        self.verdict(reference)
            .await
            .unwrap_or_else(|| self.inner.default_reference())
    }

    async fn verdict(&self, reference: &str) -> Option<String> {
        if reference.trim().is_empty() {
            return Some(self.inner.default_reference());
        }

        if let Some(hit) = self.resolved.read().await.get(reference) {
            tracing::debug!(url = %reference, "Poster cache hit");
            return Some(hit.clone());
        }

        let resolved = self.inner.verdict(reference).await?;
        self.resolved
            .write()
            .await
            .insert(reference.to_string(), resolved.clone());

        Some(resolved)
    }

    fn default_reference(&self) -> String {
        self.inner.default_reference()
    }

    fn name(&self) -> &'static str {
        "cached"
    }
}
