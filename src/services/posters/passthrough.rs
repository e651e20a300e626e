use crate::services::posters::ImageResolver;

/// Hands out stored posters without probing them
///
/// Used when poster verification is switched off, and wherever a resolver
/// must not touch the network.
#[derive(Debug, Clone)]
pub struct PassthroughImageResolver {
    default_reference: String,
}

impl PassthroughImageResolver {
    pub fn new(default_reference: impl Into<String>) -> Self {
        Self {
            default_reference: default_reference.into(),
        }
    }
}

#[async_trait::async_trait]
impl ImageResolver for PassthroughImageResolver {
    async fn resolve(&self, reference: &str) -> String {
        if reference.trim().is_empty() {
            self.default_reference.clone()
        } else {
            reference.to_string()
        }
    }

    fn default_reference(&self) -> String {
        self.default_reference.clone()
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}
