//! Embedding provider trait and factory.

use std::sync::Arc;
use webrag_core::{AppError, AppResult};

/// Trait for embedding providers.
///
/// Providers return the model's vector unmodified; callers must
/// pre-chunk text that may exceed the model's input limits.
#[async_trait::async_trait]
pub trait Embedder: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "openai", "mock")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;
}

/// Create an embedding provider by name.
///
/// The credential requirement is enforced here, before any network
/// call: a credentialed provider with no key fails with
/// `MissingCredential` at construction.
pub fn create_embedder(
    provider: &str,
    endpoint: Option<&str>,
    model: &str,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn Embedder>> {
    match provider.to_lowercase().as_str() {
        "openai" => {
            let api_key = api_key.ok_or_else(|| {
                AppError::MissingCredential("openai embeddings require an API key".to_string())
            })?;
            let embedder = match endpoint {
                Some(url) => super::providers::OpenAiEmbedder::with_base_url(url, api_key, model),
                None => super::providers::OpenAiEmbedder::new(api_key, model),
            };
            Ok(Arc::new(embedder))
        }
        "mock" => Ok(Arc::new(super::providers::MockEmbedder::default())),
        _ => Err(AppError::Config(format!(
            "Unknown embedding provider: '{}'. Supported: openai, mock",
            provider
        ))),
    }
}
