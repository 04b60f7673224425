//! CLI command handlers.

mod ask;
mod ingest;

pub use ask::AskCommand;
pub use ingest::IngestCommand;

use std::sync::Arc;
use webrag_core::{config::AppConfig, AppResult};
use webrag_rag::{create_embedder, ChromaStore, Embedder, VectorStore};

/// Build the embedder configured for this run.
///
/// The credential is resolved here once; credentialed providers fail
/// with `MissingCredential` before any network traffic.
pub(crate) fn build_embedder(config: &AppConfig) -> AppResult<Arc<dyn Embedder>> {
    let api_key = if config.embedding_provider == "openai" {
        Some(config.require_api_key()?)
    } else {
        None
    };
    create_embedder(
        &config.embedding_provider,
        None,
        &config.embedding_model,
        api_key,
    )
}

/// Connect to the vector store and verify it is alive.
///
/// A failed heartbeat is fatal; nothing is ingested or queried against
/// a store we cannot reach.
pub(crate) async fn connect_store(config: &AppConfig) -> AppResult<Arc<dyn VectorStore>> {
    let store = ChromaStore::new(&config.store_url, &config.collection);
    store.heartbeat().await?;
    Ok(Arc::new(store))
}
