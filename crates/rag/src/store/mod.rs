//! Vector storage.

pub mod chroma;
pub mod memory;

use webrag_core::AppResult;

use crate::types::{RecordMetadata, StoredRecord};

pub use chroma::ChromaStore;
pub use memory::MemoryStore;

/// Trait for vector store backends.
///
/// One named collection backs the whole system; implementations must
/// guarantee it exists before the first insert.
#[async_trait::async_trait]
pub trait VectorStore: Send + Sync {
    /// Liveness check against the store endpoint.
    ///
    /// Run at startup; failure is fatal for the process.
    async fn heartbeat(&self) -> AppResult<()>;

    /// Insert or overwrite the record for its id.
    async fn upsert(&self, record: StoredRecord) -> AppResult<()>;

    /// Return the metadata of the `top_k` nearest records,
    /// best match first.
    async fn query(&self, embedding: &[f32], top_k: usize) -> AppResult<Vec<RecordMetadata>>;
}
