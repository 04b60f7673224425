//! In-process vector store.
//!
//! Cosine-similarity store used for offline development and pipeline
//! tests. Mirrors the adapter contract: upsert overwrites by id,
//! queries return metadata best match first.

use std::collections::HashMap;
use tokio::sync::RwLock;
use webrag_core::{AppError, AppResult};

use crate::store::VectorStore;
use crate::types::{RecordMetadata, StoredRecord};

/// In-memory vector store keyed by record id.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, StoredRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Ids currently present, unordered.
    pub async fn ids(&self) -> Vec<String> {
        self.records.read().await.keys().cloned().collect()
    }

    /// Fetch one record by id.
    pub async fn get(&self, id: &str) -> Option<StoredRecord> {
        self.records.read().await.get(id).cloned()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait::async_trait]
impl VectorStore for MemoryStore {
    async fn heartbeat(&self) -> AppResult<()> {
        Ok(())
    }

    async fn upsert(&self, record: StoredRecord) -> AppResult<()> {
        if record.metadata.url.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "record metadata must carry a non-empty url".to_string(),
            ));
        }
        self.records
            .write()
            .await
            .insert(record.id.clone(), record);
        Ok(())
    }

    async fn query(&self, embedding: &[f32], top_k: usize) -> AppResult<Vec<RecordMetadata>> {
        let records = self.records.read().await;

        let mut scored: Vec<(f32, RecordMetadata)> = records
            .values()
            .map(|r| (cosine_similarity(embedding, &r.embedding), r.metadata.clone()))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        Ok(scored.into_iter().map(|(_, metadata)| metadata).collect())
    }
}
