//! Chroma REST adapter.
//!
//! Speaks the Chroma v1 collection API over HTTP. The collection is
//! resolved lazily with get-or-create semantics and its id cached for
//! the lifetime of the adapter.

use serde::Deserialize;
use tokio::sync::OnceCell;
use webrag_core::{AppError, AppResult};

use crate::store::VectorStore;
use crate::types::{RecordMetadata, StoredRecord};

#[derive(Debug, Deserialize)]
struct CollectionResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    metadatas: Vec<Vec<Option<serde_json::Value>>>,
}

/// Vector store adapter for a Chroma-compatible server.
pub struct ChromaStore {
    base_url: String,
    collection: String,
    collection_id: OnceCell<String>,
    client: reqwest::Client,
}

impl ChromaStore {
    /// Create an adapter for one named collection.
    pub fn new(base_url: impl Into<String>, collection: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: collection.into(),
            collection_id: OnceCell::new(),
            client: reqwest::Client::new(),
        }
    }

    /// The configured collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Resolve the collection id, creating the collection if absent.
    async fn collection_id(&self) -> AppResult<&str> {
        let id = self
            .collection_id
            .get_or_try_init(|| async {
                let url = format!("{}/api/v1/collections", self.base_url);
                let response = self
                    .client
                    .post(&url)
                    .json(&serde_json::json!({
                        "name": self.collection,
                        "get_or_create": true,
                    }))
                    .send()
                    .await
                    .map_err(|e| {
                        AppError::StoreUnavailable(format!(
                            "cannot reach vector store at {}: {}",
                            self.base_url, e
                        ))
                    })?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(AppError::Transport(format!(
                        "collection create returned {}: {}",
                        status, body
                    )));
                }

                let parsed: CollectionResponse = response.json().await.map_err(|e| {
                    AppError::Transport(format!("failed to parse collection response: {}", e))
                })?;
                Ok::<String, AppError>(parsed.id)
            })
            .await?;
        Ok(id)
    }
}

#[async_trait::async_trait]
impl VectorStore for ChromaStore {
    async fn heartbeat(&self) -> AppResult<()> {
        let url = format!("{}/api/v1/heartbeat", self.base_url);
        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::StoreUnavailable(format!(
                "vector store at {} is unreachable: {}",
                self.base_url, e
            ))
        })?;

        if !response.status().is_success() {
            return Err(AppError::StoreUnavailable(format!(
                "vector store at {} returned {}",
                self.base_url,
                response.status()
            )));
        }

        tracing::debug!(url = %self.base_url, "Vector store heartbeat ok");
        Ok(())
    }

    async fn upsert(&self, record: StoredRecord) -> AppResult<()> {
        if record.metadata.url.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "record metadata must carry a non-empty url".to_string(),
            ));
        }

        let collection_id = self.collection_id().await?;
        let url = format!(
            "{}/api/v1/collections/{}/upsert",
            self.base_url, collection_id
        );

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "ids": [record.id],
                "embeddings": [record.embedding],
                "metadatas": [record.metadata],
            }))
            .send()
            .await
            .map_err(|e| {
                AppError::StoreUnavailable(format!(
                    "cannot reach vector store at {}: {}",
                    self.base_url, e
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Transport(format!(
                "upsert returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }

    async fn query(&self, embedding: &[f32], top_k: usize) -> AppResult<Vec<RecordMetadata>> {
        let collection_id = self.collection_id().await?;
        let url = format!(
            "{}/api/v1/collections/{}/query",
            self.base_url, collection_id
        );

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "query_embeddings": [embedding],
                "n_results": top_k,
                "include": ["metadatas"],
            }))
            .send()
            .await
            .map_err(|e| {
                AppError::StoreUnavailable(format!(
                    "cannot reach vector store at {}: {}",
                    self.base_url, e
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Transport(format!(
                "query returned {}: {}",
                status, body
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| AppError::Transport(format!("failed to parse query response: {}", e)))?;

        // One query embedding in, one result row out
        let row = parsed.metadatas.into_iter().next().unwrap_or_default();
        row.into_iter()
            .flatten()
            .map(|value| {
                serde_json::from_value::<RecordMetadata>(value).map_err(|e| {
                    AppError::Serialization(format!("malformed record metadata: {}", e))
                })
            })
            .collect()
    }
}
