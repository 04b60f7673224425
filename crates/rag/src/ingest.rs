//! Page ingestion pipeline.
//!
//! Fetches a page, embeds a head record for the whole document, then
//! chunks the body and stores one record per chunk. A chunk that fails
//! to embed stops the chunk loop but does not fail the ingest; a store
//! write failure does.

use std::sync::Arc;

use webrag_core::AppResult;

use crate::chunker::chunk_text;
use crate::embeddings::Embedder;
use crate::extract::Extractor;
use crate::store::VectorStore;
use crate::types::{IngestReport, PageDocument, RecordMetadata, StoredRecord};

/// Orchestrates extract, chunk, embed and store for one URL at a time.
pub struct Ingestor {
    extractor: Extractor,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    chunk_size: usize,
}

impl Ingestor {
    pub fn new(
        extractor: Extractor,
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        chunk_size: usize,
    ) -> Self {
        Self {
            extractor,
            embedder,
            store,
            chunk_size,
        }
    }

    /// Fetch and ingest one URL.
    pub async fn ingest(&self, url: &str) -> AppResult<IngestReport> {
        let document = self.extractor.extract(url).await?;
        self.ingest_page(document).await
    }

    /// Ingest an already-extracted page.
    ///
    /// Stores a head record under the bare URL whose metadata carries
    /// the full body, then one record per body chunk under
    /// `{url}#chunk-{i}`. The head embedding failing aborts the whole
    /// ingest; a chunk embedding failing only stops the chunk loop.
    pub async fn ingest_page(&self, document: PageDocument) -> AppResult<IngestReport> {
        tracing::info!(url = %document.url, "Ingesting page");

        let head_embedding = self.embedder.embed(&document.head).await?;
        self.store
            .upsert(StoredRecord {
                id: document.url.clone(),
                embedding: head_embedding,
                metadata: RecordMetadata {
                    url: document.url.clone(),
                    head: document.head.clone(),
                    body: document.body.clone(),
                },
            })
            .await?;

        let chunks = chunk_text(&document.body, self.chunk_size)?;
        let chunks_total = chunks.len();
        let mut chunks_stored = 0;

        for (i, chunk) in chunks.into_iter().enumerate() {
            let embedding = match self.embedder.embed(&chunk).await {
                Ok(embedding) => embedding,
                Err(e) => {
                    tracing::warn!(
                        url = %document.url,
                        chunk = i,
                        error = %e,
                        "Chunk embedding failed, stopping chunk loop"
                    );
                    break;
                }
            };

            self.store
                .upsert(StoredRecord {
                    id: format!("{}#chunk-{}", document.url, i),
                    embedding,
                    metadata: RecordMetadata {
                        url: document.url.clone(),
                        head: document.head.clone(),
                        body: chunk,
                    },
                })
                .await?;
            chunks_stored += 1;
        }

        let report = IngestReport {
            url: document.url,
            chunks_total,
            chunks_stored,
            external_links: document.external_links.len(),
            internal_links: document.internal_links.len(),
        };
        tracing::info!(
            url = %report.url,
            chunks_total = report.chunks_total,
            chunks_stored = report.chunks_stored,
            "Ingest complete"
        );
        Ok(report)
    }
}
