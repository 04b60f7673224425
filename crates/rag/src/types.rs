//! Pipeline type definitions.

use serde::{Deserialize, Serialize};

/// Structural representation of one fetched web page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDocument {
    /// Source URL, used as the primary record id
    pub url: String,

    /// Inner markup of the `<head>` element (empty if absent)
    pub head: String,

    /// Inner markup of the `<body>` element (empty if absent)
    pub body: String,

    /// Deduplicated hrefs pointing off-site (absolute http/https)
    pub external_links: Vec<String>,

    /// Deduplicated hrefs within the site (relative or other schemes)
    pub internal_links: Vec<String>,
}

/// The concrete metadata schema stored alongside every embedding.
///
/// Validated at the store-adapter boundary instead of trusting untyped
/// records coming back from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Source URL of the record
    pub url: String,

    /// Head markup of the source page
    #[serde(default)]
    pub head: String,

    /// Body text: the full body for head records, one chunk otherwise
    #[serde(default)]
    pub body: String,
}

/// One (id, embedding, metadata) tuple bound for the vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Record id: the bare URL for the head record,
    /// `{url}#chunk-{i}` for body chunks
    pub id: String,

    /// Embedding vector
    pub embedding: Vec<f32>,

    /// Typed metadata payload
    pub metadata: RecordMetadata,
}

/// Summary of a single ingest operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    /// URL that was ingested
    pub url: String,

    /// Number of body chunks produced by the chunker
    pub chunks_total: usize,

    /// Number of chunks actually embedded and stored
    pub chunks_stored: usize,

    /// Count of external links discovered on the page
    pub external_links: usize,

    /// Count of internal links discovered on the page
    pub internal_links: usize,
}
