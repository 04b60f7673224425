//! Webrag retrieval pipeline.
//!
//! Turns web pages into embedded records in a vector store and answers
//! questions from the nearest stored context. The pieces compose:
//! [`extract`] fetches and parses pages, [`chunker`] splits body text,
//! [`embeddings`] turns text into vectors, [`store`] persists them,
//! and [`ingest`] / [`answer`] orchestrate the two halves.

pub mod answer;
pub mod chunker;
pub mod embeddings;
pub mod extract;
pub mod ingest;
pub mod store;
pub mod types;

pub use answer::{Answer, Answerer, DEFAULT_TOP_K};
pub use chunker::chunk_text;
pub use embeddings::{create_embedder, Embedder, MockEmbedder, OpenAiEmbedder};
pub use extract::Extractor;
pub use ingest::Ingestor;
pub use store::{ChromaStore, MemoryStore, VectorStore};
pub use types::{IngestReport, PageDocument, RecordMetadata, StoredRecord};
