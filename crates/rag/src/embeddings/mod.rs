//! Embedding generation.

pub mod provider;
pub mod providers;

pub use provider::{create_embedder, Embedder};
pub use providers::{MockEmbedder, OpenAiEmbedder};
