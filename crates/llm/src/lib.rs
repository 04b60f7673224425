//! Generation model integration for webrag.
//!
//! Provider-agnostic abstraction for calling Large Language Models
//! through a unified trait-based interface.
//!
//! # Providers
//! - **OpenAI-compatible**: `/v1/chat/completions` endpoints (credentialed)
//! - **Ollama**: local LLM runtime, no credential required

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse};
pub use factory::create_client;
pub use providers::{OllamaClient, OpenAiClient};
