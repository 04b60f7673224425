//! Retrieval-augmented answering.
//!
//! Embeds the question, pulls the nearest stored records, and asks the
//! language model to answer from that context alone.

use std::sync::Arc;

use webrag_core::{AppError, AppResult};
use webrag_llm::{LlmClient, LlmRequest};

use crate::embeddings::Embedder;
use crate::store::VectorStore;

/// Default number of records retrieved per question.
pub const DEFAULT_TOP_K: usize = 1;

const SYSTEM_PROMPT: &str = "You are a question answering assistant. \
    Answer using only the provided context. If the context does not \
    contain the answer, say that you do not know.";

/// One answered question with its supporting sources.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Answer {
    /// The generated answer text
    pub text: String,

    /// URLs of the records that supplied the context
    pub sources: Vec<String>,
}

/// Answers questions against the ingested corpus.
pub struct Answerer {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    llm: Arc<dyn LlmClient>,
    model: String,
    top_k: usize,
}

impl Answerer {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        llm: Arc<dyn LlmClient>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            embedder,
            store,
            llm,
            model: model.into(),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Override how many records are retrieved per question.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Answer one question from stored context.
    ///
    /// Fails with `EmptyResult` when retrieval yields no usable
    /// context or the model returns a blank completion.
    pub async fn answer(&self, question: &str) -> AppResult<Answer> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::InvalidInput(
                "question must not be empty".to_string(),
            ));
        }

        let embedding = self.embedder.embed(question).await?;
        let matches = self.store.query(&embedding, self.top_k).await?;

        let mut contexts = Vec::new();
        let mut sources = Vec::new();
        for record in matches {
            if record.body.trim().is_empty() {
                continue;
            }
            contexts.push(record.body);
            if !sources.contains(&record.url) {
                sources.push(record.url);
            }
        }

        if contexts.is_empty() {
            return Err(AppError::EmptyResult(
                "no stored context matched the question".to_string(),
            ));
        }

        tracing::debug!(
            question = %question,
            sources = ?sources,
            "Answering from retrieved context"
        );

        let prompt = build_prompt(&contexts, &sources, question);
        let request = LlmRequest::new(prompt, &self.model).with_system(SYSTEM_PROMPT);
        let response = self.llm.complete(&request).await?;

        let text = response.content.trim().to_string();
        if text.is_empty() {
            return Err(AppError::EmptyResult(
                "model returned an empty answer".to_string(),
            ));
        }

        Ok(Answer { text, sources })
    }
}

fn build_prompt(contexts: &[String], sources: &[String], question: &str) -> String {
    format!(
        "Context:\n{}\n\nSources:\n{}\n\nQuestion: {}",
        contexts.join("\n\n---\n\n"),
        sources.join("\n"),
        question
    )
}
