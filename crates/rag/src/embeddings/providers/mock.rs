//! Deterministic offline embedding provider.

use crate::embeddings::Embedder;
use webrag_core::AppResult;

const DEFAULT_DIMENSIONS: usize = 256;

/// Mock provider for testing and offline development.
///
/// Hashes each word of the input into a fixed number of dimensions and
/// normalizes the result. Not semantically meaningful, but identical
/// texts always map to identical unit vectors and overlapping texts to
/// nearby ones, which is enough for pipeline tests.
#[derive(Debug)]
pub struct MockEmbedder {
    dimensions: usize,
}

impl MockEmbedder {
    /// Create a mock provider with the given dimension count.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn hashed_vector(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];

        for word in text.to_lowercase().split_whitespace() {
            let hash = word
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(131).wrapping_add(b as u64));
            embedding[(hash as usize) % self.dimensions] += 1.0;
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut embedding {
                *v /= norm;
            }
        }

        embedding
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

#[async_trait::async_trait]
impl Embedder for MockEmbedder {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "hashed-words-v1"
    }

    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        Ok(self.hashed_vector(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dimensions_and_normalization() {
        let embedder = MockEmbedder::new(64);
        let vector = embedder.embed("hello world").await.unwrap();

        assert_eq!(vector.len(), 64);
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_deterministic() {
        let embedder = MockEmbedder::default();
        let a = embedder.embed("same input").await.unwrap();
        let b = embedder.embed("same input").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_different_texts_differ() {
        let embedder = MockEmbedder::default();
        let a = embedder.embed("completely different words here").await.unwrap();
        let b = embedder.embed("another unrelated sentence entirely").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let embedder = MockEmbedder::new(16);
        let vector = embedder.embed("").await.unwrap();
        assert!(vector.iter().all(|&x| x == 0.0));
    }
}
