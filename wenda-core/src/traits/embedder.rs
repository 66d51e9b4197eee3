//! Embedding traits.
//!
//! Embedders turn text into dense vectors. In this slice they only embed
//! queries; document embeddings are supplied pre-computed.

use async_trait::async_trait;

use crate::Result;

/// Generates dense vector representations of text.
#[async_trait]
pub trait Embedder: Send + Sync + std::fmt::Debug {
    /// Embed a single piece of text.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedding model fails.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Dimensionality of the produced embeddings.
    fn dimension(&self) -> usize;

    /// Get a human-readable name for this embedder.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
