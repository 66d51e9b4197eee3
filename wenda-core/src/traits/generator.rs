//! Answer generation traits.
//!
//! This module defines the interface implemented by generator nodes: components
//! that produce natural-language answers from a query and a ranked list of
//! supporting documents.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::{
    Result,
    types::{Document, GeneratedAnswers, GenerationParams},
};

/// Generates answers from a query and supporting documents.
///
/// This trait provides the interface for generator nodes. Implementations can
/// wrap local sequence-to-sequence models, retrieval-augmented models, or
/// hosted completion APIs.
///
/// Documents are assumed to be pre-ranked by relevance; implementations must
/// not reorder them.
///
/// # Examples
///
/// ```rust,no_run
/// use wenda_core::traits::AnswerGenerator;
/// use wenda_core::types::{Answer, Document, GeneratedAnswers, GenerationParams};
/// use wenda_core::Result;
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct EchoGenerator;
///
/// #[async_trait]
/// impl AnswerGenerator for EchoGenerator {
///     async fn predict(
///         &self,
///         query: &str,
///         documents: &[Document],
///         params: &GenerationParams,
///     ) -> Result<GeneratedAnswers> {
///         let answer = Answer::from_documents(query, documents);
///         Ok(GeneratedAnswers::new(query, vec![answer]))
///     }
/// }
/// ```
#[async_trait]
pub trait AnswerGenerator: Send + Sync + std::fmt::Debug {
    /// Generate answers for a query given ranked supporting documents.
    ///
    /// # Arguments
    ///
    /// * `query` - The user's question
    /// * `documents` - Candidate documents in relevance order (best first)
    /// * `params` - Generation parameters; `None` fields use the generator's defaults
    ///
    /// # Returns
    ///
    /// The generated answers with provenance links back to the documents the
    /// model actually saw.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails due to model issues, missing
    /// configuration (such as an unregistered input converter), or invalid
    /// input.
    async fn predict(
        &self,
        query: &str,
        documents: &[Document],
        params: &GenerationParams,
    ) -> Result<GeneratedAnswers>;

    /// Get a human-readable name for this generator.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Check if the generator is healthy and ready to produce answers.
    async fn health_check(&self) -> Result<()> {
        // Default implementation does nothing
        Ok(())
    }

    /// Get configuration information about this generator.
    fn config(&self) -> HashMap<String, serde_json::Value> {
        // Default implementation returns empty config
        HashMap::new()
    }
}
