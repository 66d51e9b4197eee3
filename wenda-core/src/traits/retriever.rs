//! Retrieval traits for finding relevant documents.
//!
//! Retrievers select candidate documents for a query from a document store,
//! ranked best-first. Generators consume that ranking as-is.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::{
    Result,
    types::{Query, ScoredDocument},
};

/// Retrieves relevant documents for a query.
///
/// Implementations can use different strategies like embedding similarity,
/// keyword matching, or hybrid approaches.
///
/// # Examples
///
/// ```rust,no_run
/// use wenda_core::traits::Retriever;
/// use wenda_core::types::{Query, ScoredDocument};
/// use wenda_core::Result;
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct EmptyRetriever;
///
/// #[async_trait]
/// impl Retriever for EmptyRetriever {
///     async fn retrieve(&self, query: &Query) -> Result<Vec<ScoredDocument>> {
///         Ok(vec![])
///     }
/// }
/// ```
#[async_trait]
pub trait Retriever: Send + Sync + std::fmt::Debug {
    /// Retrieve documents for a query.
    ///
    /// # Returns
    ///
    /// Scored documents sorted by relevance (highest score first). The number
    /// of results must respect the `top_k` parameter in the query.
    ///
    /// # Errors
    ///
    /// Returns an error if retrieval fails due to store access issues or
    /// embedding failures.
    async fn retrieve(&self, query: &Query) -> Result<Vec<ScoredDocument>>;

    /// Get a human-readable name for this retriever.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Check if the retriever is healthy and ready to process queries.
    async fn health_check(&self) -> Result<()> {
        // Default implementation does nothing
        Ok(())
    }

    /// Get configuration information about this retriever.
    fn config(&self) -> HashMap<String, serde_json::Value> {
        // Default implementation returns empty config
        HashMap::new()
    }
}
