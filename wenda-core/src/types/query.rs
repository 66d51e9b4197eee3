//! Query types for retrieval and answer generation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents a search query with retrieval parameters.
///
/// A query contains the question text, an optional pre-computed embedding,
/// metadata filters, and the number of documents to retrieve.
///
/// # Examples
///
/// ```rust
/// use wenda_core::types::Query;
///
/// let query = Query::new("What is the capital of Germany?").with_top_k(3);
/// assert_eq!(query.top_k, 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Query {
    /// The query text to search for.
    pub text: String,

    /// Pre-computed query embedding (optional).
    ///
    /// If provided, this embedding will be used for vector search.
    /// If not provided, the retriever's embedder will generate it.
    pub embedding: Option<Vec<f32>>,

    /// Metadata filters to apply during search.
    ///
    /// Filters are applied as exact matches on document metadata.
    pub filters: HashMap<String, serde_json::Value>,

    /// Number of documents to retrieve.
    pub top_k: usize,

    /// Minimum similarity threshold for results.
    pub similarity_threshold: Option<f32>,
}

impl Query {
    /// Default number of documents to retrieve.
    pub const DEFAULT_TOP_K: usize = 10;

    /// Create a new query with the given text.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            embedding: None,
            filters: HashMap::new(),
            top_k: Self::DEFAULT_TOP_K,
            similarity_threshold: None,
        }
    }

    /// Set the number of documents to retrieve.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Add a metadata filter.
    pub fn with_filter<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Set the similarity threshold.
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = Some(threshold);
        self
    }

    /// Set the pre-computed embedding.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Check if the query has filters.
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Check if the query has a pre-computed embedding.
    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }
}
