//! Document type and related structures.
//!
//! Documents are the opaque units of content that retrievers rank and
//! generators consume as supporting evidence for an answer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Represents a candidate document for answer generation.
///
/// A document contains opaque content along with metadata about its source.
/// Identity is carried by `id`; answers link back to the documents that
/// supported them through these ids.
///
/// # Examples
///
/// ```rust
/// use wenda_core::types::Document;
///
/// let doc = Document::builder()
///     .content("Berlin is the capital of Germany.")
///     .metadata("source", "wiki/Berlin")
///     .build();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: Uuid,

    /// Raw content of the document.
    pub content: String,

    /// Document metadata (source, title, etc.).
    ///
    /// Common metadata keys include:
    /// - `source`: Original file path or URL
    /// - `title`: Document title
    /// - `author`: Document author
    pub metadata: HashMap<String, serde_json::Value>,

    /// Optional pre-computed embedding for the document.
    ///
    /// Required by retrieval-augmented generators and embedding retrievers;
    /// ignored by generators that only read content.
    pub embedding: Option<Vec<f32>>,
}

impl Document {
    /// Create a new document with the given content.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wenda_core::types::Document;
    ///
    /// let doc = Document::new("Hello, world!");
    /// assert_eq!(doc.content, "Hello, world!");
    /// assert!(doc.metadata.is_empty());
    /// assert!(doc.embedding.is_none());
    /// ```
    pub fn new<S: Into<String>>(content: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            metadata: HashMap::new(),
            embedding: None,
        }
    }

    /// Create a new document with a specific ID.
    pub fn with_id<S: Into<String>>(id: Uuid, content: S) -> Self {
        Self {
            id,
            content: content.into(),
            metadata: HashMap::new(),
            embedding: None,
        }
    }

    /// Create a builder for constructing documents with fluent API.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    /// Add or update metadata for this document.
    pub fn with_metadata<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Set the embedding for this document.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Get metadata value by key.
    pub fn get_metadata(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }

    /// Get metadata value as a string.
    pub fn get_metadata_string(&self, key: &str) -> Option<String> {
        self.metadata.get(key)?.as_str().map(String::from)
    }

    /// Check if the document has an embedding.
    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }

    /// Get the document size in characters.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A document paired with a retrieval relevance score.
///
/// Retrievers return these sorted best-first; generators treat the order
/// as the ranking when fitting documents into a token budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredDocument {
    /// The retrieved document.
    pub document: Document,

    /// Relevance score assigned by the retriever (higher is better).
    pub score: f32,
}

impl ScoredDocument {
    /// Create a new scored document.
    pub fn new(document: Document, score: f32) -> Self {
        Self { document, score }
    }

    /// Get the document ID.
    pub fn id(&self) -> Uuid {
        self.document.id
    }

    /// Get the document content.
    pub fn content(&self) -> &str {
        &self.document.content
    }
}

/// Builder for creating documents with a fluent API.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    id: Option<Uuid>,
    content: Option<String>,
    metadata: HashMap<String, serde_json::Value>,
    embedding: Option<Vec<f32>>,
}

impl DocumentBuilder {
    /// Create a new document builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document ID.
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the document content.
    pub fn content<S: Into<String>>(mut self, content: S) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Add metadata to the document.
    pub fn metadata<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Set the document embedding.
    pub fn embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Build the document.
    ///
    /// # Panics
    ///
    /// Panics if content is not set.
    pub fn build(self) -> Document {
        Document {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            content: self.content.expect("Document content is required"),
            metadata: self.metadata,
            embedding: self.embedding,
        }
    }
}
