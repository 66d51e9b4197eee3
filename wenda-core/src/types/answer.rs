//! Answer types produced by generator nodes.
//!
//! An answer pairs generated text with provenance links back to the source
//! documents that were available to the model when it was produced.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::types::Document;

/// Metadata key under which answers carry the metadata of their source documents.
pub const DOC_METAS_KEY: &str = "doc_metas";

/// A single generated answer with provenance.
///
/// # Examples
///
/// ```rust
/// use wenda_core::types::{Answer, Document};
///
/// let doc = Document::new("Berlin is the capital of Germany.");
/// let answer = Answer::from_documents("Berlin.", std::slice::from_ref(&doc));
/// assert_eq!(answer.document_ids, vec![doc.id]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    /// The generated answer text.
    pub answer: String,

    /// Optional confidence or model score for this answer.
    pub score: Option<f32>,

    /// IDs of the documents the model saw, in the order they were presented.
    pub document_ids: Vec<Uuid>,

    /// Additional answer metadata.
    ///
    /// The metadata of the source documents is stored under
    /// [`DOC_METAS_KEY`], aligned with `document_ids`.
    pub meta: HashMap<String, serde_json::Value>,
}

impl Answer {
    /// Create a new answer with no provenance.
    pub fn new<S: Into<String>>(answer: S) -> Self {
        Self {
            answer: answer.into(),
            score: None,
            document_ids: Vec::new(),
            meta: HashMap::new(),
        }
    }

    /// Create an answer linked to the documents it was generated from.
    ///
    /// Records each document's id and metadata, preserving the given order.
    pub fn from_documents<S: Into<String>>(answer: S, documents: &[Document]) -> Self {
        let document_ids = documents.iter().map(|d| d.id).collect();
        let doc_metas: Vec<serde_json::Value> = documents
            .iter()
            .map(|d| serde_json::to_value(&d.metadata).unwrap_or(serde_json::Value::Null))
            .collect();

        let mut meta = HashMap::new();
        meta.insert(
            DOC_METAS_KEY.to_string(),
            serde_json::Value::Array(doc_metas),
        );

        Self {
            answer: answer.into(),
            score: None,
            document_ids,
            meta,
        }
    }

    /// Set the score for this answer.
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    /// Add or update answer metadata.
    pub fn with_meta<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Get the source document metadata recorded for this answer, if any.
    pub fn doc_metas(&self) -> Option<&Vec<serde_json::Value>> {
        match self.meta.get(DOC_METAS_KEY) {
            Some(serde_json::Value::Array(metas)) => Some(metas),
            _ => None,
        }
    }
}

/// The full prediction returned by a generator node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedAnswers {
    /// The query the answers respond to.
    pub query: String,

    /// Generated answers, best first.
    pub answers: Vec<Answer>,

    /// Metadata about the prediction (model name, prompt length, etc.).
    pub meta: HashMap<String, serde_json::Value>,
}

impl GeneratedAnswers {
    /// Create a new prediction for a query.
    pub fn new<S: Into<String>>(query: S, answers: Vec<Answer>) -> Self {
        Self {
            query: query.into(),
            answers,
            meta: HashMap::new(),
        }
    }

    /// Add or update prediction metadata.
    pub fn with_meta<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Number of answers produced.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Check whether no answers were produced.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Token usage reported by a hosted completion API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt.
    pub prompt_tokens: usize,

    /// Tokens generated in the completion.
    pub completion_tokens: usize,

    /// Total tokens for the request.
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new usage record; the total is derived.
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}
