//! Convenient re-exports for common Wenda usage.
//!
//! ```rust
//! use wenda_core::prelude::*;
//!
//! let doc = Document::new("Berlin is the capital of Germany.");
//! let query = Query::new("What is the capital of Germany?");
//! ```

pub use crate::error::{Result, WendaError};
pub use crate::traits::{
    AnswerGenerator, CompletionClient, CompletionRequest, CompletionResponse, DocumentStore,
    Embedder, Retriever, TokenCounter,
};
pub use crate::types::{
    Answer, Document, GeneratedAnswers, GenerationParams, NodeParams, PipelineParams, Query,
    ScoredDocument, TokenUsage,
};
