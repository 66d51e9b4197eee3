//! # Wenda Core
//!
//! Core traits and types for the Wenda generative QA framework.
//!
//! This crate provides the foundational building blocks for generative
//! question answering over retrieved documents, including:
//!
//! - **Data structures**: Document, Query, Answer, and parameter types
//! - **Core traits**: `AnswerGenerator`, Retriever, `DocumentStore`, Embedder,
//!   `TokenCounter`, `CompletionClient`
//! - **Error handling**: Comprehensive error types with context
//!
//! ## Quick Start
//!
//! ```rust
//! use wenda_core::prelude::*;
//!
//! // Define a simple document
//! let doc = Document::builder()
//!     .content("This is a sample document")
//!     .metadata("source", "example.txt")
//!     .build();
//! ```
//!
//! ## Architecture
//!
//! The core architecture follows a modular design where each component
//! implements well-defined traits, allowing for easy composition and testing:
//!
//! - **Document stores** hold candidate documents
//! - **Retrievers** rank candidates for a query
//! - **Token counters** measure text against model token budgets
//! - **Answer generators** turn a query plus ranked documents into answers
//!   with provenance

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export commonly used types and traits
pub mod prelude;

// Core modules
pub mod error;
pub mod traits;
pub mod types;

// Re-export key types at crate root for convenience
pub use error::{Result, WendaError};
pub use types::{
    Answer, Document, GeneratedAnswers, GenerationParams, NodeParams, PipelineParams, Query,
    ScoredDocument, TokenUsage,
};

// Re-export traits for convenience
pub use traits::*;

/// Version information for the Wenda core library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the Wenda core library.
pub const NAME: &str = env!("CARGO_PKG_NAME");
