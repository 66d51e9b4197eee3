//! Core traits for the Wenda framework.
//!
//! These traits define the seams between the pipeline and its collaborators:
//! stores, embedders, retrievers, token counters, completion clients, and
//! generator nodes.

pub mod completion;
pub mod embedder;
pub mod generator;
pub mod retriever;
pub mod storage;
pub mod token;

// Re-export all traits for convenience
pub use completion::*;
pub use embedder::*;
pub use generator::*;
pub use retriever::*;
pub use storage::*;
pub use token::*;
