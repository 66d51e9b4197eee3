//! Core data types for the Wenda framework.
//!
//! This module contains the fundamental data structures used throughout
//! generative QA pipelines: documents, queries, answers, and parameters.

pub mod answer;
pub mod document;
pub mod params;
pub mod query;

// Re-export all types for convenience
pub use answer::*;
pub use document::*;
pub use params::*;
pub use query::*;
