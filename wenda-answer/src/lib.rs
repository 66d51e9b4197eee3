//! Answer generation and generative QA pipelines for the Wenda framework.
//!
//! This crate provides the generator nodes and pipeline glue for answering
//! questions from retrieved documents. It includes:
//!
//! - **Prompt building**: Token-budget-bounded prompt construction
//! - **Generators**: Sequence-to-sequence, retrieval-augmented, and hosted
//!   completion-API answer generators
//! - **Retrieval collaborators**: In-memory document store and embedding
//!   retriever
//! - **Pipelines**: Retriever-then-generator workflows with per-node
//!   parameter propagation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wenda_answer::prelude::*;
//! use wenda_core::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     retriever: Arc<dyn Retriever>,
//! #     generator: Arc<dyn AnswerGenerator>,
//! # ) -> Result<()> {
//! let pipeline = GenerativeQaPipeline::builder()
//!     .retriever(retriever)
//!     .generator(generator)
//!     .build()?;
//!
//! let output = pipeline
//!     .run("What is the capital of Germany?", &PipelineParams::new())
//!     .await?;
//! println!("Answer: {}", output.answers[0].answer);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Query → Retriever → Document Store
//!   ↓
//! Prompt builder (token budget) → Generator → LLM → Answers
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod hosted;
pub mod pipeline;
pub mod prompt;
pub mod rag;
pub mod seq2seq;
pub mod store;
pub mod token;

/// Re-export commonly used types and traits.
pub mod prelude {
    pub use crate::client::SiumaiCompletionClient;
    pub use crate::hosted::{
        HostedAnswerGenerator, HostedAnswerGeneratorBuilder, HostedAnswerGeneratorConfig,
    };
    pub use crate::pipeline::{
        GENERATOR_NODE, GenerativeQaPipeline, GenerativeQaPipelineBuilder,
        GenerativeQaPipelineConfig, PipelineOutput, RETRIEVER_NODE,
    };
    pub use crate::prompt::{FittedPrompt, PromptTemplate};
    pub use crate::rag::{RaGenerator, RaGeneratorConfig, RagModel};
    pub use crate::seq2seq::{
        BartLfqaConverter, InputConverter, Seq2SeqGenerator, Seq2SeqGeneratorBuilder,
        Seq2SeqGeneratorConfig, Seq2SeqModel,
    };
    pub use crate::store::{EmbeddingRetriever, InMemoryDocumentStore};
    pub use crate::token::{TiktokenCounter, WhitespaceTokenCounter};

    // Re-export core types
    pub use wenda_core::prelude::*;
}
