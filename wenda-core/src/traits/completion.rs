//! Hosted completion API boundary.
//!
//! The hosted answer generator talks to a large-language-model service through
//! this trait: a prompt, model name, and sampling parameters go out; generated
//! texts come back. No wire format is owned on this side of the boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Result, types::TokenUsage};

/// A single completion request to a hosted LLM.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRequest {
    /// The fully assembled prompt.
    pub prompt: String,

    /// Model identifier understood by the provider.
    pub model: String,

    /// Number of completions to generate.
    pub n: usize,

    /// Maximum tokens per completion.
    pub max_tokens: usize,

    /// Sampling temperature.
    pub temperature: f32,

    /// Nucleus sampling probability mass.
    pub top_p: Option<f32>,

    /// Stop sequences that end generation.
    pub stop: Option<Vec<String>>,
}

impl CompletionRequest {
    /// Create a request with a single completion and neutral sampling.
    pub fn new<P: Into<String>, M: Into<String>>(prompt: P, model: M) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            n: 1,
            max_tokens: 256,
            temperature: 0.7,
            top_p: None,
            stop: None,
        }
    }

    /// Set the number of completions.
    pub fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Set the completion token allowance.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the stop sequences.
    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }
}

/// Response from a completion request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionResponse {
    /// Generated texts, one per requested completion.
    pub texts: Vec<String>,

    /// Model that served the request (may differ from the requested one).
    pub model: Option<String>,

    /// Token usage reported by the provider, if any.
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a response from generated texts.
    pub fn new(texts: Vec<String>) -> Self {
        Self {
            texts,
            model: None,
            usage: None,
        }
    }
}

/// Client for a hosted LLM completion API.
#[async_trait]
pub trait CompletionClient: Send + Sync + std::fmt::Debug {
    /// Execute a completion request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// authentication, rate limiting, or an invalid response.
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse>;

    /// Get a human-readable name for this client.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
