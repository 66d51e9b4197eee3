//! Completion client implementations.
//!
//! This module adapts the unified Siumai LLM client to the
//! [`CompletionClient`] boundary used by the hosted answer generator.

use async_trait::async_trait;
use tracing::debug;

use wenda_core::{
    Result, WendaError,
    traits::{CompletionClient, CompletionRequest, CompletionResponse},
    types::TokenUsage,
};

use siumai::prelude::*;

/// A completion client backed by the Siumai unified LLM interface.
///
/// Siumai's chat interface returns one message per call, so `n` requested
/// completions become `n` sequential chat turns with summed usage. Sampling
/// parameters are configured on the Siumai client at construction time.
///
/// # Examples
///
/// ```rust,no_run
/// use wenda_answer::client::SiumaiCompletionClient;
/// use siumai::prelude::*;
///
/// # async fn example() -> wenda_core::Result<()> {
/// let siumai_client = Siumai::builder()
///     .openai()
///     .build()
///     .await
///     .map_err(wenda_core::WendaError::external)?;
///
/// let client = SiumaiCompletionClient::new(siumai_client);
/// # Ok(())
/// # }
/// ```
pub struct SiumaiCompletionClient {
    /// Siumai client for LLM communication.
    client: Siumai,
}

impl std::fmt::Debug for SiumaiCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiumaiCompletionClient")
            .finish_non_exhaustive()
    }
}

impl SiumaiCompletionClient {
    /// Create a new client wrapping a Siumai instance.
    pub fn new(client: Siumai) -> Self {
        Self { client }
    }

    /// Extract token usage from a Siumai response.
    fn extract_token_usage(response: &ChatResponse) -> Option<TokenUsage> {
        response.usage.as_ref().map(|usage| TokenUsage {
            prompt_tokens: usage.prompt_tokens as usize,
            completion_tokens: usage.completion_tokens as usize,
            total_tokens: usage.total_tokens as usize,
        })
    }
}

#[async_trait]
impl CompletionClient for SiumaiCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let mut texts = Vec::with_capacity(request.n);
        let mut usage: Option<TokenUsage> = None;
        let mut model = None;

        for i in 0..request.n.max(1) {
            debug!(completion = i, model = %request.model, "Requesting completion");

            let messages = vec![ChatMessage::user(request.prompt.as_str()).build()];
            let response = self
                .client
                .chat(messages)
                .await
                .map_err(|e| WendaError::Generation {
                    message: format!("Siumai completion failed: {e}"),
                })?;

            let content = match &response.content {
                siumai::MessageContent::Text(text) => text.clone(),
                _ => {
                    return Err(WendaError::Generation {
                        message: "Unsupported content type in LLM response".to_string(),
                    });
                }
            };
            texts.push(content);

            if let Some(turn_usage) = Self::extract_token_usage(&response) {
                usage = Some(match usage {
                    Some(total) => TokenUsage {
                        prompt_tokens: total.prompt_tokens + turn_usage.prompt_tokens,
                        completion_tokens: total.completion_tokens + turn_usage.completion_tokens,
                        total_tokens: total.total_tokens + turn_usage.total_tokens,
                    },
                    None => turn_usage,
                });
            }
            if model.is_none() {
                model.clone_from(&response.model);
            }
        }

        Ok(CompletionResponse {
            texts,
            model,
            usage,
        })
    }

    fn name(&self) -> &'static str {
        "SiumaiCompletionClient"
    }
}
