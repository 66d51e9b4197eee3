//! Hosted-LLM answer generation.
//!
//! This generator sends a prompt to a hosted completion API and turns the
//! returned completions into answers. The prompt is assembled by the bounded
//! prompt builder so that query, included documents, and template overhead
//! stay within the model's context window after reserving the completion
//! allowance.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use wenda_core::{
    Result, WendaError,
    traits::{AnswerGenerator, CompletionClient, CompletionRequest, TokenCounter},
    types::{Answer, Document, GeneratedAnswers, GenerationParams},
};

use crate::prompt::PromptTemplate;
use crate::token::TiktokenCounter;

/// Configuration for the hosted answer generator.
#[derive(Debug, Clone)]
pub struct HostedAnswerGeneratorConfig {
    /// Model identifier sent with every request.
    pub model: String,

    /// Default number of answers to produce.
    pub default_top_k: usize,

    /// Default completion token allowance per answer.
    pub default_max_tokens: usize,

    /// Default sampling temperature.
    pub default_temperature: f32,

    /// Total token limit of the model's context window.
    ///
    /// The prompt budget is this limit minus the completion allowance.
    pub max_tokens_limit: usize,
}

impl Default for HostedAnswerGeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo-instruct".to_string(),
            default_top_k: 1,
            default_max_tokens: 50,
            default_temperature: 0.2,
            max_tokens_limit: 2048,
        }
    }
}

/// Answer generator backed by a hosted LLM completion API.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use wenda_answer::hosted::HostedAnswerGenerator;
/// use wenda_core::traits::CompletionClient;
///
/// # fn example(client: Arc<dyn CompletionClient>) -> wenda_core::Result<()> {
/// let generator = HostedAnswerGenerator::builder()
///     .client(client)
///     .model("gpt-3.5-turbo-instruct")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct HostedAnswerGenerator {
    client: Arc<dyn CompletionClient>,
    counter: Arc<dyn TokenCounter>,
    template: PromptTemplate,
    config: HostedAnswerGeneratorConfig,
}

impl std::fmt::Debug for HostedAnswerGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostedAnswerGenerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HostedAnswerGenerator {
    /// Create a generator with default configuration and template.
    ///
    /// # Errors
    ///
    /// Returns an error if the default token counter cannot be constructed.
    pub fn new(client: Arc<dyn CompletionClient>) -> Result<Self> {
        Self::builder().client(client).build()
    }

    /// Create a builder for constructing hosted answer generators.
    pub fn builder() -> HostedAnswerGeneratorBuilder {
        HostedAnswerGeneratorBuilder::new()
    }

    /// The prompt budget left after reserving the completion allowance.
    fn prompt_budget(&self, max_tokens: usize) -> usize {
        self.config.max_tokens_limit.saturating_sub(max_tokens)
    }
}

#[async_trait]
impl AnswerGenerator for HostedAnswerGenerator {
    #[instrument(skip(self, documents), fields(generator = "HostedAnswerGenerator"))]
    async fn predict(
        &self,
        query: &str,
        documents: &[Document],
        params: &GenerationParams,
    ) -> Result<GeneratedAnswers> {
        let top_k = params.top_k.unwrap_or(self.config.default_top_k);
        let max_tokens = params.max_tokens.unwrap_or(self.config.default_max_tokens);
        let temperature = params
            .temperature
            .unwrap_or(self.config.default_temperature);

        info!(
            documents = documents.len(),
            top_k,
            model = %self.config.model,
            "Generating hosted answers"
        );

        let budget = self.prompt_budget(max_tokens);
        let fitted = self
            .template
            .build_within_budget(query, documents, budget, self.counter.as_ref());
        debug!(
            prompt_tokens = fitted.tokens,
            included = fitted.documents.len(),
            budget,
            "Prompt fitted to token budget"
        );

        let mut request = CompletionRequest::new(fitted.prompt.clone(), self.config.model.clone())
            .with_n(top_k)
            .with_max_tokens(max_tokens)
            .with_temperature(temperature);
        request.top_p = params.top_p;
        request.stop.clone_from(&params.stop);

        let response = self.client.complete(&request).await?;

        let answers: Vec<Answer> = response
            .texts
            .iter()
            .map(|text| Answer::from_documents(text.trim(), &fitted.documents))
            .collect();

        let model = response
            .model
            .unwrap_or_else(|| self.config.model.clone());
        let mut prediction = GeneratedAnswers::new(query, answers)
            .with_meta("model", model)
            .with_meta("prompt_tokens", fitted.tokens)
            .with_meta("included_documents", fitted.documents.len());
        if let Some(usage) = response.usage {
            prediction = prediction.with_meta("usage", serde_json::to_value(usage)?);
        }
        Ok(prediction)
    }

    fn name(&self) -> &'static str {
        "HostedAnswerGenerator"
    }

    async fn health_check(&self) -> Result<()> {
        let request = CompletionRequest::new("Hello", self.config.model.clone())
            .with_n(1)
            .with_max_tokens(1);
        self.client.complete(&request).await?;
        Ok(())
    }

    fn config(&self) -> HashMap<String, serde_json::Value> {
        let mut config = HashMap::new();
        config.insert("model".to_string(), self.config.model.clone().into());
        config.insert(
            "default_top_k".to_string(),
            self.config.default_top_k.into(),
        );
        config.insert(
            "default_max_tokens".to_string(),
            self.config.default_max_tokens.into(),
        );
        config.insert(
            "max_tokens_limit".to_string(),
            self.config.max_tokens_limit.into(),
        );
        config
    }
}

/// Builder for creating hosted answer generators.
#[derive(Default)]
pub struct HostedAnswerGeneratorBuilder {
    client: Option<Arc<dyn CompletionClient>>,
    counter: Option<Arc<dyn TokenCounter>>,
    template: Option<PromptTemplate>,
    config: Option<HostedAnswerGeneratorConfig>,
    model: Option<String>,
    max_tokens_limit: Option<usize>,
}

impl std::fmt::Debug for HostedAnswerGeneratorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostedAnswerGeneratorBuilder")
            .field("config", &self.config)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl HostedAnswerGeneratorBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the completion client.
    pub fn client(mut self, client: Arc<dyn CompletionClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the token counter used for prompt fitting.
    pub fn token_counter(mut self, counter: Arc<dyn TokenCounter>) -> Self {
        self.counter = Some(counter);
        self
    }

    /// Set a custom prompt template.
    pub fn prompt_template(mut self, template: PromptTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Set the full configuration.
    pub fn config(mut self, config: HostedAnswerGeneratorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the model identifier (shorthand for configuring only the model).
    pub fn model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the context window limit (shorthand).
    pub fn max_tokens_limit(mut self, limit: usize) -> Self {
        self.max_tokens_limit = Some(limit);
        self
    }

    /// Build the generator.
    ///
    /// Without an explicit token counter, a tiktoken counter matching the
    /// configured model is loaded.
    pub fn build(self) -> Result<HostedAnswerGenerator> {
        let client = self.client.ok_or_else(|| WendaError::Configuration {
            message: "Completion client is required".to_string(),
        })?;

        let mut config = self.config.unwrap_or_default();
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(limit) = self.max_tokens_limit {
            config.max_tokens_limit = limit;
        }

        let counter = match self.counter {
            Some(counter) => counter,
            None => Arc::new(TiktokenCounter::for_model(&config.model)?),
        };

        Ok(HostedAnswerGenerator {
            client,
            counter,
            template: self.template.unwrap_or_default(),
            config,
        })
    }
}
