//! Sequence-to-sequence answer generation.
//!
//! This generator wraps an externally hosted sequence-to-sequence model. Each
//! model family expects its input assembled in a specific shape, so the query
//! and documents go through an [`InputConverter`] registered for the model
//! name. Converters for the known long-form QA BART family are registered by
//! default; other models must bring their own.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use wenda_core::{
    Result, WendaError,
    traits::AnswerGenerator,
    types::{Answer, Document, GeneratedAnswers, GenerationParams},
};

/// Externally hosted sequence-to-sequence model.
///
/// Implementations own tokenization and inference; the generator only hands
/// over the converted model input and generation parameters.
#[async_trait]
pub trait Seq2SeqModel: Send + Sync + std::fmt::Debug {
    /// Generate one or more output sequences for a model input.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails.
    async fn generate(&self, model_input: &str, params: &GenerationParams)
    -> Result<Vec<String>>;
}

/// Converts a query and its supporting documents into a model input string.
///
/// The converter must produce a non-empty input; an empty result violates the
/// contract and fails the prediction immediately.
pub trait InputConverter: Send + Sync + std::fmt::Debug {
    /// Assemble the model input for a query and its documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be assembled.
    fn convert(&self, query: &str, documents: &[Document]) -> Result<String>;
}

/// Input converter for the ELI5-style BART long-form QA models.
///
/// Produces `question: <query> context: <doc1> <doc2> ...`, the shape the
/// `bart_lfqa` / `bart_eli5` checkpoints were trained on.
#[derive(Debug, Clone, Copy, Default)]
pub struct BartLfqaConverter;

impl InputConverter for BartLfqaConverter {
    fn convert(&self, query: &str, documents: &[Document]) -> Result<String> {
        let context = documents
            .iter()
            .map(|d| d.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(format!("question: {query} context: {context}"))
    }
}

/// Configuration for the sequence-to-sequence generator.
#[derive(Debug, Clone)]
pub struct Seq2SeqGeneratorConfig {
    /// Default number of answers to produce.
    pub default_top_k: usize,

    /// Default maximum output tokens.
    pub default_max_tokens: usize,
}

impl Default for Seq2SeqGeneratorConfig {
    fn default() -> Self {
        Self {
            default_top_k: 1,
            default_max_tokens: 200,
        }
    }
}

/// Answer generator backed by a sequence-to-sequence model.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use wenda_answer::seq2seq::{Seq2SeqGenerator, Seq2SeqModel};
///
/// # fn example(model: Arc<dyn Seq2SeqModel>) -> wenda_core::Result<()> {
/// let generator = Seq2SeqGenerator::builder()
///     .model_name("vblagoje/bart_lfqa")
///     .model(model)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Seq2SeqGenerator {
    model_name: String,
    model: Arc<dyn Seq2SeqModel>,
    converters: HashMap<String, Arc<dyn InputConverter>>,
    config: Seq2SeqGeneratorConfig,
}

impl Seq2SeqGenerator {
    /// Create a generator for a model with the default converter registry.
    pub fn new<S: Into<String>>(model_name: S, model: Arc<dyn Seq2SeqModel>) -> Self {
        Self {
            model_name: model_name.into(),
            model,
            converters: Self::default_converters(),
            config: Seq2SeqGeneratorConfig::default(),
        }
    }

    /// Create a builder for constructing sequence-to-sequence generators.
    pub fn builder() -> Seq2SeqGeneratorBuilder {
        Seq2SeqGeneratorBuilder::new()
    }

    /// Register (or replace) the input converter for a model name.
    pub fn with_converter<S: Into<String>>(
        mut self,
        model_name: S,
        converter: Arc<dyn InputConverter>,
    ) -> Self {
        self.converters.insert(model_name.into(), converter);
        self
    }

    /// The model name this generator was configured with.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn default_converters() -> HashMap<String, Arc<dyn InputConverter>> {
        let mut converters: HashMap<String, Arc<dyn InputConverter>> = HashMap::new();
        converters.insert("vblagoje/bart_lfqa".to_string(), Arc::new(BartLfqaConverter));
        converters.insert("yjernite/bart_eli5".to_string(), Arc::new(BartLfqaConverter));
        converters
    }

    fn converter(&self) -> Result<&Arc<dyn InputConverter>> {
        self.converters
            .get(&self.model_name)
            .ok_or_else(|| WendaError::Configuration {
                message: format!(
                    "Seq2SeqGenerator doesn't have an input converter registered for {}. \
                     Register one with `with_converter`",
                    self.model_name
                ),
            })
    }
}

#[async_trait]
impl AnswerGenerator for Seq2SeqGenerator {
    #[instrument(skip(self, documents), fields(generator = "Seq2SeqGenerator"))]
    async fn predict(
        &self,
        query: &str,
        documents: &[Document],
        params: &GenerationParams,
    ) -> Result<GeneratedAnswers> {
        info!(
            documents = documents.len(),
            model = %self.model_name,
            "Generating seq2seq answers"
        );

        let converter = self.converter()?;
        let model_input = converter.convert(query, documents)?;
        if model_input.trim().is_empty() {
            return Err(WendaError::Validation {
                message: format!(
                    "Input converter for {} returned an empty model input; \
                     converters must produce a non-empty string from the query and documents",
                    self.model_name
                ),
            });
        }
        debug!(input_chars = model_input.len(), "Converted model input");

        let mut effective = params.clone();
        effective.top_k = Some(params.top_k.unwrap_or(self.config.default_top_k));
        effective.max_tokens = Some(params.max_tokens.unwrap_or(self.config.default_max_tokens));

        let outputs = self.model.generate(&model_input, &effective).await?;
        let answers: Vec<Answer> = outputs
            .into_iter()
            .map(|text| Answer::from_documents(text, documents))
            .collect();

        Ok(GeneratedAnswers::new(query, answers).with_meta("model", self.model_name.clone()))
    }

    fn name(&self) -> &'static str {
        "Seq2SeqGenerator"
    }

    fn config(&self) -> HashMap<String, serde_json::Value> {
        let mut config = HashMap::new();
        config.insert("model_name".to_string(), self.model_name.clone().into());
        config.insert(
            "default_top_k".to_string(),
            self.config.default_top_k.into(),
        );
        config.insert(
            "default_max_tokens".to_string(),
            self.config.default_max_tokens.into(),
        );
        config
    }
}

/// Builder for creating sequence-to-sequence generators.
#[derive(Debug, Default)]
pub struct Seq2SeqGeneratorBuilder {
    model_name: Option<String>,
    model: Option<Arc<dyn Seq2SeqModel>>,
    converters: Vec<(String, Arc<dyn InputConverter>)>,
    config: Option<Seq2SeqGeneratorConfig>,
}

impl Seq2SeqGeneratorBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model name.
    pub fn model_name<S: Into<String>>(mut self, model_name: S) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    /// Set the model.
    pub fn model(mut self, model: Arc<dyn Seq2SeqModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Register an input converter for a model name.
    pub fn converter<S: Into<String>>(
        mut self,
        model_name: S,
        converter: Arc<dyn InputConverter>,
    ) -> Self {
        self.converters.push((model_name.into(), converter));
        self
    }

    /// Set the configuration.
    pub fn config(mut self, config: Seq2SeqGeneratorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the generator.
    pub fn build(self) -> Result<Seq2SeqGenerator> {
        let model_name = self.model_name.ok_or_else(|| WendaError::Configuration {
            message: "Model name is required".to_string(),
        })?;
        let model = self.model.ok_or_else(|| WendaError::Configuration {
            message: "Seq2seq model is required".to_string(),
        })?;

        let mut generator = Seq2SeqGenerator::new(model_name, model);
        if let Some(config) = self.config {
            generator.config = config;
        }
        for (name, converter) in self.converters {
            generator.converters.insert(name, converter);
        }
        Ok(generator)
    }
}
