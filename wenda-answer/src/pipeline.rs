//! Generative QA pipelines.
//!
//! A generative QA pipeline wires a retriever node to a generator node:
//! documents are retrieved for the query, handed to the generator in rank
//! order, and the generated answers are returned alongside the retrieved
//! documents. Parameters address nodes by name, with per-node overrides
//! layered over a global set.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use wenda_core::{
    Result, WendaError,
    traits::{AnswerGenerator, Retriever},
    types::{Answer, Document, PipelineParams, Query},
};

/// Name of the retriever node in a generative QA pipeline.
pub const RETRIEVER_NODE: &str = "retriever";

/// Name of the generator node in a generative QA pipeline.
pub const GENERATOR_NODE: &str = "generator";

/// Configuration for generative QA pipelines.
#[derive(Debug, Clone)]
pub struct GenerativeQaPipelineConfig {
    /// Documents to retrieve when no `top_k` is supplied for the retriever.
    pub default_retriever_top_k: usize,
}

impl Default for GenerativeQaPipelineConfig {
    fn default() -> Self {
        Self {
            default_retriever_top_k: Query::DEFAULT_TOP_K,
        }
    }
}

/// Output of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The query that was answered.
    pub query: String,

    /// Generated answers, best first. Each answer's `document_ids` aligns
    /// with the prefix of `documents` the generator actually consumed.
    pub answers: Vec<Answer>,

    /// The retrieved documents in rank order.
    pub documents: Vec<Document>,

    /// Metadata from the generation step.
    pub meta: HashMap<String, serde_json::Value>,
}

/// A retriever-then-generator pipeline for generative question answering.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use wenda_answer::pipeline::GenerativeQaPipeline;
/// use wenda_core::prelude::*;
///
/// # async fn example(
/// #     retriever: Arc<dyn Retriever>,
/// #     generator: Arc<dyn AnswerGenerator>,
/// # ) -> Result<()> {
/// let pipeline = GenerativeQaPipeline::builder()
///     .retriever(retriever)
///     .generator(generator)
///     .build()?;
///
/// let params = PipelineParams::new()
///     .with_node("retriever", NodeParams::new().with_top_k(1))
///     .with_node("generator", NodeParams::new().with_top_k(2));
/// let output = pipeline.run("What is the capital of Germany?", &params).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GenerativeQaPipeline {
    retriever: Arc<dyn Retriever>,
    generator: Arc<dyn AnswerGenerator>,
    config: GenerativeQaPipelineConfig,
}

impl GenerativeQaPipeline {
    /// Create a pipeline with default configuration.
    pub fn new(retriever: Arc<dyn Retriever>, generator: Arc<dyn AnswerGenerator>) -> Self {
        Self {
            retriever,
            generator,
            config: GenerativeQaPipelineConfig::default(),
        }
    }

    /// Create a builder for constructing pipelines.
    pub fn builder() -> GenerativeQaPipelineBuilder {
        GenerativeQaPipelineBuilder::new()
    }

    /// The retriever node.
    pub fn retriever(&self) -> &Arc<dyn Retriever> {
        &self.retriever
    }

    /// The generator node.
    pub fn generator(&self) -> &Arc<dyn AnswerGenerator> {
        &self.generator
    }

    fn validate_params(&self, params: &PipelineParams) -> Result<()> {
        for node in params.overridden_nodes() {
            if node != RETRIEVER_NODE && node != GENERATOR_NODE {
                return Err(WendaError::Configuration {
                    message: format!(
                        "Pipeline has no node named '{node}'; \
                         valid nodes are '{RETRIEVER_NODE}' and '{GENERATOR_NODE}'"
                    ),
                });
            }
        }
        Ok(())
    }

    /// Run the pipeline for a query.
    ///
    /// Retrieves documents, generates answers over them, and returns both.
    /// `params` is validated against the pipeline's node names before any
    /// work happens; `top_k` resolves per node, so the retriever and the
    /// generator can be tuned independently.
    ///
    /// # Errors
    ///
    /// Returns an error if params address an unknown node, or if retrieval
    /// or generation fails.
    #[instrument(skip(self, params), fields(pipeline = "GenerativeQaPipeline"))]
    pub async fn run(&self, query: &str, params: &PipelineParams) -> Result<PipelineOutput> {
        self.validate_params(params)?;

        let retriever_params = params.resolve(RETRIEVER_NODE);
        let generator_params = params.resolve(GENERATOR_NODE);

        let retrieval_query = Query::new(query).with_top_k(
            retriever_params
                .top_k
                .unwrap_or(self.config.default_retriever_top_k),
        );
        let scored = self.retriever.retrieve(&retrieval_query).await?;
        debug!(retrieved = scored.len(), "Retrieval complete");

        let documents: Vec<Document> = scored.into_iter().map(|s| s.document).collect();
        let prediction = self
            .generator
            .predict(query, &documents, &generator_params)
            .await?;

        info!(
            answers = prediction.answers.len(),
            documents = documents.len(),
            "Pipeline run complete"
        );
        Ok(PipelineOutput {
            query: prediction.query,
            answers: prediction.answers,
            documents,
            meta: prediction.meta,
        })
    }

    /// Check that both nodes are healthy.
    pub async fn health_check(&self) -> Result<()> {
        self.retriever.health_check().await?;
        self.generator.health_check().await
    }
}

/// Builder for creating generative QA pipelines.
#[derive(Default)]
pub struct GenerativeQaPipelineBuilder {
    retriever: Option<Arc<dyn Retriever>>,
    generator: Option<Arc<dyn AnswerGenerator>>,
    config: Option<GenerativeQaPipelineConfig>,
}

impl std::fmt::Debug for GenerativeQaPipelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerativeQaPipelineBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GenerativeQaPipelineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retriever.
    pub fn retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Set the generator.
    pub fn generator(mut self, generator: Arc<dyn AnswerGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Set the configuration.
    pub fn config(mut self, config: GenerativeQaPipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> Result<GenerativeQaPipeline> {
        let retriever = self.retriever.ok_or_else(|| WendaError::Configuration {
            message: "Retriever is required".to_string(),
        })?;
        let generator = self.generator.ok_or_else(|| WendaError::Configuration {
            message: "Generator is required".to_string(),
        })?;

        Ok(GenerativeQaPipeline {
            retriever,
            generator,
            config: self.config.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use wenda_core::types::{GeneratedAnswers, GenerationParams, NodeParams, ScoredDocument};

    #[derive(Debug)]
    struct StaticRetriever {
        documents: Vec<Document>,
    }

    #[async_trait]
    impl Retriever for StaticRetriever {
        async fn retrieve(&self, query: &Query) -> Result<Vec<ScoredDocument>> {
            Ok(self
                .documents
                .iter()
                .take(query.top_k)
                .cloned()
                .map(|d| ScoredDocument::new(d, 1.0))
                .collect())
        }
    }

    #[derive(Debug, Default)]
    struct RecordingGenerator {
        seen_params: Mutex<Option<GenerationParams>>,
    }

    #[async_trait]
    impl AnswerGenerator for RecordingGenerator {
        async fn predict(
            &self,
            query: &str,
            documents: &[Document],
            params: &GenerationParams,
        ) -> Result<GeneratedAnswers> {
            *self.seen_params.lock().unwrap() = Some(params.clone());
            let top_k = params.top_k.unwrap_or(1);
            let answers = (0..top_k)
                .map(|_| Answer::from_documents("generated", documents))
                .collect();
            Ok(GeneratedAnswers::new(query, answers))
        }
    }

    fn pipeline(generator: Arc<RecordingGenerator>, docs: Vec<Document>) -> GenerativeQaPipeline {
        GenerativeQaPipeline::builder()
            .retriever(Arc::new(StaticRetriever { documents: docs }))
            .generator(generator)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_per_node_top_k_propagation() {
        let generator = Arc::new(RecordingGenerator::default());
        let docs = vec![Document::new("a"), Document::new("b")];
        let pipeline = pipeline(generator.clone(), docs);

        let params = PipelineParams::new()
            .with_node(GENERATOR_NODE, NodeParams::new().with_top_k(2))
            .with_node(RETRIEVER_NODE, NodeParams::new().with_top_k(1));
        let output = pipeline.run("query", &params).await.unwrap();

        // Retriever saw top_k 1, generator top_k 2.
        assert_eq!(output.documents.len(), 1);
        assert_eq!(output.answers.len(), 2);
        let seen = generator.seen_params.lock().unwrap().clone().unwrap();
        assert_eq!(seen.top_k, Some(2));
    }

    #[tokio::test]
    async fn test_global_params_reach_both_nodes() {
        let generator = Arc::new(RecordingGenerator::default());
        let docs = vec![Document::new("a"), Document::new("b")];
        let pipeline = pipeline(generator.clone(), docs);

        let params = PipelineParams::new().with_global(NodeParams::new().with_top_k(1));
        let output = pipeline.run("query", &params).await.unwrap();

        assert_eq!(output.documents.len(), 1);
        assert_eq!(output.answers.len(), 1);
    }

    #[tokio::test]
    async fn test_max_tokens_reaches_generator() {
        let generator = Arc::new(RecordingGenerator::default());
        let pipeline = pipeline(generator.clone(), vec![Document::new("nyc")]);

        let params = PipelineParams::new()
            .with_node(GENERATOR_NODE, NodeParams::new().with_max_tokens(3));
        pipeline.run("What is New York City like?", &params).await.unwrap();

        let seen = generator.seen_params.lock().unwrap().clone().unwrap();
        assert_eq!(seen.max_tokens, Some(3));
    }

    #[tokio::test]
    async fn test_unknown_node_rejected() {
        let generator = Arc::new(RecordingGenerator::default());
        let pipeline = pipeline(generator, vec![]);

        let params = PipelineParams::new().with_node("reader", NodeParams::new().with_top_k(1));
        let err = pipeline.run("query", &params).await.unwrap_err();
        assert!(matches!(err, WendaError::Configuration { .. }));
        assert!(err.to_string().contains("no node named 'reader'"));
    }

    #[tokio::test]
    async fn test_answers_align_with_documents() {
        let generator = Arc::new(RecordingGenerator::default());
        let docs = vec![Document::new("a"), Document::new("b")];
        let pipeline = pipeline(generator, docs);

        let output = pipeline.run("query", &PipelineParams::new()).await.unwrap();
        let doc_ids: Vec<_> = output.documents.iter().map(|d| d.id).collect();
        assert_eq!(output.answers[0].document_ids, doc_ids);
    }

    #[test]
    fn test_builder_requires_both_nodes() {
        assert!(GenerativeQaPipeline::builder().build().is_err());
    }
}
