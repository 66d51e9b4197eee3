//! Retrieval-augmented answer generation.
//!
//! A retrieval-augmented model conditions its decoder on the query and the
//! dense embeddings of the supporting documents, so every document handed to
//! this generator must carry a pre-computed embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{info, instrument};

use wenda_core::{
    Result, WendaError,
    traits::AnswerGenerator,
    types::{Answer, Document, GeneratedAnswers, GenerationParams},
};

/// Externally hosted retrieval-augmented generation model.
#[async_trait]
pub trait RagModel: Send + Sync + std::fmt::Debug {
    /// Generate answer texts for a query conditioned on embedded documents.
    ///
    /// `top_k` is the number of answers to produce.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails.
    async fn generate(
        &self,
        query: &str,
        documents: &[Document],
        top_k: usize,
    ) -> Result<Vec<String>>;
}

/// Configuration for the retrieval-augmented generator.
#[derive(Debug, Clone)]
pub struct RaGeneratorConfig {
    /// Default number of answers to produce.
    pub default_top_k: usize,
}

impl Default for RaGeneratorConfig {
    fn default() -> Self {
        Self { default_top_k: 2 }
    }
}

/// Answer generator backed by a retrieval-augmented model.
///
/// Rejects documents without embeddings up front: the model cannot condition
/// on what was never embedded, and silently dropping documents would corrupt
/// answer provenance.
#[derive(Debug)]
pub struct RaGenerator<M: RagModel> {
    model: M,
    config: RaGeneratorConfig,
}

impl<M: RagModel> RaGenerator<M> {
    /// Create a generator with default configuration.
    pub fn new(model: M) -> Self {
        Self {
            model,
            config: RaGeneratorConfig::default(),
        }
    }

    /// Create a generator with custom configuration.
    pub fn with_config(model: M, config: RaGeneratorConfig) -> Self {
        Self { model, config }
    }
}

#[async_trait]
impl<M: RagModel> AnswerGenerator for RaGenerator<M> {
    #[instrument(skip(self, documents), fields(generator = "RaGenerator"))]
    async fn predict(
        &self,
        query: &str,
        documents: &[Document],
        params: &GenerationParams,
    ) -> Result<GeneratedAnswers> {
        if let Some(missing) = documents.iter().find(|d| !d.has_embedding()) {
            return Err(WendaError::Validation {
                message: format!(
                    "Document {} has no embedding; retrieval-augmented generation \
                     requires pre-computed document embeddings",
                    missing.id
                ),
            });
        }

        let top_k = params.top_k.unwrap_or(self.config.default_top_k);
        info!(
            documents = documents.len(),
            top_k, "Generating retrieval-augmented answers"
        );

        let outputs = self.model.generate(query, documents, top_k).await?;
        let answers: Vec<Answer> = outputs
            .into_iter()
            .map(|text| Answer::from_documents(text, documents))
            .collect();

        Ok(GeneratedAnswers::new(query, answers)
            .with_meta("generator", self.name())
            .with_meta("top_k", top_k))
    }

    fn name(&self) -> &'static str {
        "RaGenerator"
    }

    fn config(&self) -> HashMap<String, serde_json::Value> {
        let mut config = HashMap::new();
        config.insert(
            "default_top_k".to_string(),
            self.config.default_top_k.into(),
        );
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct CountingModel;

    #[async_trait]
    impl RagModel for CountingModel {
        async fn generate(
            &self,
            query: &str,
            _documents: &[Document],
            top_k: usize,
        ) -> Result<Vec<String>> {
            Ok((0..top_k).map(|i| format!("{query} answer {i}")).collect())
        }
    }

    #[tokio::test]
    async fn test_predict_produces_top_k_answers() {
        let generator = RaGenerator::new(CountingModel);
        let docs = vec![Document::new("Berlin").with_embedding(vec![0.1, 0.2])];

        let prediction = generator
            .predict(
                "What is the capital of Germany?",
                &docs,
                &GenerationParams::new().with_top_k(1),
            )
            .await
            .unwrap();

        assert_eq!(prediction.len(), 1);
        assert_eq!(prediction.answers[0].document_ids, vec![docs[0].id]);
    }

    #[tokio::test]
    async fn test_default_top_k_applies() {
        let generator = RaGenerator::new(CountingModel);
        let docs = vec![Document::new("Berlin").with_embedding(vec![0.1])];

        let prediction = generator
            .predict("query", &docs, &GenerationParams::new())
            .await
            .unwrap();
        assert_eq!(prediction.len(), 2);
    }

    #[tokio::test]
    async fn test_prediction_meta_names_the_generator() {
        let generator = RaGenerator::new(CountingModel);
        let docs = vec![Document::new("Berlin").with_embedding(vec![0.1])];

        let prediction = generator
            .predict("query", &docs, &GenerationParams::new().with_top_k(3))
            .await
            .unwrap();

        assert_eq!(prediction.meta["generator"], "RaGenerator");
        assert_eq!(prediction.meta["top_k"], 3);
    }

    #[tokio::test]
    async fn test_missing_embedding_rejected() {
        let generator = RaGenerator::new(CountingModel);
        let docs = vec![Document::new("no embedding here")];

        let err = generator
            .predict("query", &docs, &GenerationParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, WendaError::Validation { .. }));
        assert!(err.to_string().contains("has no embedding"));
    }
}
