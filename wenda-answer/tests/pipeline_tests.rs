//! Integration tests for generative QA pipelines over an in-memory store.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use wenda_answer::pipeline::{GENERATOR_NODE, GenerativeQaPipeline, RETRIEVER_NODE};
use wenda_answer::rag::{RaGenerator, RagModel};
use wenda_answer::seq2seq::{Seq2SeqGenerator, Seq2SeqModel};
use wenda_answer::store::{EmbeddingRetriever, InMemoryDocumentStore};
use wenda_core::prelude::*;

/// Embedder that maps every text to a fixed direction, so retrieval ordering
/// is fully determined by the stored document embeddings.
#[derive(Debug)]
struct FixedEmbedder;

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> wenda_core::Result<Vec<f32>> {
        Ok(vec![1.0, 0.0])
    }

    fn dimension(&self) -> usize {
        2
    }
}

#[derive(Debug)]
struct BerlinRagModel;

#[async_trait]
impl RagModel for BerlinRagModel {
    async fn generate(
        &self,
        _query: &str,
        _documents: &[Document],
        top_k: usize,
    ) -> wenda_core::Result<Vec<String>> {
        Ok((0..top_k).map(|i| format!("berlin, rank {i}")).collect())
    }
}

/// Seq2seq model that records the converted input it received.
#[derive(Debug, Default)]
struct RecordingSeq2Seq {
    inputs: Mutex<Vec<String>>,
}

#[async_trait]
impl Seq2SeqModel for RecordingSeq2Seq {
    async fn generate(
        &self,
        model_input: &str,
        _params: &GenerationParams,
    ) -> wenda_core::Result<Vec<String>> {
        self.inputs.lock().unwrap().push(model_input.to_string());
        Ok(vec!["Berlin is the capital of Germany".to_string()])
    }
}

async fn seeded_retriever() -> (Arc<EmbeddingRetriever>, Vec<Document>) {
    let store = Arc::new(InMemoryDocumentStore::new());
    let docs = vec![
        Document::new("Berlin is the capital and largest city of Germany.")
            .with_metadata("source", "wiki/Berlin")
            .with_embedding(vec![1.0, 0.0]),
        Document::new("Munich is the capital of Bavaria.")
            .with_metadata("source", "wiki/Munich")
            .with_embedding(vec![0.5, 0.5]),
    ];
    store.write_documents(docs.clone()).await.unwrap();
    (
        Arc::new(EmbeddingRetriever::new(store, Arc::new(FixedEmbedder))),
        docs,
    )
}

#[tokio::test]
async fn generative_pipeline_propagates_per_node_top_k() {
    let (retriever, docs) = seeded_retriever().await;
    let pipeline = GenerativeQaPipeline::builder()
        .retriever(retriever)
        .generator(Arc::new(RaGenerator::new(BerlinRagModel)))
        .build()
        .unwrap();

    let params = PipelineParams::new()
        .with_node(GENERATOR_NODE, NodeParams::new().with_top_k(2))
        .with_node(RETRIEVER_NODE, NodeParams::new().with_top_k(1));
    let output = pipeline
        .run("What is capital of the Germany?", &params)
        .await
        .unwrap();

    assert_eq!(output.answers.len(), 2);
    assert!(output.answers[0].answer.contains("berlin"));
    assert_eq!(output.documents.len(), 1);
    assert_eq!(output.documents[0].id, docs[0].id);

    // Answer provenance aligns with the retrieved documents, ids and
    // metadata alike.
    let answer = &output.answers[0];
    let doc_metas = answer.doc_metas().unwrap();
    for (idx, document) in output.documents.iter().enumerate() {
        assert_eq!(document.id, answer.document_ids[idx]);
        assert_eq!(
            doc_metas[idx],
            serde_json::to_value(&document.metadata).unwrap()
        );
    }
}

#[tokio::test]
async fn lfqa_pipeline_answers_with_global_top_k() {
    let (retriever, _docs) = seeded_retriever().await;
    let model = Arc::new(RecordingSeq2Seq::default());
    let generator = Seq2SeqGenerator::builder()
        .model_name("vblagoje/bart_lfqa")
        .model(model.clone())
        .build()
        .unwrap();

    let pipeline = GenerativeQaPipeline::builder()
        .retriever(retriever)
        .generator(Arc::new(generator))
        .build()
        .unwrap();

    let params = PipelineParams::new().with_global(NodeParams::new().with_top_k(1));
    let output = pipeline.run("Tell me about Berlin?", &params).await.unwrap();

    assert_eq!(output.answers.len(), 1);
    assert!(output.answers[0].answer.contains("Germany"));

    // The converter saw the single retrieved document.
    let inputs = model.inputs.lock().unwrap();
    assert_eq!(inputs.len(), 1);
    assert!(inputs[0].starts_with("question: Tell me about Berlin?"));
    assert!(inputs[0].contains("Berlin is the capital"));
}

#[tokio::test]
async fn lfqa_pipeline_unknown_converter_fails() {
    let (retriever, _docs) = seeded_retriever().await;
    let generator = Seq2SeqGenerator::builder()
        .model_name("patrickvonplaten/t5-tiny-random")
        .model(Arc::new(RecordingSeq2Seq::default()))
        .build()
        .unwrap();

    let pipeline = GenerativeQaPipeline::builder()
        .retriever(retriever)
        .generator(Arc::new(generator))
        .build()
        .unwrap();

    let params = PipelineParams::new().with_global(NodeParams::new().with_top_k(1));
    let err = pipeline
        .run("Tell me about Berlin?", &params)
        .await
        .unwrap_err();
    assert!(
        err.to_string()
            .contains("doesn't have an input converter registered for patrickvonplaten/t5-tiny-random")
    );
}

#[tokio::test]
async fn pipeline_rejects_params_for_unknown_node() {
    let (retriever, _docs) = seeded_retriever().await;
    let pipeline = GenerativeQaPipeline::builder()
        .retriever(retriever)
        .generator(Arc::new(RaGenerator::new(BerlinRagModel)))
        .build()
        .unwrap();

    let params = PipelineParams::new().with_node("ranker", NodeParams::new().with_top_k(1));
    let err = pipeline.run("query", &params).await.unwrap_err();
    assert!(matches!(err, WendaError::Configuration { .. }));
}
