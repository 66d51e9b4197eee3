//! Integration tests for the answer generator nodes.

use async_trait::async_trait;
use std::sync::Arc;

use wenda_answer::hosted::HostedAnswerGenerator;
use wenda_answer::prompt::PromptTemplate;
use wenda_answer::rag::{RaGenerator, RagModel};
use wenda_answer::seq2seq::{InputConverter, Seq2SeqGenerator, Seq2SeqModel};
use wenda_answer::token::WhitespaceTokenCounter;
use wenda_core::prelude::*;

/// Seq2seq model that answers with a canned string regardless of input.
#[derive(Debug)]
struct CannedSeq2Seq {
    answer: &'static str,
}

#[async_trait]
impl Seq2SeqModel for CannedSeq2Seq {
    async fn generate(
        &self,
        _model_input: &str,
        _params: &GenerationParams,
    ) -> wenda_core::Result<Vec<String>> {
        Ok(vec![self.answer.to_string()])
    }
}

/// RAG model that produces `top_k` answers mentioning berlin.
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
        Ok((0..top_k)
            .map(|i| format!("the capital is berlin ({i})"))
            .collect())
    }
}

/// Completion client that echoes a canned completion per requested answer.
#[derive(Debug)]
struct CannedClient {
    text: &'static str,
}

#[async_trait]
impl CompletionClient for CannedClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> wenda_core::Result<CompletionResponse> {
        Ok(CompletionResponse::new(vec![
            self.text.to_string();
            request.n
        ]))
    }
}

fn docs_with_embeddings() -> Vec<Document> {
    vec![
        Document::new("Berlin is the capital and largest city of Germany.")
            .with_metadata("source", "wiki/Berlin")
            .with_embedding(vec![1.0, 0.0]),
        Document::new("Munich is the capital of Bavaria.")
            .with_metadata("source", "wiki/Munich")
            .with_embedding(vec![0.0, 1.0]),
    ]
}

#[tokio::test]
async fn rag_generator_answers_with_provenance() {
    let generator = RaGenerator::new(BerlinRagModel);
    let docs = docs_with_embeddings();

    let prediction = generator
        .predict(
            "What is capital of the Germany?",
            &docs,
            &GenerationParams::new().with_top_k(1),
        )
        .await
        .unwrap();

    assert_eq!(prediction.len(), 1);
    assert!(prediction.answers[0].answer.contains("berlin"));
    assert_eq!(
        prediction.answers[0].document_ids,
        vec![docs[0].id, docs[1].id]
    );
}

#[tokio::test]
async fn rag_generator_rejects_docs_without_embeddings() {
    let generator = RaGenerator::new(BerlinRagModel);
    let docs = vec![Document::new("no embedding")];

    let err = generator
        .predict("query", &docs, &GenerationParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, WendaError::Validation { .. }));
}

#[tokio::test]
async fn seq2seq_generator_uses_registered_converter() {
    let generator = Seq2SeqGenerator::builder()
        .model_name("vblagoje/bart_lfqa")
        .model(Arc::new(CannedSeq2Seq {
            answer: "Berlin is in Germany",
        }))
        .build()
        .unwrap();

    let docs = vec![Document::new("Berlin is the capital of Germany.")];
    let prediction = generator
        .predict("Tell me about Berlin?", &docs, &GenerationParams::new())
        .await
        .unwrap();

    assert_eq!(prediction.len(), 1);
    assert!(prediction.answers[0].answer.contains("Germany"));
}

#[tokio::test]
async fn seq2seq_generator_fails_for_unregistered_model() {
    let generator = Seq2SeqGenerator::builder()
        .model_name("patrickvonplaten/t5-tiny-random")
        .model(Arc::new(CannedSeq2Seq { answer: "unused" }))
        .build()
        .unwrap();

    let err = generator
        .predict("Tell me about Berlin?", &[], &GenerationParams::new())
        .await
        .unwrap_err();
    assert!(
        err.to_string()
            .contains("doesn't have an input converter registered for patrickvonplaten/t5-tiny-random")
    );
}

#[tokio::test]
async fn seq2seq_generator_rejects_contract_violating_converter() {
    #[derive(Debug)]
    struct BrokenConverter;

    impl InputConverter for BrokenConverter {
        fn convert(
            &self,
            _query: &str,
            _documents: &[Document],
        ) -> wenda_core::Result<String> {
            Ok(String::new())
        }
    }

    let generator = Seq2SeqGenerator::builder()
        .model_name("patrickvonplaten/t5-tiny-random")
        .model(Arc::new(CannedSeq2Seq { answer: "unused" }))
        .converter("patrickvonplaten/t5-tiny-random", Arc::new(BrokenConverter))
        .build()
        .unwrap();

    let err = generator
        .predict(
            "This query will fail due to the broken converter",
            &[],
            &GenerationParams::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WendaError::Validation { .. }));
    assert!(err.to_string().contains("empty model input"));
}

#[tokio::test]
async fn hosted_generator_answers_from_documents() {
    let generator = HostedAnswerGenerator::builder()
        .client(Arc::new(CannedClient {
            text: "Carla lives in Berlin",
        }))
        .token_counter(Arc::new(WhitespaceTokenCounter))
        .build()
        .unwrap();

    let docs = vec![Document::new("My name is Carla and I live in Berlin")];
    let prediction = generator
        .predict(
            "Who lives in Berlin?",
            &docs,
            &GenerationParams::new().with_top_k(1),
        )
        .await
        .unwrap();

    assert_eq!(prediction.len(), 1);
    assert!(prediction.answers[0].answer.contains("Carla"));
    assert_eq!(prediction.answers[0].document_ids, vec![docs[0].id]);
}

#[tokio::test]
async fn hosted_generator_accepts_custom_template() {
    let template = PromptTemplate::new(
        "Synthesize a comprehensive answer from the following most relevant paragraphs \
         and the given question.\n===\nParagraphs: {context}\n===\n{query}",
    )
    .unwrap();

    let generator = HostedAnswerGenerator::builder()
        .client(Arc::new(CannedClient {
            text: "Carla does",
        }))
        .token_counter(Arc::new(WhitespaceTokenCounter))
        .prompt_template(template)
        .build()
        .unwrap();

    let prediction = generator
        .predict(
            "Who lives in Berlin?",
            &[Document::new("My name is Carla and I live in Berlin")],
            &GenerationParams::new().with_top_k(1),
        )
        .await
        .unwrap();
    assert_eq!(prediction.len(), 1);
}

#[tokio::test]
async fn hosted_generator_truncates_documents_under_tight_limit() {
    // A tight context window still answers; the oversized documents are
    // dropped rather than failing the request.
    let generator = HostedAnswerGenerator::builder()
        .client(Arc::new(CannedClient { text: "Carla" }))
        .token_counter(Arc::new(WhitespaceTokenCounter))
        .prompt_template(
            PromptTemplate::new("Context: {context}\nQuestion: {query}\nAnswer:").unwrap(),
        )
        .max_tokens_limit(58)
        .build()
        .unwrap();

    // Budget: 58 - 50 (default answer allowance) = 8 tokens.
    // Overhead 3 + query 4 = 7, so neither 5-token document fits.
    let docs = vec![
        Document::new("Carla lives in Berlin today"),
        Document::new("Paula lives in New York today"),
    ];
    let prediction = generator
        .predict(
            "Who lives in Berlin?",
            &docs,
            &GenerationParams::new().with_top_k(1),
        )
        .await
        .unwrap();

    assert_eq!(prediction.len(), 1);
    assert!(prediction.answers[0].document_ids.is_empty());
    assert_eq!(prediction.meta["included_documents"], 0);
}
