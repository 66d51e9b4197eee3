//! In-memory document storage and embedding retrieval.
//!
//! The in-memory store keeps documents in insertion order; the embedding
//! retriever ranks them by cosine similarity between the query embedding and
//! the stored document embeddings.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;
use uuid::Uuid;

use wenda_core::{
    Result, WendaError,
    traits::{DocumentStore, Embedder, Retriever},
    types::{Document, Query, ScoredDocument},
};

/// A simple in-memory document store.
///
/// Intended for tests, examples, and small corpora. Writes replace documents
/// with the same id while keeping their original position.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    inner: RwLock<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    documents: Vec<Document>,
    index: HashMap<Uuid, usize>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreInner>> {
        self.inner
            .read()
            .map_err(|_| WendaError::internal("Document store lock poisoned"))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn write_documents(&self, documents: Vec<Document>) -> Result<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| WendaError::internal("Document store lock poisoned"))?;
        for document in documents {
            if let Some(&pos) = inner.index.get(&document.id) {
                inner.documents[pos] = document;
            } else {
                let pos = inner.documents.len();
                inner.index.insert(document.id, pos);
                inner.documents.push(document);
            }
        }
        Ok(())
    }

    async fn get_document(&self, id: Uuid) -> Result<Option<Document>> {
        let inner = self.read()?;
        Ok(inner
            .index
            .get(&id)
            .map(|&pos| inner.documents[pos].clone()))
    }

    async fn get_all_documents(&self) -> Result<Vec<Document>> {
        Ok(self.read()?.documents.clone())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.read()?.documents.len())
    }

    fn name(&self) -> &'static str {
        "InMemoryDocumentStore"
    }
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 for mismatched dimensions or zero-magnitude vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Retriever ranking stored documents by embedding similarity.
///
/// Uses the query's pre-computed embedding when present, otherwise embeds the
/// query text with the injected embedder. Documents without embeddings are
/// not retrievable and are skipped.
pub struct EmbeddingRetriever {
    store: Arc<InMemoryDocumentStore>,
    embedder: Arc<dyn Embedder>,
}

impl std::fmt::Debug for EmbeddingRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingRetriever").finish_non_exhaustive()
    }
}

impl EmbeddingRetriever {
    /// Create a retriever over a store with an embedder for query text.
    pub fn new(store: Arc<InMemoryDocumentStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self { store, embedder }
    }
}

#[async_trait]
impl Retriever for EmbeddingRetriever {
    async fn retrieve(&self, query: &Query) -> Result<Vec<ScoredDocument>> {
        let query_embedding = match &query.embedding {
            Some(embedding) => embedding.clone(),
            None => self.embedder.embed(&query.text).await?,
        };

        let mut scored: Vec<ScoredDocument> = self
            .store
            .get_all_documents()
            .await?
            .into_iter()
            .filter_map(|document| {
                let embedding = document.embedding.as_deref()?;
                let score = cosine_similarity(&query_embedding, embedding);
                Some(ScoredDocument::new(document, score))
            })
            .filter(|scored| {
                query
                    .similarity_threshold
                    .is_none_or(|threshold| scored.score >= threshold)
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(query.top_k);

        debug!(
            retrieved = scored.len(),
            top_k = query.top_k,
            "Embedding retrieval complete"
        );
        Ok(scored)
    }

    fn name(&self) -> &'static str {
        "EmbeddingRetriever"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FirstWordEmbedder;

    #[async_trait]
    impl Embedder for FirstWordEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            // Deterministic toy embedding: direction keyed on the first byte.
            let first = text.bytes().next().unwrap_or(0) as f32;
            Ok(vec![first, 1.0])
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    #[tokio::test]
    async fn test_store_write_and_lookup() {
        let store = InMemoryDocumentStore::new();
        let doc = Document::new("content");
        let id = doc.id;

        store.write_documents(vec![doc]).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.get_document(id).await.unwrap().is_some());
        assert!(store.get_document(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_replaces_by_id() {
        let store = InMemoryDocumentStore::new();
        let doc = Document::new("old");
        let id = doc.id;
        store.write_documents(vec![doc]).await.unwrap();

        store
            .write_documents(vec![Document::with_id(id, "new")])
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(
            store.get_document(id).await.unwrap().unwrap().content,
            "new"
        );
    }

    #[test]
    fn test_cosine_similarity() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]), 1.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[tokio::test]
    async fn test_retrieval_ranks_by_similarity() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let close = Document::new("close").with_embedding(vec![1.0, 0.0]);
        let far = Document::new("far").with_embedding(vec![0.0, 1.0]);
        let close_id = close.id;
        store
            .write_documents(vec![far.clone(), close.clone()])
            .await
            .unwrap();

        let retriever = EmbeddingRetriever::new(store, Arc::new(FirstWordEmbedder));
        let query = Query::new("ignored")
            .with_embedding(vec![1.0, 0.0])
            .with_top_k(1);

        let results = retriever.retrieve(&query).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id(), close_id);
    }

    #[tokio::test]
    async fn test_retrieval_skips_unembedded_documents() {
        let store = Arc::new(InMemoryDocumentStore::new());
        store
            .write_documents(vec![Document::new("no embedding")])
            .await
            .unwrap();

        let retriever = EmbeddingRetriever::new(store, Arc::new(FirstWordEmbedder));
        let results = retriever.retrieve(&Query::new("query")).await.unwrap();
        assert!(results.is_empty());
    }
}
