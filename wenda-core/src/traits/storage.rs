//! Document storage traits.
//!
//! A document store holds the candidate documents retrievers search over.
//! This slice only needs writing, lookup by id, and counting.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{Result, types::Document};

/// Stores documents for retrieval.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Write documents to the store.
    ///
    /// Documents with an id already present in the store are replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    async fn write_documents(&self, documents: Vec<Document>) -> Result<()>;

    /// Get a document by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read. A missing document is
    /// `Ok(None)`, not an error.
    async fn get_document(&self, id: Uuid) -> Result<Option<Document>>;

    /// All documents in the store, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    async fn get_all_documents(&self) -> Result<Vec<Document>>;

    /// Number of documents in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    async fn count(&self) -> Result<usize>;

    /// Get a human-readable name for this store.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
