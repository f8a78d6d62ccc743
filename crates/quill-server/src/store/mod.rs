//! Persistence backends for documents.
//!
//! Handlers only see [`DocumentStore`]; the concrete backend is chosen once
//! at startup and shared through the router state.

mod memory;
mod postgres;

use async_trait::async_trait;
use quill_shared::Document;
use uuid::Uuid;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Validated fields for a new document. Content is already sanitized.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
}

/// Full replacement of the editable fields of a document.
#[derive(Debug, Clone)]
pub struct DocumentChanges {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents, most recently updated first.
    async fn list(&self) -> Result<Vec<Document>, StoreError>;

    /// Assigns the id and both timestamps.
    async fn insert(&self, doc: NewDocument) -> Result<Document, StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<Document>, StoreError>;

    /// Returns `None` when no document has this id. `updated_at` strictly
    /// increases; `author` and `created_at` are left alone.
    async fn update(
        &self,
        id: Uuid,
        changes: DocumentChanges,
    ) -> Result<Option<Document>, StoreError>;

    /// Returns whether a document was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
