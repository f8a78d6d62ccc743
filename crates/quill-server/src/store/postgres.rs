use async_trait::async_trait;
use chrono::Utc;
use quill_shared::Document;
use uuid::Uuid;

use super::{DocumentChanges, DocumentStore, NewDocument, StoreError};
use crate::db::DbPool;

const DOCUMENT_COLUMNS: &str = "id, title, content, author, tags, created_at, updated_at";

pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list(&self) -> Result<Vec<Document>, StoreError> {
        let documents: Vec<Document> = sqlx::query_as(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY updated_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    async fn insert(&self, doc: NewDocument) -> Result<Document, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let document: Document = sqlx::query_as(&format!(
            r#"
            INSERT INTO documents (id, title, content, author, tags, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {DOCUMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&doc.title)
        .bind(&doc.content)
        .bind(&doc.author)
        .bind(&doc.tags)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = %document.id, "document inserted");
        Ok(document)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Document>, StoreError> {
        let document: Option<Document> = sqlx::query_as(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: DocumentChanges,
    ) -> Result<Option<Document>, StoreError> {
        // GREATEST keeps updated_at strictly increasing within one clock tick.
        let document: Option<Document> = sqlx::query_as(&format!(
            r#"
            UPDATE documents
            SET title = $1,
                content = $2,
                tags = $3,
                updated_at = GREATEST($4, updated_at + INTERVAL '1 microsecond')
            WHERE id = $5
            RETURNING {DOCUMENT_COLUMNS}
            "#
        ))
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(&changes.tags)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if document.is_some() {
            tracing::debug!(%id, "document updated");
        }
        Ok(document)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
