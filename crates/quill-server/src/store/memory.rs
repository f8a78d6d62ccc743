use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use quill_shared::Document;
use uuid::Uuid;

use super::{DocumentChanges, DocumentStore, NewDocument, StoreError};

/// Process-local store used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    documents: HashMap<Uuid, Document>,
    last_stamp: Option<DateTime<Utc>>,
}

impl Inner {
    /// Wall-clock time, bumped so no two writes share a timestamp.
    fn next_stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("document store lock poisoned".to_string()))
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self) -> Result<Vec<Document>, StoreError> {
        let inner = self.lock()?;
        let mut documents: Vec<Document> = inner.documents.values().cloned().collect();
        documents.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(documents)
    }

    async fn insert(&self, doc: NewDocument) -> Result<Document, StoreError> {
        let mut inner = self.lock()?;
        let now = inner.next_stamp();

        // v4 ids are random; retry on the astronomically unlikely clash.
        let mut id = Uuid::new_v4();
        while inner.documents.contains_key(&id) {
            id = Uuid::new_v4();
        }

        let document = Document {
            id,
            title: doc.title,
            content: doc.content,
            author: doc.author,
            tags: doc.tags,
            created_at: now,
            updated_at: now,
        };
        inner.documents.insert(id, document.clone());
        Ok(document)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Document>, StoreError> {
        Ok(self.lock()?.documents.get(&id).cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: DocumentChanges,
    ) -> Result<Option<Document>, StoreError> {
        let mut inner = self.lock()?;
        let now = inner.next_stamp();

        let Some(document) = inner.documents.get_mut(&id) else {
            return Ok(None);
        };
        document.title = changes.title;
        document.content = changes.content;
        document.tags = changes.tags;
        document.updated_at = now;

        Ok(Some(document.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.lock()?.documents.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_doc(title: &str) -> NewDocument {
        NewDocument {
            title: title.to_string(),
            content: String::new(),
            author: "Anonymous".to_string(),
            tags: Vec::new(),
        }
    }

    fn changes(title: &str) -> DocumentChanges {
        DocumentChanges {
            title: title.to_string(),
            content: "<p>new</p>".to_string(),
            tags: vec!["x".to_string()],
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_equal_timestamps() {
        let store = MemoryDocumentStore::new();
        let doc = store.insert(new_doc("a")).await.unwrap();

        assert_eq!(doc.created_at, doc.updated_at);
        assert_eq!(store.find(doc.id).await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn update_keeps_author_and_created_at() {
        let store = MemoryDocumentStore::new();
        let doc = store.insert(new_doc("a")).await.unwrap();

        let updated = store.update(doc.id, changes("b")).await.unwrap().unwrap();

        assert_eq!(updated.title, "b");
        assert_eq!(updated.tags, vec!["x"]);
        assert_eq!(updated.author, doc.author);
        assert_eq!(updated.created_at, doc.created_at);
        assert!(updated.updated_at > doc.updated_at);
    }

    #[tokio::test]
    async fn back_to_back_updates_strictly_increase() {
        let store = MemoryDocumentStore::new();
        let doc = store.insert(new_doc("a")).await.unwrap();

        let mut last = doc.updated_at;
        for i in 0..50 {
            let updated = store
                .update(doc.id, changes(&format!("t{i}")))
                .await
                .unwrap()
                .unwrap();
            assert!(updated.updated_at > last);
            last = updated.updated_at;
        }
    }

    #[tokio::test]
    async fn list_is_most_recently_updated_first() {
        let store = MemoryDocumentStore::new();
        let first = store.insert(new_doc("first")).await.unwrap();
        let second = store.insert(new_doc("second")).await.unwrap();
        let third = store.insert(new_doc("third")).await.unwrap();
        store.update(second.id, changes("second")).await.unwrap();

        let ids: Vec<Uuid> = store.list().await.unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![second.id, third.id, first.id]);
    }

    #[tokio::test]
    async fn missing_ids_report_absence() {
        let store = MemoryDocumentStore::new();
        let id = Uuid::new_v4();

        assert_eq!(store.find(id).await.unwrap(), None);
        assert!(store.update(id, changes("x")).await.unwrap().is_none());
        assert!(!store.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn update_of_missing_id_leaves_documents_untouched() {
        let store = MemoryDocumentStore::new();
        let doc = store.insert(new_doc("a")).await.unwrap();

        assert!(store.update(Uuid::new_v4(), changes("x")).await.unwrap().is_none());
        assert_eq!(store.list().await.unwrap(), vec![doc.clone()]);

        let updated = store.update(doc.id, changes("b")).await.unwrap().unwrap();
        assert!(updated.updated_at > doc.updated_at);
    }

    #[tokio::test]
    async fn delete_is_final() {
        let store = MemoryDocumentStore::new();
        let doc = store.insert(new_doc("a")).await.unwrap();

        assert!(store.delete(doc.id).await.unwrap());
        assert!(!store.delete(doc.id).await.unwrap());
        assert_eq!(store.find(doc.id).await.unwrap(), None);
        assert!(store.list().await.unwrap().is_empty());
    }
}
