//! `PgDocumentStore` against a real database.
//!
//! Each test gets a fresh database with the embedded migrations applied.
//! Run with `DATABASE_URL` pointing at a PostgreSQL server and `--ignored`.

use quill_server::store::{DocumentChanges, DocumentStore, NewDocument, PgDocumentStore};
use sqlx::PgPool;
use uuid::Uuid;

fn new_doc(title: &str, tags: &[&str]) -> NewDocument {
    NewDocument {
        title: title.to_string(),
        content: "<p>body</p>".to_string(),
        author: "Ada".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn changes(title: &str, tags: &[&str]) -> DocumentChanges {
    DocumentChanges {
        title: title.to_string(),
        content: "<p>changed</p>".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL server in DATABASE_URL"]
async fn insert_then_find_round_trips(pool: PgPool) {
    let store = PgDocumentStore::new(pool);

    let doc = store.insert(new_doc("Notes", &["b", "a", "c"])).await.unwrap();
    assert_eq!(doc.title, "Notes");
    assert_eq!(doc.author, "Ada");
    assert_eq!(doc.tags, vec!["b", "a", "c"]);
    assert_eq!(doc.created_at, doc.updated_at);

    assert_eq!(store.find(doc.id).await.unwrap(), Some(doc));
    assert_eq!(store.find(Uuid::new_v4()).await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL server in DATABASE_URL"]
async fn back_to_back_updates_strictly_increase(pool: PgPool) {
    let store = PgDocumentStore::new(pool);
    let doc = store.insert(new_doc("a", &["x"])).await.unwrap();

    let mut last = doc.updated_at;
    for i in 0..20 {
        let updated = store
            .update(doc.id, changes(&format!("t{i}"), &["y", "z"]))
            .await
            .unwrap()
            .unwrap();

        assert!(updated.updated_at > last);
        assert_eq!(updated.author, doc.author);
        assert_eq!(updated.created_at, doc.created_at);
        assert_eq!(updated.tags, vec!["y", "z"]);
        last = updated.updated_at;
    }

    assert!(store
        .update(Uuid::new_v4(), changes("x", &[]))
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL server in DATABASE_URL"]
async fn list_is_most_recently_updated_first(pool: PgPool) {
    let store = PgDocumentStore::new(pool);
    let first = store.insert(new_doc("first", &[])).await.unwrap();
    let second = store.insert(new_doc("second", &[])).await.unwrap();
    let third = store.insert(new_doc("third", &[])).await.unwrap();
    store.update(second.id, changes("second", &[])).await.unwrap();

    let ids: Vec<Uuid> = store.list().await.unwrap().iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![second.id, third.id, first.id]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL server in DATABASE_URL"]
async fn delete_is_final(pool: PgPool) {
    let store = PgDocumentStore::new(pool);
    let doc = store.insert(new_doc("a", &[])).await.unwrap();

    assert!(store.delete(doc.id).await.unwrap());
    assert!(!store.delete(doc.id).await.unwrap());
    assert_eq!(store.find(doc.id).await.unwrap(), None);
    assert!(store.list().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL server in DATABASE_URL"]
async fn schema_rejects_empty_titles(pool: PgPool) {
    let store = PgDocumentStore::new(pool);

    assert!(store.insert(new_doc("", &[])).await.is_err());
    assert!(store.list().await.unwrap().is_empty());
}
