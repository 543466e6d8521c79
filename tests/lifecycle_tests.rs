//! Lifecycle tests for the document use cases, run against the real
//! filesystem content store and an in-memory catalog that mirrors the
//! relational schema's constraints (unique name, id upsert).

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use docstore::application::builder::{Services, ServicesBuilder};
use docstore::application::dto::{ListRequest, SortField, SortOrder, UploadRequest};
use docstore::application::errors::DocumentUseCaseError;
use docstore::application::ports::{
    ContentStore, DocumentRepository, RepositoryError, StorageError,
};
use docstore::config::Config;
use docstore::domain::entities::Document;
use docstore::domain::value_objects::{DocumentId, DocumentName, Locator};
use docstore::infrastructure::storage::LocalContentStore;

/// Catalog fake with the same observable behavior as the Postgres repository.
#[derive(Default)]
struct InMemoryCatalog {
    rows: Mutex<HashMap<DocumentId, Document>>,
    fail_saves: AtomicBool,
}

impl InMemoryCatalog {
    fn fail_next_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, RepositoryError> {
        Ok(self.rows.lock().unwrap().get(id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &DocumentName,
    ) -> Result<Option<Document>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|doc| doc.name() == name)
            .cloned())
    }

    async fn save(&self, document: &Document) -> Result<Document, RepositoryError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::Serialization("injected save failure".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        let duplicate_name = rows
            .values()
            .any(|doc| doc.name() == document.name() && doc.id() != document.id());
        if duplicate_name {
            return Err(RepositoryError::ConstraintViolation(
                "documents_name_key".to_string(),
            ));
        }
        rows.insert(*document.id(), document.clone());
        Ok(document.clone())
    }

    async fn delete(&self, id: &DocumentId) -> Result<(), RepositoryError> {
        self.rows.lock().unwrap().remove(id);
        Ok(())
    }

    async fn find_page(
        &self,
        offset: i64,
        limit: i64,
        sort_field: SortField,
        sort_order: SortOrder,
    ) -> Result<Vec<Document>, RepositoryError> {
        let mut docs: Vec<Document> = self.rows.lock().unwrap().values().cloned().collect();
        docs.sort_by(|a, b| {
            let ordering = match sort_field {
                SortField::Name => a.name().as_str().cmp(b.name().as_str()),
                SortField::CreatedAt => a
                    .created_at()
                    .cmp(&b.created_at())
                    .then_with(|| a.name().as_str().cmp(b.name().as_str())),
                SortField::Size => a
                    .size()
                    .cmp(&b.size())
                    .then_with(|| a.name().as_str().cmp(b.name().as_str())),
            };
            match sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        Ok(docs
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_all(&self) -> Result<i64, RepositoryError> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn total_size_all(&self) -> Result<i64, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .map(|doc| doc.size().bytes() as i64)
            .sum())
    }

    async fn find_all_locators(&self) -> Result<Vec<Locator>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .map(|doc| doc.locator().clone())
            .collect())
    }
}

/// Content store wrapper whose delete can be armed to fail.
struct FlakyDeleteStore {
    inner: LocalContentStore,
    fail_deletes: AtomicBool,
}

impl FlakyDeleteStore {
    fn new(inner: LocalContentStore) -> Self {
        Self {
            inner,
            fail_deletes: AtomicBool::new(false),
        }
    }

    fn fail_next_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContentStore for FlakyDeleteStore {
    async fn ensure_ready(&self) -> Result<(), StorageError> {
        self.inner.ensure_ready().await
    }

    async fn store(
        &self,
        content: &[u8],
        suggested_name: &DocumentName,
    ) -> Result<Locator, StorageError> {
        self.inner.store(content, suggested_name).await
    }

    async fn read(&self, locator: &Locator) -> Result<Vec<u8>, StorageError> {
        self.inner.read(locator).await
    }

    async fn delete(&self, locator: &Locator) -> Result<(), StorageError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::Internal("injected delete failure".to_string()));
        }
        self.inner.delete(locator).await
    }

    async fn exists(&self, locator: &Locator) -> Result<bool, StorageError> {
        self.inner.exists(locator).await
    }

    async fn cleanup_orphans(
        &self,
        known: &HashSet<Locator>,
    ) -> Result<Vec<Locator>, StorageError> {
        self.inner.cleanup_orphans(known).await
    }
}

struct TestEnvironment {
    services: Services,
    catalog: Arc<InMemoryCatalog>,
    store: Arc<FlakyDeleteStore>,
    root: TempDir,
}

async fn setup() -> TestEnvironment {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("docstore=debug")
        .with_test_writer()
        .try_init();

    let root = TempDir::new().unwrap();
    let catalog = Arc::new(InMemoryCatalog::default());
    let store = Arc::new(FlakyDeleteStore::new(LocalContentStore::new(
        root.path().to_path_buf(),
    )));
    store.ensure_ready().await.unwrap();

    let services = ServicesBuilder::new(Config::from_env())
        .with_catalog(catalog.clone())
        .with_store(store.clone())
        .build()
        .unwrap();

    TestEnvironment {
        services,
        catalog,
        store,
        root,
    }
}

fn upload(name: &str, content: &[u8]) -> UploadRequest {
    UploadRequest {
        file_name: name.to_string(),
        content: content.to_vec(),
        content_type: None,
    }
}

fn stored_object_count(env: &TestEnvironment) -> usize {
    std::fs::read_dir(env.root.path().join("objects")).unwrap().count()
}

#[tokio::test]
async fn end_to_end_upload_get_delete() {
    let env = setup().await;

    let dto = env
        .services
        .upload
        .execute(upload("notes.txt", b"hello"))
        .await
        .unwrap();
    assert_eq!(dto.size_bytes, 5);
    assert_eq!(dto.size_human, "5 bytes");
    assert_eq!(dto.content_type, "text/plain");

    let fetched = env.services.get_content.execute(&dto.id).await.unwrap();
    assert_eq!(fetched.content, "hello");
    assert_eq!(fetched.document.name, "notes.txt");

    env.services.delete.execute(&dto.id).await.unwrap();
    assert_eq!(stored_object_count(&env), 0);

    let err = env.services.get_content.execute(&dto.id).await.unwrap_err();
    assert!(matches!(err, DocumentUseCaseError::NotFound(_)));
}

#[tokio::test]
async fn duplicate_upload_leaves_single_object() {
    let env = setup().await;

    env.services
        .upload
        .execute(upload("notes.txt", b"first"))
        .await
        .unwrap();

    let err = env
        .services
        .upload
        .execute(upload("notes.txt", b"second"))
        .await
        .unwrap_err();

    assert!(matches!(err, DocumentUseCaseError::Conflict(_)));
    assert_eq!(stored_object_count(&env), 1);
    assert_eq!(env.catalog.count_all().await.unwrap(), 1);
}

#[tokio::test]
async fn failed_save_removes_stored_content() {
    let env = setup().await;

    env.catalog.fail_next_saves(true);
    let err = env
        .services
        .upload
        .execute(upload("notes.txt", b"hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, DocumentUseCaseError::Repository(_)));
    // The compensating delete removed the freshly stored object.
    assert_eq!(stored_object_count(&env), 0);
    assert_eq!(env.catalog.count_all().await.unwrap(), 0);
}

#[tokio::test]
async fn failed_content_delete_restores_catalog_row() {
    let env = setup().await;

    let dto = env
        .services
        .upload
        .execute(upload("notes.txt", b"hello"))
        .await
        .unwrap();

    env.store.fail_next_deletes(true);
    let err = env.services.delete.execute(&dto.id).await.unwrap_err();
    assert!(matches!(err, DocumentUseCaseError::Storage(_)));

    // The document logically still exists and its content is readable.
    env.store.fail_next_deletes(false);
    let fetched = env.services.get_content.execute(&dto.id).await.unwrap();
    assert_eq!(fetched.content, "hello");
    assert_eq!(stored_object_count(&env), 1);
}

#[tokio::test]
async fn failed_restore_surfaces_critical_inconsistency() {
    let env = setup().await;

    let dto = env
        .services
        .upload
        .execute(upload("notes.txt", b"hello"))
        .await
        .unwrap();

    env.store.fail_next_deletes(true);
    env.catalog.fail_next_saves(true);
    let err = env.services.delete.execute(&dto.id).await.unwrap_err();

    match err {
        DocumentUseCaseError::CriticalInconsistency { cause, restore_failure } => {
            assert!(cause.contains("injected delete failure"));
            assert!(restore_failure.contains("injected save failure"));
        }
        other => panic!("expected CriticalInconsistency, got {other:?}"),
    }
}

#[tokio::test]
async fn pagination_arithmetic_over_25_documents() {
    let env = setup().await;

    for n in 0..25 {
        env.services
            .upload
            .execute(upload(&format!("doc-{n:02}.txt"), b"0123456789"))
            .await
            .unwrap();
    }

    let page1 = env
        .services
        .list
        .execute(ListRequest {
            page: Some(1),
            limit: Some(10),
            sort_by: Some("name".to_string()),
            sort_order: Some("ASC".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(page1.documents.len(), 10);
    assert_eq!(page1.total_count, 25);
    assert_eq!(page1.total_size_bytes, 250);
    assert_eq!(page1.total_pages, 3);
    assert!(!page1.has_previous_page);
    assert!(page1.has_next_page);
    assert_eq!(page1.documents[0].name, "doc-00.txt");

    let page3 = env
        .services
        .list
        .execute(ListRequest {
            page: Some(3),
            limit: Some(10),
            sort_by: Some("name".to_string()),
            sort_order: Some("ASC".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(page3.documents.len(), 5);
    assert!(page3.has_previous_page);
    assert!(!page3.has_next_page);
    assert_eq!(page3.documents[4].name, "doc-24.txt");
}

#[tokio::test]
async fn list_never_returns_content() {
    let env = setup().await;

    env.services
        .upload
        .execute(upload("data.json", b"{\"secret\": 42}"))
        .await
        .unwrap();

    let response = env.services.list.execute(ListRequest::default()).await.unwrap();
    let serialized = serde_json::to_string(&response).unwrap();
    assert!(!serialized.contains("secret"));
    assert_eq!(response.documents[0].content_type, "application/json");
}

#[tokio::test]
async fn missing_content_object_reads_as_corruption() {
    let env = setup().await;

    let dto = env
        .services
        .upload
        .execute(upload("notes.txt", b"hello"))
        .await
        .unwrap();

    // Break the invariant behind the catalog's back.
    let objects = env.root.path().join("objects");
    for entry in std::fs::read_dir(&objects).unwrap() {
        std::fs::remove_file(entry.unwrap().path()).unwrap();
    }

    let err = env.services.get_content.execute(&dto.id).await.unwrap_err();
    assert!(
        matches!(err, DocumentUseCaseError::Corruption(_)),
        "expected Corruption, got {err:?}"
    );
}

#[tokio::test]
async fn reconcile_sweeps_only_unreferenced_objects() {
    let env = setup().await;

    let kept = env
        .services
        .upload
        .execute(upload("keep.txt", b"keep"))
        .await
        .unwrap();

    // An orphan: stored content whose catalog row never materialized.
    env.catalog.fail_next_saves(true);
    env.store.fail_next_deletes(true); // compensation fails too, orphan remains
    let _ = env
        .services
        .upload
        .execute(upload("orphan.txt", b"stray"))
        .await
        .unwrap_err();
    env.catalog.fail_next_saves(false);
    env.store.fail_next_deletes(false);
    assert_eq!(stored_object_count(&env), 2);

    let removed = env.services.reconcile_content_store().await.unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(stored_object_count(&env), 1);

    let fetched = env.services.get_content.execute(&kept.id).await.unwrap();
    assert_eq!(fetched.content, "keep");
}

#[tokio::test]
async fn upload_with_mismatched_content_type_rejected() {
    let env = setup().await;

    let err = env
        .services
        .upload
        .execute(UploadRequest {
            file_name: "notes.txt".to_string(),
            content: b"{}".to_vec(),
            content_type: Some("application/json".to_string()),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DocumentUseCaseError::Domain(_)));
    assert_eq!(stored_object_count(&env), 0);
}
