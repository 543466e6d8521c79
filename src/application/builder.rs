//! Composition root: explicit dependency wiring for the use cases.
//!
//! Every collaborator is constructed here and handed to the use cases through
//! their constructors; there is no ambient global connection anywhere in the
//! crate.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::application::errors::DocumentUseCaseError;
use crate::application::ports::{ContentStore, DocumentRepository};
use crate::application::use_cases::{
    DeleteDocumentUseCase, GetDocumentContentUseCase, ListDocumentsUseCase,
    UploadDocumentUseCase,
};
use crate::config::Config;
use crate::domain::value_objects::Locator;
use crate::infrastructure::{
    persistence::PostgresDocumentRepository, storage::LocalContentStore,
};

/// Fully wired use cases plus the two store handles.
pub struct Services {
    pub upload: Arc<UploadDocumentUseCase>,
    pub list: Arc<ListDocumentsUseCase>,
    pub get_content: Arc<GetDocumentContentUseCase>,
    pub delete: Arc<DeleteDocumentUseCase>,
    catalog: Arc<dyn DocumentRepository>,
    content_store: Arc<dyn ContentStore>,
}

impl Services {
    /// Sweep the content store for objects the catalog does not reference and
    /// remove them. Maintenance-window reconciliation only: running this
    /// concurrently with uploads could sweep content stored between the scan
    /// and the catalog save.
    pub async fn reconcile_content_store(&self) -> Result<Vec<Locator>, DocumentUseCaseError> {
        let known: HashSet<Locator> = self
            .catalog
            .find_all_locators()
            .await?
            .into_iter()
            .collect();

        let removed = self.content_store.cleanup_orphans(&known).await?;
        if !removed.is_empty() {
            info!(count = removed.len(), "removed orphaned content objects");
        }
        Ok(removed)
    }
}

/// Builder wiring config → pool → repositories → use cases.
pub struct ServicesBuilder {
    config: Config,
    catalog: Option<Arc<dyn DocumentRepository>>,
    content_store: Option<Arc<dyn ContentStore>>,
}

impl ServicesBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            catalog: None,
            content_store: None,
        }
    }

    /// Connect the catalog pool with retry and run migrations.
    pub async fn with_database(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Connecting to catalog database");

        let mut retries = 3;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .connect(&self.config.database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    warn!(
                        "Catalog connection failed, retrying in {:?} ({} retries left): {}",
                        delay, retries, e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => return Err(Box::new(e)),
            }
        };

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Catalog migrations applied");

        self.catalog = Some(Arc::new(PostgresDocumentRepository::new(pool)));
        Ok(self)
    }

    /// Create the filesystem content store and make its root ready.
    pub async fn with_content_store(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let store = LocalContentStore::new(self.config.content_root.clone());
        store.ensure_ready().await?;
        info!(root = %self.config.content_root.display(), "Content store ready");

        self.content_store = Some(Arc::new(store));
        Ok(self)
    }

    /// Inject an already-built catalog, e.g. an in-memory one in tests.
    pub fn with_catalog(mut self, catalog: Arc<dyn DocumentRepository>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn ContentStore>) -> Self {
        self.content_store = Some(store);
        self
    }

    pub fn build(self) -> Result<Services, Box<dyn std::error::Error>> {
        let catalog = self
            .catalog
            .ok_or("catalog not configured: call with_database or with_catalog")?;
        let content_store = self
            .content_store
            .ok_or("content store not configured: call with_content_store or with_store")?;

        Ok(Services {
            upload: Arc::new(UploadDocumentUseCase::new(
                Arc::clone(&catalog),
                Arc::clone(&content_store),
            )),
            list: Arc::new(ListDocumentsUseCase::new(Arc::clone(&catalog))),
            get_content: Arc::new(GetDocumentContentUseCase::new(
                Arc::clone(&catalog),
                Arc::clone(&content_store),
            )),
            delete: Arc::new(DeleteDocumentUseCase::new(
                Arc::clone(&catalog),
                Arc::clone(&content_store),
            )),
            catalog,
            content_store,
        })
    }
}
