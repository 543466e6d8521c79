use async_trait::async_trait;
use thiserror::Error;

use crate::application::dto::{SortField, SortOrder};
use crate::domain::entities::Document;
use crate::domain::value_objects::{DocumentId, DocumentName, Locator};
#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for the metadata catalog, the system of record for document existence.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, RepositoryError>;

    /// Lookup by unique name; used as the upload fast-path uniqueness check.
    async fn find_by_name(
        &self,
        name: &DocumentName,
    ) -> Result<Option<Document>, RepositoryError>;

    /// Insert if the id is unseen, otherwise update. Returns the row as
    /// persisted, reflecting server-assigned timestamps.
    async fn save(&self, document: &Document) -> Result<Document, RepositoryError>;

    /// Idempotent: deleting a non-existent id is not an error at this layer.
    async fn delete(&self, id: &DocumentId) -> Result<(), RepositoryError>;

    /// Page of documents; sort field and order are typed so only allow-listed
    /// columns ever reach the query text.
    async fn find_page(
        &self,
        offset: i64,
        limit: i64,
        sort_field: SortField,
        sort_order: SortOrder,
    ) -> Result<Vec<Document>, RepositoryError>;

    async fn count_all(&self) -> Result<i64, RepositoryError>;

    /// Sum of document sizes in bytes, 0 when the catalog is empty.
    async fn total_size_all(&self) -> Result<i64, RepositoryError>;

    /// Every locator the catalog references; input to orphan reconciliation.
    async fn find_all_locators(&self) -> Result<Vec<Locator>, RepositoryError>;
}
