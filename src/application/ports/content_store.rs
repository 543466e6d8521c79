use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::value_objects::{DocumentName, Locator};
#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Content not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port for the content store holding the raw document bytes, one object per
/// locator.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Idempotent setup (create the storage root). Called once at process
    /// start by the composition root, never by use cases.
    async fn ensure_ready(&self) -> Result<(), StorageError>;

    /// Write content under a freshly generated, collision-resistant locator
    /// and return it. Never overwrites an existing object.
    async fn store(
        &self,
        content: &[u8],
        suggested_name: &DocumentName,
    ) -> Result<Locator, StorageError>;

    /// Fails with `StorageError::NotFound` when the object is absent.
    async fn read(&self, locator: &Locator) -> Result<Vec<u8>, StorageError>;

    /// Idempotent: deleting an absent object is success.
    async fn delete(&self, locator: &Locator) -> Result<(), StorageError>;

    async fn exists(&self, locator: &Locator) -> Result<bool, StorageError>;

    /// Remove every object whose locator is not in `known` and return the
    /// removed locators. Maintenance-window reconciliation only; must not run
    /// concurrently with in-flight uploads.
    async fn cleanup_orphans(
        &self,
        known: &HashSet<Locator>,
    ) -> Result<Vec<Locator>, StorageError>;
}
