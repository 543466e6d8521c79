//! Shared failure taxonomy for the document use cases.
//!
//! The external HTTP collaborator maps variants to responses:
//! `Domain`/`InvalidRequest` → 400 (except `DomainError::SizeExceedsMaximum`,
//! which maps to 413), `Conflict` → 409, `NotFound` → 404,
//! `Corruption`/`CriticalInconsistency` → 500, everything else → 500.

use thiserror::Error;

use crate::application::ports::{RepositoryError, StorageError};
use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum DocumentUseCaseError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The catalog and the content store disagree about a document. Logged at
    /// error severity before being returned; the caller cannot self-correct.
    #[error("Corruption detected: {0}")]
    Corruption(String),

    /// A multi-store operation failed and the compensating action failed too.
    /// Both causes are surfaced so an operator can see what state remains.
    #[error("Critical inconsistency: {cause}; compensating restore also failed: {restore_failure}")]
    CriticalInconsistency {
        cause: String,
        restore_failure: String,
    },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
