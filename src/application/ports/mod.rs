mod content_store;
mod document_repository;

pub use content_store::{ContentStore, StorageError};
pub use document_repository::{DocumentRepository, RepositoryError};

#[cfg(test)]
pub use content_store::MockContentStore;
#[cfg(test)]
pub use document_repository::MockDocumentRepository;
