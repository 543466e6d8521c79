use std::sync::Arc;
use tracing::error;

use crate::application::dto::{DocumentContentDto, DocumentDto};
use crate::application::errors::DocumentUseCaseError;
use crate::application::ports::{ContentStore, DocumentRepository, StorageError};
use crate::application::validation::validate_content;
use crate::domain::value_objects::DocumentId;

/// Use case: read a document's content by id.
///
/// A catalog row whose locator resolves to no content object is a consistency
/// fault, reported as `Corruption` rather than `NotFound` so operators can
/// tell "never existed" from "data integrity broken".
pub struct GetDocumentContentUseCase {
    catalog: Arc<dyn DocumentRepository>,
    content_store: Arc<dyn ContentStore>,
}

impl GetDocumentContentUseCase {
    pub fn new(catalog: Arc<dyn DocumentRepository>, content_store: Arc<dyn ContentStore>) -> Self {
        Self {
            catalog,
            content_store,
        }
    }

    pub async fn execute(&self, id: &str) -> Result<DocumentContentDto, DocumentUseCaseError> {
        let id: DocumentId = id.parse()?;

        let document = self
            .catalog
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DocumentUseCaseError::NotFound(format!("no document with id {id}")))?;

        let content = match self.content_store.read(document.locator()).await {
            Ok(content) => content,
            Err(StorageError::NotFound(_)) => {
                error!(
                    %id,
                    locator = %document.locator(),
                    "catalog row references a missing content object"
                );
                return Err(DocumentUseCaseError::Corruption(format!(
                    "content object for document {id} is missing from the store"
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if !validate_content(&content, document.content_type()) {
            error!(
                %id,
                content_type = %document.content_type(),
                "stored content no longer validates against its content type"
            );
            return Err(DocumentUseCaseError::Corruption(format!(
                "stored content for document {id} is not valid {}",
                document.content_type()
            )));
        }

        let content = String::from_utf8(content).map_err(|_| {
            DocumentUseCaseError::Corruption(format!(
                "stored content for document {id} is not valid UTF-8"
            ))
        })?;

        Ok(DocumentContentDto {
            document: DocumentDto::from(document),
            content,
        })
    }
}
