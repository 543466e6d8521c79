use std::sync::Arc;
use tracing::{debug, error};

use crate::application::dto::{DocumentDto, UploadRequest};
use crate::application::errors::DocumentUseCaseError;
use crate::application::ports::{ContentStore, DocumentRepository, RepositoryError};
use crate::application::validation::{
    resolve_content_type, validate_content, validate_upload_request,
};
use crate::domain::entities::Document;
use crate::domain::value_objects::{DocumentName, DocumentSize};

/// Use case: upload a document.
///
/// All validation and the name-uniqueness check run before anything is
/// written, so a rejected upload never leaves an orphaned content object.
pub struct UploadDocumentUseCase {
    catalog: Arc<dyn DocumentRepository>,
    content_store: Arc<dyn ContentStore>,
}

impl UploadDocumentUseCase {
    pub fn new(catalog: Arc<dyn DocumentRepository>, content_store: Arc<dyn ContentStore>) -> Self {
        Self {
            catalog,
            content_store,
        }
    }

    pub async fn execute(
        &self,
        request: UploadRequest,
    ) -> Result<DocumentDto, DocumentUseCaseError> {
        // 1. Request shape
        validate_upload_request(&request)?;

        // 2. Value objects
        let name = DocumentName::new(&request.file_name)?;
        let size = DocumentSize::from_content(&request.content)?;

        // 3. Content type: caller-supplied must be in the enumerated set and
        //    agree with the extension, otherwise detect from the extension
        let content_type = resolve_content_type(request.content_type.as_deref(), &name)?;

        // 4. Content sanity check
        if !validate_content(&request.content, content_type) {
            return Err(DocumentUseCaseError::InvalidRequest(format!(
                "content is not valid for content type {content_type}"
            )));
        }

        // 5. Fast-path uniqueness check; the catalog's unique constraint on
        //    name remains the final arbiter under concurrent uploads
        if self.catalog.find_by_name(&name).await?.is_some() {
            return Err(DocumentUseCaseError::Conflict(format!(
                "a document with this name already exists: {name}"
            )));
        }

        // 6. Store content, then record metadata
        let locator = self.content_store.store(&request.content, &name).await?;
        debug!(%name, %locator, size = size.bytes(), "content stored, saving catalog row");

        let document = Document::new(name, locator.clone(), size, content_type);
        let saved = match self.catalog.save(&document).await {
            Ok(saved) => saved,
            Err(save_err) => {
                // Compensate: remove the just-stored content so no orphan
                // remains. A failed compensation is logged, never re-thrown
                // over the original error.
                if let Err(cleanup_err) = self.content_store.delete(&locator).await {
                    error!(
                        %locator,
                        save_error = %save_err,
                        cleanup_error = %cleanup_err,
                        "failed to remove content object after catalog save failure; orphan remains"
                    );
                }
                return Err(match save_err {
                    RepositoryError::ConstraintViolation(msg) => {
                        DocumentUseCaseError::Conflict(format!(
                            "a document with this name already exists: {msg}"
                        ))
                    }
                    other => other.into(),
                });
            }
        };

        Ok(DocumentDto::from(saved))
    }
}
