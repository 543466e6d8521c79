use std::sync::Arc;
use tracing::{error, warn};

use crate::application::errors::DocumentUseCaseError;
use crate::application::ports::{ContentStore, DocumentRepository};
use crate::domain::value_objects::DocumentId;

/// Use case: delete a document from both stores.
///
/// The catalog row goes first, then the content object. A failed content
/// deletion is recovered by restoring the catalog row, leaving the document
/// logically present and the system consistent. The reverse ordering would
/// risk a row pointing at nothing, which reads as corruption to every
/// subsequent content fetch, so it must not be changed.
pub struct DeleteDocumentUseCase {
    catalog: Arc<dyn DocumentRepository>,
    content_store: Arc<dyn ContentStore>,
}

impl DeleteDocumentUseCase {
    pub fn new(catalog: Arc<dyn DocumentRepository>, content_store: Arc<dyn ContentStore>) -> Self {
        Self {
            catalog,
            content_store,
        }
    }

    pub async fn execute(&self, id: &str) -> Result<(), DocumentUseCaseError> {
        let id: DocumentId = id.parse()?;

        let document = self
            .catalog
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DocumentUseCaseError::NotFound(format!("no document with id {id}")))?;

        self.catalog.delete(&id).await?;

        if let Err(delete_err) = self.content_store.delete(document.locator()).await {
            warn!(
                %id,
                locator = %document.locator(),
                error = %delete_err,
                "content deletion failed after catalog row removal, restoring row"
            );
            return match self.catalog.save(&document).await {
                Ok(_) => Err(DocumentUseCaseError::Storage(delete_err)),
                Err(restore_err) => {
                    error!(
                        %id,
                        locator = %document.locator(),
                        delete_error = %delete_err,
                        restore_error = %restore_err,
                        "catalog restore failed; content object is orphaned with no catalog row"
                    );
                    Err(DocumentUseCaseError::CriticalInconsistency {
                        cause: delete_err.to_string(),
                        restore_failure: restore_err.to_string(),
                    })
                }
            };
        }

        Ok(())
    }
}
