mod delete_document;
mod get_document_content;
mod list_documents;
mod upload_document;

pub use delete_document::DeleteDocumentUseCase;
pub use get_document_content::GetDocumentContentUseCase;
pub use list_documents::ListDocumentsUseCase;
pub use upload_document::UploadDocumentUseCase;
