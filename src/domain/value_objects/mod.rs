mod content_type;
mod document_id;
mod document_name;
mod document_size;
mod locator;

pub use content_type::ContentType;
pub use document_id::DocumentId;
pub use document_name::DocumentName;
pub use document_size::DocumentSize;
pub use locator::Locator;
