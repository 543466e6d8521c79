use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid document name: {0}")]
    InvalidName(String),

    #[error("Document size must be at least 1 byte")]
    EmptyContent,

    #[error("Document size exceeds maximum allowed: {size} > {max}")]
    SizeExceedsMaximum { size: u64, max: u64 },

    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    #[error("Invalid document id: {0}")]
    InvalidId(String),

    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    #[error("Invalid sort parameter: {0}")]
    InvalidSort(String),
}
