use serde::{Deserialize, Serialize};

use crate::domain::entities::Document;
use crate::domain::errors::DomainError;

/// Metadata response shape for a single document. The locator never leaves
/// the core; it is an implementation detail of the content store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDto {
    pub id: String,
    pub name: String,
    pub size_bytes: u64,
    pub size_human: String,
    pub content_type: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Document> for DocumentDto {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id().to_string(),
            name: doc.name().to_string(),
            size_bytes: doc.size().bytes(),
            size_human: doc.human_size(),
            content_type: doc.content_type().to_string(),
            created_at: doc.created_at().to_rfc3339(),
            updated_at: doc.updated_at().to_rfc3339(),
        }
    }
}

/// Upload request as decoded by the external HTTP collaborator.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub content: Vec<u8>,
    /// When absent, the content type is detected from the name's extension.
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub documents: Vec<DocumentDto>,
    pub page: i64,
    pub limit: i64,
    pub total_count: i64,
    pub total_size_bytes: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Full metadata plus content, returned by the get-content use case.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentContentDto {
    pub document: DocumentDto,
    pub content: String,
}

/// Allow-listed sort columns for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    CreatedAt,
    Size,
}

impl std::str::FromStr for SortField {
    type Err = DomainError;

    /// Accepts the core names plus the HTTP-facing aliases, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" | "filename" => Ok(Self::Name),
            "createdat" | "created_at" => Ok(Self::CreatedAt),
            "size" | "filesize" => Ok(Self::Size),
            other => Err(DomainError::InvalidSort(format!(
                "'{other}' is not one of name, createdAt, size"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(DomainError::InvalidSort(format!(
                "'{other}' is not one of ASC, DESC"
            ))),
        }
    }
}
