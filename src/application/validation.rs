//! Request-shape and content validation helpers shared by the use cases.

use crate::application::dto::UploadRequest;
use crate::application::errors::DocumentUseCaseError;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{ContentType, DocumentName};

/// Shape checks that run before any value-object construction: the fields
/// must be present and the content must be textual.
pub fn validate_upload_request(request: &UploadRequest) -> Result<(), DocumentUseCaseError> {
    if request.file_name.trim().is_empty() {
        return Err(DocumentUseCaseError::InvalidRequest(
            "file name is required".to_string(),
        ));
    }
    if request.content.is_empty() {
        return Err(DocumentUseCaseError::InvalidRequest(
            "content is required and cannot be empty".to_string(),
        ));
    }
    if std::str::from_utf8(&request.content).is_err() {
        return Err(DocumentUseCaseError::InvalidRequest(
            "content must be valid UTF-8 text".to_string(),
        ));
    }
    Ok(())
}

/// Caller-supplied content types must be in the enumerated set and must match
/// the name's extension; absent ones are detected from the extension.
pub fn resolve_content_type(
    supplied: Option<&str>,
    name: &DocumentName,
) -> Result<ContentType, DomainError> {
    let detected = ContentType::from_extension(name.extension());
    match supplied {
        None => Ok(detected),
        Some(raw) => {
            let content_type: ContentType = raw.parse()?;
            if content_type != detected {
                return Err(DomainError::InvalidContentType(format!(
                    "'{content_type}' does not match the .{} extension",
                    name.extension()
                )));
            }
            Ok(content_type)
        }
    }
}

/// Best-effort sanity check, not schema validation: JSON must parse, the two
/// text types accept any UTF-8 string.
pub fn validate_content(content: &[u8], content_type: ContentType) -> bool {
    match content_type {
        ContentType::Json => serde_json::from_slice::<serde_json::Value>(content).is_ok(),
        ContentType::PlainText | ContentType::Markdown => {
            std::str::from_utf8(content).is_ok()
        }
    }
}
