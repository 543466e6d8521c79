use chrono::{DateTime, Utc};

use crate::domain::value_objects::{
    ContentType, DocumentId, DocumentName, DocumentSize, Locator,
};

/// Document aggregate root: validated metadata for one stored text document.
///
/// Construction is the only place invariants are enforced. The value-object
/// constructors are the sole way to obtain a `DocumentName`, `DocumentSize`,
/// `ContentType` or `Locator`, so a `Document` cannot exist with an invalid
/// field and carries no setters that could invalidate it later.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    name: DocumentName,
    locator: Locator,
    size: DocumentSize,
    content_type: ContentType,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Document {
    /// Create a fresh document with a newly assigned id and current timestamps.
    /// Called by the upload use case only after content is durably stored.
    pub fn new(
        name: DocumentName,
        locator: Locator,
        size: DocumentSize,
        content_type: ContentType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new(),
            name,
            locator,
            size,
            content_type,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct from the catalog.
    pub fn reconstruct(
        id: DocumentId,
        name: DocumentName,
        locator: Locator,
        size: DocumentSize,
        content_type: ContentType,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            locator,
            size,
            content_type,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn name(&self) -> &DocumentName {
        &self.name
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn size(&self) -> DocumentSize {
        self.size
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn extension(&self) -> &str {
        self.name.extension()
    }

    pub fn human_size(&self) -> String {
        self.size.format()
    }

    pub fn is_text(&self) -> bool {
        self.content_type.is_text()
    }

    pub fn is_json(&self) -> bool {
        self.content_type.is_json()
    }
}

// Entity identity: two documents are the same entity iff their ids match,
// regardless of metadata differences between loaded copies.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Document {}
