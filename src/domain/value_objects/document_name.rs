use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::validation::{contains_forbidden_chars, is_reserved_name};

/// Validated document filename.
///
/// The name is trimmed on construction and then checked, in order: emptiness,
/// length bounds, extension allow-list, forbidden characters, reserved device
/// names, trailing space/period on the stem. Each rule fails with its own
/// message so callers can tell which rule was violated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentName(String);

impl DocumentName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 255;
    const ALLOWED_EXTENSIONS: [&'static str; 3] = ["txt", "md", "json"];

    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(DomainError::InvalidName(
                "Document name cannot be empty".to_string(),
            ));
        }

        let length = name.chars().count();
        if length < Self::MIN_LENGTH || length > Self::MAX_LENGTH {
            return Err(DomainError::InvalidName(format!(
                "Document name must be between {} and {} characters, got {}",
                Self::MIN_LENGTH,
                Self::MAX_LENGTH,
                length
            )));
        }

        let extension = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext,
            _ => "",
        };
        if !Self::ALLOWED_EXTENSIONS.contains(&extension.to_lowercase().as_str()) {
            return Err(DomainError::InvalidName(
                "Document name extension must be one of .txt, .md, .json".to_string(),
            ));
        }

        if contains_forbidden_chars(name) {
            return Err(DomainError::InvalidName(
                "Document name contains forbidden characters".to_string(),
            ));
        }

        let stem = &name[..name.len() - extension.len() - 1];
        if is_reserved_name(stem) {
            return Err(DomainError::InvalidName(format!(
                "Document name '{stem}' is a reserved device name"
            )));
        }

        if stem.ends_with(' ') || stem.ends_with('.') {
            return Err(DomainError::InvalidName(
                "Document name must not have a trailing space or period before the extension"
                    .to_string(),
            ));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extension without the leading dot, e.g. "txt".
    pub fn extension(&self) -> &str {
        self.0.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
    }

    /// Name without the extension and its dot.
    pub fn stem(&self) -> &str {
        self.0.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(&self.0)
    }
}

impl std::fmt::Display for DocumentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DocumentName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DocumentName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<DocumentName> for String {
    fn from(name: DocumentName) -> Self {
        name.0
    }
}
