use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Opaque reference to a stored content object.
///
/// Generated by the content store per `store()` call and recorded in the
/// catalog so metadata and content can be joined. Parsing guards against path
/// traversal when a locator is read back from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locator(String);

impl Locator {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::InvalidLocator(
                "Locator cannot be empty".to_string(),
            ));
        }
        if value.contains('/') || value.contains('\\') || value.contains("..") {
            return Err(DomainError::InvalidLocator(format!(
                "Locator '{value}' must not contain path separators"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Locator {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for Locator {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Locator> for String {
    fn from(locator: Locator) -> Self {
        locator.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_generated_shape() {
        let locator = Locator::new("550e8400-e29b-41d4-a716-446655440000.txt".to_string()).unwrap();
        assert_eq!(locator.as_str(), "550e8400-e29b-41d4-a716-446655440000.txt");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(Locator::new(String::new()).is_err());
    }

    #[test]
    fn test_rejects_path_traversal() {
        for bad in ["../escape.txt", "a/b.txt", "a\\b.txt", "..\\b.txt"] {
            assert!(Locator::new(bad.to_string()).is_err(), "should reject {bad:?}");
        }
    }
}
