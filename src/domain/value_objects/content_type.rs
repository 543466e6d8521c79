use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// The enumerated set of content types a document may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "text/plain")]
    PlainText,
    #[serde(rename = "text/markdown")]
    Markdown,
    #[serde(rename = "application/json")]
    Json,
}

impl ContentType {
    /// Canonical type implied by a file extension (without the dot).
    /// Unknown extensions fall back to plain text.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "md" => Self::Markdown,
            "json" => Self::Json,
            _ => Self::PlainText,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
            Self::Markdown => "text/markdown",
            Self::Json => "application/json",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::PlainText | Self::Markdown)
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text/plain" => Ok(Self::PlainText),
            "text/markdown" => Ok(Self::Markdown),
            "application/json" => Ok(Self::Json),
            other => Err(DomainError::InvalidContentType(format!(
                "'{other}' is not one of text/plain, text/markdown, application/json"
            ))),
        }
    }
}
