use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Validated byte length of a document's content.
///
/// Bounds are `[1, 1 MiB]`. Formatting and the size-class predicates are
/// informational only and drive no business decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct DocumentSize(u64);

impl DocumentSize {
    pub const MIN_BYTES: u64 = 1;
    pub const MAX_BYTES: u64 = MIB;

    pub fn new(bytes: u64) -> Result<Self, DomainError> {
        if bytes < Self::MIN_BYTES {
            return Err(DomainError::EmptyContent);
        }
        if bytes > Self::MAX_BYTES {
            return Err(DomainError::SizeExceedsMaximum {
                size: bytes,
                max: Self::MAX_BYTES,
            });
        }
        Ok(Self(bytes))
    }

    pub fn from_content(content: &[u8]) -> Result<Self, DomainError> {
        Self::new(content.len() as u64)
    }

    pub fn bytes(&self) -> u64 {
        self.0
    }

    /// Human-readable rendering: bytes below 1024, KB below 1 MiB, MB above.
    pub fn format(&self) -> String {
        if self.0 < KIB {
            format!("{} bytes", self.0)
        } else if self.0 < MIB {
            format!("{:.2} KB", self.0 as f64 / KIB as f64)
        } else {
            format!("{:.2} MB", self.0 as f64 / MIB as f64)
        }
    }

    pub fn is_small(&self) -> bool {
        self.0 < 10 * KIB
    }

    pub fn is_medium(&self) -> bool {
        !self.is_small() && !self.is_large()
    }

    pub fn is_large(&self) -> bool {
        self.0 >= 100 * KIB
    }
}

impl std::fmt::Display for DocumentSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}

impl TryFrom<u64> for DocumentSize {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentSize> for u64 {
    fn from(size: DocumentSize) -> Self {
        size.0
    }
}
