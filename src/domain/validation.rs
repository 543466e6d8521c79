//! Shared validation primitives for document names.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Characters that are rejected anywhere in a document name, plus ASCII
/// control characters. Matches the portable-filename rules enforced at upload.
static FORBIDDEN_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).expect("Invalid forbidden-chars regex"));

/// Device names that cannot be used as a file stem on common filesystems.
static RESERVED_NAMES: Lazy<HashSet<String>> = Lazy::new(|| {
    let mut names: HashSet<String> = ["CON", "PRN", "AUX", "NUL"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    for n in 1..=9 {
        names.insert(format!("COM{n}"));
        names.insert(format!("LPT{n}"));
    }
    names
});

pub fn contains_forbidden_chars(value: &str) -> bool {
    FORBIDDEN_CHARS.is_match(value)
}

/// Reserved-name check is case-insensitive and applies to the extension-stripped stem.
pub fn is_reserved_name(stem: &str) -> bool {
    RESERVED_NAMES.contains(&stem.to_uppercase())
}
