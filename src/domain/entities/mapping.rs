//! Mapping entity: one key-value pair in the store.

use super::Code;

/// A short code bound to the URL it redirects to.
///
/// Stored as a single key (`prefix + code`) holding the raw target string.
/// Mappings are written on create and never mutated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub code: Code,
    pub target: String,
}

impl UrlMapping {
    pub fn new(code: Code, target: impl Into<String>) -> Self {
        Self {
            code,
            target: target.into(),
        }
    }
}
