//! Short code newtype.

use std::fmt;

/// A short identifier that keys a stored URL.
///
/// Codes produced by [`crate::utils::code_generator::CodeGenerator`] are
/// lowercase hex of a fixed length. Codes parsed from a request path are only
/// guaranteed to be a single non-empty path segment; whether they exist is the
/// store's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(String);

impl Code {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
