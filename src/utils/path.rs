//! Short code extraction from request paths.

use crate::domain::entities::Code;

/// Extracts a short code from a request path.
///
/// The leading `/` is stripped and the remainder must be exactly one non-empty
/// segment. Empty paths, the bare root, nested paths and trailing slashes all
/// yield `None`. The rule does not depend on where the resolver is mounted.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_code("/abc1234").unwrap().as_str(), "abc1234");
/// assert!(extract_code("/").is_none());
/// assert!(extract_code("/a/b").is_none());
/// ```
pub fn extract_code(path: &str) -> Option<Code> {
    let rest = path.strip_prefix('/')?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    Some(Code::new(rest))
}
