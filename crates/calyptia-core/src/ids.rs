//! Canonical identifier classification

use uuid::Uuid;

/// Reports whether `s` already has the shape of a canonical ID (a UUID).
///
/// Purely syntactic, no network access. A `true` result does not mean the
/// ID exists at the directory; resolution deliberately trusts ID-shaped
/// keys without a verification round trip (see [`crate::resolve::resolve`]).
pub fn is_canonical_id(s: &str) -> bool {
    Uuid::parse_str(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_uuid() {
        assert!(is_canonical_id("8f0c2a6e-0cd4-4a10-8c5b-19b0db24f80a"));
    }

    #[test]
    fn test_rejects_names() {
        assert!(!is_canonical_id("my-agent"));
        assert!(!is_canonical_id(""));
        assert!(!is_canonical_id("8f0c2a6e-0cd4-4a10-8c5b"));
    }
}
