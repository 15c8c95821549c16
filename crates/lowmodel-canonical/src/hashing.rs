use canonical_json::to_string;
use serde_json::Value;
use sha2::{Digest as Sha2Digest, Sha256};

use crate::digest::{Digest, DIGEST_LEN};

/// Separator placed between hash fragments before digesting.
pub const FRAGMENT_SEPARATOR: &str = "|";

/// SHA-256 of raw bytes.
pub fn sha256(bytes: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let out: [u8; DIGEST_LEN] = hasher.finalize().into();
    Digest::from_bytes(out)
}

/// Hash fragment for an untyped value.
///
/// The value is rendered as RFC 8785 canonical JSON and digested, so the
/// fragment is independent of how the value was written in the source
/// (quoting style, flow vs. block, nested key order).
pub fn value_fragment(value: &Value) -> String {
    let canonical = to_string(value).unwrap_or_else(|_| value.to_string());
    sha256(canonical.as_bytes()).to_hex()
}

/// Fragment for one map entry: `key-fragment`.
pub fn entry_fragment(key: &str, fragment: &str) -> String {
    format!("{}-{}", key, fragment)
}

/// Accumulates hash fragments in declaration order and digests them once.
///
/// Empty scalars and absent nested objects contribute nothing; an empty
/// field and a missing field therefore hash the same.
#[derive(Debug, Clone, Default)]
pub struct HashBuilder {
    fragments: Vec<String>,
}

impl HashBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scalar field, skipped when empty.
    pub fn scalar(&mut self, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.fragments.push(value.to_string());
        }
        self
    }

    /// Adds a boolean field as `name-true`, skipped when false.
    ///
    /// The name keeps two set flags of one object from hashing alike.
    pub fn flag(&mut self, name: &str, value: bool) -> &mut Self {
        if value {
            self.fragments.push(entry_fragment(name, "true"));
        }
        self
    }

    /// Adds a nested object's digest, skipped when absent.
    pub fn nested(&mut self, digest: Option<Digest>) -> &mut Self {
        if let Some(digest) = digest {
            self.fragments.push(digest.to_hex());
        }
        self
    }

    /// Adds an untyped value, skipped when null.
    pub fn value(&mut self, value: &Value) -> &mut Self {
        if !value.is_null() {
            self.fragments.push(value_fragment(value));
        }
        self
    }

    /// Appends pre-formatted fragments in the order given.
    pub fn fragments<I>(&mut self, fragments: I) -> &mut Self
    where
        I: IntoIterator<Item = String>,
    {
        self.fragments.extend(fragments);
        self
    }

    /// Number of fragments collected so far.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true when no fragment has been collected.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Joins all fragments with [`FRAGMENT_SEPARATOR`] and digests the result.
    pub fn finish(&self) -> Digest {
        sha256(self.fragments.join(FRAGMENT_SEPARATOR).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_scalars_are_skipped() {
        let mut with_empty = HashBuilder::new();
        with_empty.scalar("a").scalar("").scalar("b");
        let mut without = HashBuilder::new();
        without.scalar("a").scalar("b");
        assert_eq!(with_empty.len(), 2);
        assert_eq!(with_empty.finish(), without.finish());
    }

    #[test]
    fn fragments_are_joined_with_separator() {
        let mut builder = HashBuilder::new();
        builder.scalar("a").scalar("b");
        assert_eq!(builder.finish(), sha256(b"a|b"));
    }

    #[test]
    fn value_fragment_ignores_nested_key_order() {
        let a = json!({"b": 1, "a": [true, null]});
        let b = json!({"a": [true, null], "b": 1});
        assert_eq!(value_fragment(&a), value_fragment(&b));
        assert_ne!(value_fragment(&a), value_fragment(&json!({"b": 2})));
    }

    #[test]
    fn flags_carry_their_name() {
        let mut required = HashBuilder::new();
        required.flag("required", true).flag("deprecated", false);
        let mut deprecated = HashBuilder::new();
        deprecated.flag("required", false).flag("deprecated", true);
        assert_ne!(required.finish(), deprecated.finish());
        assert_eq!(required.finish(), sha256(b"required-true"));
        assert!(HashBuilder::new().flag("required", false).is_empty());
    }

    #[test]
    fn entry_fragment_format() {
        assert_eq!(entry_fragment("200", "abc"), "200-abc");
    }
}
