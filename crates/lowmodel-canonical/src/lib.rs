//! Canonical primitives shared by every lowmodel crate.
//!
//! This crate holds the pieces that do not need to know anything about
//! document nodes:
//! - [`Pairs`], the order-preserving key/value container with its serde codec
//! - [`Digest`], the fixed-size SHA-256 fingerprint of an object
//! - [`HashBuilder`], the fragment accumulator every object hash goes through
//!
#![deny(missing_docs)]

/// Digest primitives.
pub mod digest;
/// Fragment hashing helpers.
pub mod hashing;
/// Order-preserving key/value container.
pub mod pairs;
/// Validation errors for canonical primitives.
pub mod validation;

pub use digest::{Digest, DigestAlg, DIGEST_LEN};
pub use hashing::{entry_fragment, sha256, value_fragment, HashBuilder, FRAGMENT_SEPARATOR};
pub use pairs::{Pair, Pairs};
pub use validation::ValidationError;
