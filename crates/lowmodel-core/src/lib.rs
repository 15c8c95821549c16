//! Low-level document object framework.
//!
//! This crate provides:
//! - Provenance wrappers ([`KeyReference`], [`ValueReference`], [`NodeReference`])
//!   binding decoded data to the node it came from
//! - The [`Buildable`] protocol every low-level object implements
//! - The [`SpecIndex`] resolver interface and a minimal in-memory [`DocumentIndex`]
//! - The extraction engine that populates objects from mapping nodes
//! - Pair hashing helpers that keep extension ordering significant while
//!   letting order-independent maps hash by sorted key
//!
//! Core invariants:
//! - Every decoded key, value and object keeps a handle to its source node
//! - Vendor-extension keys never reach typed fields; they land in `Extensions`
//! - Build either returns a complete object or an error, never a partial one
//! - `hash()` depends only on semantic content, never on node identity
//!
#![deny(missing_docs)]

/// Error types for extraction and resolution.
pub mod errors;
/// Extraction engine.
pub mod extract;
/// Pair hashing helpers.
pub mod hashing;
/// Resolver interface and in-memory index.
pub mod index;
/// Extraction options.
pub mod options;
/// Build/hash protocol.
pub mod protocol;
/// Provenance wrappers.
pub mod reference;

pub use errors::{BuildError, ResolveError};
pub use extract::{
    check_for_merge_nodes, extract_bool, extract_extensions, extract_map,
    extract_map_extensions, extract_map_no_lookup, extract_object, extract_object_raw,
    extract_scalar_map, extract_string, extract_value, locate_ref, prepare, ref_pointer,
    REF_LABEL,
};
pub use hashing::{hash_extensions, hash_pairs_ordered, hash_pairs_sorted, HashFragment};
pub use index::{DocumentIndex, SpecIndex};
pub use options::{ExtractOptions, MergeKeyPolicy};
pub use protocol::{build_target, find_item_in_map, Buildable, HasExtensions};
pub use reference::{Extensions, KeyReference, NodeReference, ObjectMap, Reference, ValueReference};

pub use lowmodel_canonical::{Digest, Pairs};
pub use lowmodel_node::{Mark, NodeId, Tree};
