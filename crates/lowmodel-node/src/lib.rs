//! Document node arena for lowmodel.
//!
//! This crate provides:
//! - [`Tree`], an append-only arena of [`Node`]s addressed by copyable [`NodeId`]s
//! - A YAML loader (JSON is accepted as a YAML subset) that records line/column
//!   for every node and keeps aliases as distinct nodes pointing at their anchor
//! - Alias resolution and merge-key detection helpers used before extraction
//! - [`FromNode`], the node codec, including the anchor-aware [`Pairs`] decoder
//!
//! Nodes are never mutated once loaded. Everything built from a tree refers
//! back into it through `NodeId` handles, so the tree must outlive the objects
//! built from it.
//!
//! ## Quick Start
//!
//! ```rust
//! use lowmodel_node::{FromNode, Tree};
//! use lowmodel_canonical::Pairs;
//!
//! let mut tree = Tree::new();
//! let root = tree.load_str("b: 1\na: &x two\nc: *x\n")?;
//! let pairs = Pairs::<String, String>::from_node(&tree, root)?;
//! assert_eq!(pairs.get("c").map(String::as_str), Some("two"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`Pairs`]: lowmodel_canonical::Pairs

#![deny(missing_docs)]

/// Node codec.
pub mod decode;
/// Error types for loading and decoding.
pub mod errors;
/// YAML/JSON loader.
pub mod loader;
/// Node arena.
pub mod tree;

pub use decode::{scalar_value, FromNode, MAX_ALIAS_EXPANSION, MAX_DEPTH};
pub use errors::{DecodeError, LoadError};
pub use tree::{Mark, Node, NodeId, NodeKind, ScalarStyle, Tree, MERGE_KEY};
