use thiserror::Error;

use crate::tree::{Mark, NodeKind};

/// Errors that can occur while loading source text into a [`Tree`](crate::Tree).
#[derive(Error, Debug)]
pub enum LoadError {
    /// The YAML scanner or parser rejected the input.
    #[error("invalid document at {mark}: {message}")]
    Scan {
        /// Position reported by the parser.
        mark: Mark,
        /// Parser message.
        message: String,
    },
    /// An alias referred to an anchor that was never defined.
    #[error("unknown anchor {anchor} at {mark}")]
    UnknownAnchor {
        /// Parser-assigned anchor id.
        anchor: usize,
        /// Position of the alias.
        mark: Mark,
    },
}

/// Errors produced by the node codec.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The node has the wrong structural kind.
    #[error("expected {expected} node, got {found} at {mark}")]
    UnexpectedKind {
        /// Kind the decoder required.
        expected: NodeKind,
        /// Kind that was found.
        found: NodeKind,
        /// Position of the offending node.
        mark: Mark,
    },
    /// A mapping node does not hold key/value pairs.
    #[error("expected even number of nodes, got {count} at {mark}")]
    OddChildren {
        /// Number of children found.
        count: usize,
        /// Position of the mapping.
        mark: Mark,
    },
    /// A scalar cannot be read as the requested type.
    #[error("cannot decode {target} from '{value}' at {mark}")]
    Scalar {
        /// Requested type.
        target: &'static str,
        /// Scalar text.
        value: String,
        /// Position of the scalar.
        mark: Mark,
    },
    /// A mapping key failed to decode.
    #[error("cannot decode key: {0}")]
    Key(Box<DecodeError>),
    /// A mapping value failed to decode.
    #[error("cannot decode value: {0}")]
    Value(Box<DecodeError>),
    /// Nesting (usually a self-referencing alias) is too deep.
    #[error("nesting exceeds {limit} levels at {mark}")]
    TooDeep {
        /// Depth limit.
        limit: usize,
        /// Position where the limit was hit.
        mark: Mark,
    },
    /// Aliases expand the value past the node-visit limit.
    #[error("alias expansion exceeds {limit} nodes at {mark}")]
    TooManyAliases {
        /// Visit limit for the value.
        limit: usize,
        /// Position where the limit was hit.
        mark: Mark,
    },
}

impl DecodeError {
    /// Position of the node that caused the failure.
    pub fn mark(&self) -> Mark {
        match self {
            DecodeError::UnexpectedKind { mark, .. }
            | DecodeError::OddChildren { mark, .. }
            | DecodeError::Scalar { mark, .. }
            | DecodeError::TooDeep { mark, .. }
            | DecodeError::TooManyAliases { mark, .. } => *mark,
            DecodeError::Key(inner) | DecodeError::Value(inner) => inner.mark(),
        }
    }
}
