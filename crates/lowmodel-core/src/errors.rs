use lowmodel_node::{DecodeError, Mark, NodeKind};
use thiserror::Error;

/// Errors raised by a [`SpecIndex`](crate::SpecIndex) while resolving `$ref` pointers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The pointer form is not handled (remote URL, missing fragment).
    #[error("unsupported reference '{0}'")]
    Unsupported(String),
    /// The pointer names a document the index does not hold.
    #[error("unknown document '{document}' in reference '{pointer}'")]
    UnknownDocument {
        /// Document name from the pointer.
        document: String,
        /// Full pointer.
        pointer: String,
    },
    /// The pointer path does not exist.
    #[error("reference '{0}' does not resolve")]
    NotFound(String),
    /// Following the pointer leads back to a pointer already visited.
    #[error("circular reference through '{0}'")]
    Circular(String),
}

/// Errors that abort a Build.
#[derive(Error, Debug)]
pub enum BuildError {
    /// A field has the wrong node shape.
    #[error("{context}: expected {expected} node, found {found} at {mark}")]
    StructuralMismatch {
        /// Field or entry being extracted.
        context: String,
        /// Required kind.
        expected: NodeKind,
        /// Kind found in the document.
        found: NodeKind,
        /// Position of the offending node.
        mark: Mark,
    },
    /// A nested object failed to build.
    #[error("cannot build '{label}': {source}")]
    NestedBuildFailure {
        /// Field label (or `label.key` for map entries).
        label: String,
        /// Failure reported by the nested Build.
        #[source]
        source: Box<BuildError>,
    },
    /// A `$ref` could not be resolved by the index.
    #[error("cannot resolve reference at {mark}: {source}")]
    ReferenceResolution {
        /// Position of the `$ref` node.
        mark: Mark,
        /// Index failure.
        #[source]
        source: ResolveError,
    },
    /// A required child is absent.
    ///
    /// Reserved: the optional-field extractors never raise it.
    #[error("missing required '{label}' at {mark}")]
    MissingRequiredChild {
        /// Required label.
        label: String,
        /// Position of the parent mapping.
        mark: Mark,
    },
    /// A merge key was found while [`MergeKeyPolicy::Reject`](crate::MergeKeyPolicy::Reject) is active.
    #[error("merge keys are not supported (at {mark})")]
    MergeKey {
        /// Position of the `<<` key.
        mark: Mark,
    },
    /// A scalar or untyped value could not be decoded.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
}

impl BuildError {
    /// Innermost error, looking through every [`BuildError::NestedBuildFailure`].
    pub fn root_cause(&self) -> &BuildError {
        let mut current = self;
        while let BuildError::NestedBuildFailure { source, .. } = current {
            current = &**source;
        }
        current
    }

    /// Source position of the innermost failure, when it has one.
    pub fn mark(&self) -> Option<Mark> {
        match self.root_cause() {
            BuildError::StructuralMismatch { mark, .. }
            | BuildError::ReferenceResolution { mark, .. }
            | BuildError::MissingRequiredChild { mark, .. }
            | BuildError::MergeKey { mark } => Some(*mark),
            BuildError::Decode(err) => Some(err.mark()),
            BuildError::NestedBuildFailure { .. } => None,
        }
    }

    pub(crate) fn nested(label: impl Into<String>, source: BuildError) -> Self {
        BuildError::NestedBuildFailure {
            label: label.into(),
            source: Box::new(source),
        }
    }
}
