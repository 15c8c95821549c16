//! Loading documents and locating objects inside them.

use lowmodel_core::{DocumentIndex, ExtractOptions, NodeId, ResolveError, SpecIndex};
use lowmodel_node::LoadError;
use std::io::{self, Read};
use thiserror::Error;
use tracing::debug;

/// Errors raised before a Build starts.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    /// The input is not a well-formed document.
    #[error("invalid document {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: LoadError,
    },
    /// The pointer is not of the form `#/...`.
    #[error("pointer must start with '#': {0}")]
    Pointer(String),
    /// The pointer does not lead to a node.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Reads `path`, or stdin when no path is given.
pub fn read_input(path: Option<&str>) -> Result<(String, String), DocumentError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
                path: path.to_string(),
                source,
            })?;
            Ok((path.to_string(), text))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| DocumentError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(("<stdin>".to_string(), buffer))
        }
    }
}

/// Parses `path` into an index using `options`.
pub fn load_index(path: &str, options: ExtractOptions) -> Result<DocumentIndex, DocumentError> {
    let (path, text) = read_input(Some(path))?;
    let index = DocumentIndex::parse(&text)
        .map_err(|source| DocumentError::Load { path, source })?;
    Ok(index.with_options(options))
}

/// Node addressed by `pointer`, or the document root.
pub fn locate(index: &DocumentIndex, pointer: Option<&str>) -> Result<NodeId, DocumentError> {
    let Some(pointer) = pointer else {
        return Ok(index.root());
    };
    if !pointer.starts_with('#') {
        return Err(DocumentError::Pointer(pointer.to_string()));
    }
    let node = index.resolve_reference(pointer)?;
    debug!(pointer, line = index.tree().mark(node).line, "located object");
    Ok(node)
}
