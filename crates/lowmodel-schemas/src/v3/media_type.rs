//! Media type entry of a response body.

use lowmodel_canonical::HashBuilder;
use lowmodel_core::{
    extract_extensions, extract_value, hash_extensions, prepare, BuildError, Buildable, Digest,
    Extensions, HasExtensions, NodeId, NodeReference, SpecIndex,
};
use serde::Serialize;

use crate::labels;

/// Body description for one media type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaType {
    /// Example payload, kept untyped.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub example: NodeReference<serde_json::Value>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Buildable for MediaType {
    fn build(&mut self, root: NodeId, idx: &dyn SpecIndex) -> Result<(), BuildError> {
        let root = prepare(root, idx)?;
        self.extensions = extract_extensions(root, idx)?;
        self.example = extract_value(labels::EXAMPLE, root, idx)?;
        Ok(())
    }

    fn hash(&self) -> Digest {
        let mut builder = HashBuilder::new();
        builder
            .value(&self.example.value)
            .fragments(hash_extensions(&self.extensions));
        builder.finish()
    }
}

impl HasExtensions for MediaType {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}
