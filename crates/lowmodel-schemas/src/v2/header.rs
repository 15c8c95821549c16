//! Version 2 response header.

use lowmodel_canonical::HashBuilder;
use lowmodel_core::{
    extract_extensions, extract_string, hash_extensions, prepare, BuildError, Buildable, Digest,
    Extensions, HasExtensions, NodeId, NodeReference, SpecIndex,
};
use serde::Serialize;

use crate::labels;

/// Header sent with a version 2 response.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    /// Primitive type of the header value.
    #[serde(rename = "type", skip_serializing_if = "NodeReference::is_empty")]
    pub kind: NodeReference<String>,
    /// Format refining `type`.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub format: NodeReference<String>,
    /// Header description.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub description: NodeReference<String>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Buildable for Header {
    fn build(&mut self, root: NodeId, idx: &dyn SpecIndex) -> Result<(), BuildError> {
        let root = prepare(root, idx)?;
        self.extensions = extract_extensions(root, idx)?;
        self.kind = extract_string(labels::TYPE, root, idx)?;
        self.format = extract_string(labels::FORMAT, root, idx)?;
        self.description = extract_string(labels::DESCRIPTION, root, idx)?;
        Ok(())
    }

    fn hash(&self) -> Digest {
        let mut builder = HashBuilder::new();
        builder
            .scalar(&self.kind.value)
            .scalar(&self.format.value)
            .scalar(&self.description.value)
            .fragments(hash_extensions(&self.extensions));
        builder.finish()
    }
}

impl HasExtensions for Header {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}
