//! Version 3 header.

use lowmodel_canonical::HashBuilder;
use lowmodel_core::{
    extract_bool, extract_extensions, extract_string, hash_extensions, prepare, BuildError,
    Buildable, Digest, Extensions, HasExtensions, NodeId, NodeReference, Reference, SpecIndex,
};
use serde::Serialize;

use crate::labels;

/// Header sent with a version 3 response.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    /// Header description.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub description: NodeReference<String>,
    /// Whether the header is mandatory.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub required: NodeReference<bool>,
    /// Whether the header is deprecated.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub deprecated: NodeReference<bool>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
    /// Set when the object was reached through `$ref`.
    #[serde(skip)]
    pub reference: Reference,
}

impl Buildable for Header {
    fn build(&mut self, root: NodeId, idx: &dyn SpecIndex) -> Result<(), BuildError> {
        let root = prepare(root, idx)?;
        self.extensions = extract_extensions(root, idx)?;
        self.description = extract_string(labels::DESCRIPTION, root, idx)?;
        self.required = extract_bool(labels::REQUIRED, root, idx)?;
        self.deprecated = extract_bool(labels::DEPRECATED, root, idx)?;
        Ok(())
    }

    fn hash(&self) -> Digest {
        let mut builder = HashBuilder::new();
        builder
            .scalar(&self.description.value)
            .flag(labels::REQUIRED, self.required.value)
            .flag(labels::DEPRECATED, self.deprecated.value)
            .fragments(hash_extensions(&self.extensions));
        builder.finish()
    }

    fn reference_mut(&mut self) -> Option<&mut Reference> {
        Some(&mut self.reference)
    }
}

impl HasExtensions for Header {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}
