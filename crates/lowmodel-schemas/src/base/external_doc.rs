//! External documentation object.

use lowmodel_canonical::HashBuilder;
use lowmodel_core::{
    extract_extensions, extract_string, hash_extensions, prepare, BuildError, Buildable, Digest,
    Extensions, HasExtensions, NodeId, NodeReference, Reference, SpecIndex,
};
use serde::Serialize;

use crate::labels;

/// Pointer to documentation hosted elsewhere.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExternalDoc {
    /// Short description of the target documentation.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub description: NodeReference<String>,
    /// Location of the target documentation.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub url: NodeReference<String>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
    /// Set when the object was reached through `$ref`.
    #[serde(skip)]
    pub reference: Reference,
}

impl Buildable for ExternalDoc {
    fn build(&mut self, root: NodeId, idx: &dyn SpecIndex) -> Result<(), BuildError> {
        let root = prepare(root, idx)?;
        self.extensions = extract_extensions(root, idx)?;
        self.description = extract_string(labels::DESCRIPTION, root, idx)?;
        self.url = extract_string(labels::URL, root, idx)?;
        Ok(())
    }

    fn hash(&self) -> Digest {
        let mut builder = HashBuilder::new();
        builder
            .scalar(&self.description.value)
            .scalar(&self.url.value)
            .fragments(hash_extensions(&self.extensions));
        builder.finish()
    }

    fn reference_mut(&mut self) -> Option<&mut Reference> {
        Some(&mut self.reference)
    }
}

impl HasExtensions for ExternalDoc {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}
