//! Path item, as reached from a callback expression.

use lowmodel_canonical::HashBuilder;
use lowmodel_core::{
    extract_extensions, extract_string, hash_extensions, prepare, BuildError, Buildable, Digest,
    Extensions, HasExtensions, NodeId, NodeReference, Reference, SpecIndex,
};
use serde::Serialize;

use crate::labels;

/// Operations available on one path.
///
/// Only the descriptive fields are modelled; operations themselves are
/// outside this crate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PathItem {
    /// Short summary.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub summary: NodeReference<String>,
    /// Longer description.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub description: NodeReference<String>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
    /// Set when the object was reached through `$ref`.
    #[serde(skip)]
    pub reference: Reference,
}

impl Buildable for PathItem {
    fn build(&mut self, root: NodeId, idx: &dyn SpecIndex) -> Result<(), BuildError> {
        let root = prepare(root, idx)?;
        self.extensions = extract_extensions(root, idx)?;
        self.summary = extract_string(labels::SUMMARY, root, idx)?;
        self.description = extract_string(labels::DESCRIPTION, root, idx)?;
        Ok(())
    }

    fn hash(&self) -> Digest {
        let mut builder = HashBuilder::new();
        builder
            .scalar(&self.summary.value)
            .scalar(&self.description.value)
            .fragments(hash_extensions(&self.extensions));
        builder.finish()
    }

    fn reference_mut(&mut self) -> Option<&mut Reference> {
        Some(&mut self.reference)
    }
}

impl HasExtensions for PathItem {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}
