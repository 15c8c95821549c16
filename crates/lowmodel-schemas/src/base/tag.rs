//! Tag object.

use lowmodel_canonical::HashBuilder;
use lowmodel_core::{
    extract_extensions, extract_object, extract_string, hash_extensions, prepare, BuildError,
    Buildable, Digest, Extensions, HasExtensions, NodeId, NodeReference, Reference, SpecIndex,
};
use serde::Serialize;

use crate::base::ExternalDoc;
use crate::labels;

/// Metadata attached to a tag name used by operations.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag name.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub name: NodeReference<String>,
    /// Tag description.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub description: NodeReference<String>,
    /// Further documentation for the tag.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub external_docs: NodeReference<ExternalDoc>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
    /// Set when the object was reached through `$ref`.
    #[serde(skip)]
    pub reference: Reference,
}

impl Buildable for Tag {
    fn build(&mut self, root: NodeId, idx: &dyn SpecIndex) -> Result<(), BuildError> {
        let root = prepare(root, idx)?;
        self.extensions = extract_extensions(root, idx)?;
        self.name = extract_string(labels::NAME, root, idx)?;
        self.description = extract_string(labels::DESCRIPTION, root, idx)?;
        self.external_docs = extract_object(labels::EXTERNAL_DOCS, root, idx)?;
        Ok(())
    }

    fn hash(&self) -> Digest {
        let mut builder = HashBuilder::new();
        builder
            .scalar(&self.name.value)
            .scalar(&self.description.value)
            .nested(self.external_docs.as_option().map(Buildable::hash))
            .fragments(hash_extensions(&self.extensions));
        builder.finish()
    }

    fn reference_mut(&mut self) -> Option<&mut Reference> {
        Some(&mut self.reference)
    }
}

impl HasExtensions for Tag {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}
