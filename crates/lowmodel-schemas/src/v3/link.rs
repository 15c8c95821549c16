//! Design-time link from a response to an operation.

use lowmodel_canonical::HashBuilder;
use lowmodel_core::{
    extract_extensions, extract_string, hash_extensions, prepare, BuildError, Buildable, Digest,
    Extensions, HasExtensions, NodeId, NodeReference, Reference, SpecIndex,
};
use serde::Serialize;

use crate::labels;

/// Link to an operation reachable from a response.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Relative or absolute reference to the target operation.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub operation_ref: NodeReference<String>,
    /// Identifier of the target operation.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub operation_id: NodeReference<String>,
    /// Link description.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub description: NodeReference<String>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
    /// Set when the object was reached through `$ref`.
    #[serde(skip)]
    pub reference: Reference,
}

impl Buildable for Link {
    fn build(&mut self, root: NodeId, idx: &dyn SpecIndex) -> Result<(), BuildError> {
        let root = prepare(root, idx)?;
        self.extensions = extract_extensions(root, idx)?;
        self.operation_ref = extract_string(labels::OPERATION_REF, root, idx)?;
        self.operation_id = extract_string(labels::OPERATION_ID, root, idx)?;
        self.description = extract_string(labels::DESCRIPTION, root, idx)?;
        Ok(())
    }

    fn hash(&self) -> Digest {
        let mut builder = HashBuilder::new();
        builder
            .scalar(&self.operation_ref.value)
            .scalar(&self.operation_id.value)
            .scalar(&self.description.value)
            .fragments(hash_extensions(&self.extensions));
        builder.finish()
    }

    fn reference_mut(&mut self) -> Option<&mut Reference> {
        Some(&mut self.reference)
    }
}

impl HasExtensions for Link {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}
