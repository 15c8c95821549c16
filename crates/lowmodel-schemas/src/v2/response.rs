//! Version 2 response.

use lowmodel_canonical::HashBuilder;
use lowmodel_core::{
    extract_extensions, extract_map_extensions, extract_string, find_item_in_map,
    hash_extensions, hash_pairs_ordered, prepare, BuildError, Buildable, Digest, Extensions,
    HasExtensions, NodeId, NodeReference, ObjectMap, Reference, SpecIndex, ValueReference,
};
use serde::Serialize;

use crate::labels;
use crate::v2::Header;

/// Single response of a version 2 operation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Response {
    /// Response description.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub description: NodeReference<String>,
    /// Headers by name, in document order.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub headers: NodeReference<ObjectMap<Header>>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
    /// Set when the object was reached through `$ref`.
    #[serde(skip)]
    pub reference: Reference,
}

impl Response {
    /// Looks up a header by name, ignoring ASCII case when no exact match exists.
    pub fn find_header(&self, name: &str) -> Option<&ValueReference<Header>> {
        find_item_in_map(name, &self.headers.value)
    }
}

impl Buildable for Response {
    fn build(&mut self, root: NodeId, idx: &dyn SpecIndex) -> Result<(), BuildError> {
        let root = prepare(root, idx)?;
        self.extensions = extract_extensions(root, idx)?;
        self.description = extract_string(labels::DESCRIPTION, root, idx)?;
        self.headers = extract_map_extensions(labels::HEADERS, root, idx, true)?;
        Ok(())
    }

    fn hash(&self) -> Digest {
        let mut builder = HashBuilder::new();
        builder
            .scalar(&self.description.value)
            .fragments(hash_pairs_ordered(&self.headers.value))
            .fragments(hash_extensions(&self.extensions));
        builder.finish()
    }

    fn reference_mut(&mut self) -> Option<&mut Reference> {
        Some(&mut self.reference)
    }
}

impl HasExtensions for Response {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}
