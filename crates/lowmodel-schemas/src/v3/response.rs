//! Version 3 response.

use lowmodel_canonical::HashBuilder;
use lowmodel_core::{
    extract_extensions, extract_map, extract_map_extensions, extract_string, find_item_in_map,
    hash_extensions, hash_pairs_ordered, prepare, BuildError, Buildable, Digest, Extensions,
    HasExtensions, NodeId, NodeReference, ObjectMap, Reference, SpecIndex, ValueReference,
};
use serde::Serialize;

use crate::labels;
use crate::v3::{Header, Link, MediaType};

/// Single response of a version 3 operation.
///
/// Content entries keep their document order in the hash: the order of
/// media types expresses preference.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Response {
    /// Response description.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub description: NodeReference<String>,
    /// Headers by name. Names that look like extensions (`X-Rate-Limit`) are headers here.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub headers: NodeReference<ObjectMap<Header>>,
    /// Body descriptions by media type.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub content: NodeReference<ObjectMap<MediaType>>,
    /// Links by name.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub links: NodeReference<ObjectMap<Link>>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
    /// Set when the object was reached through `$ref`.
    #[serde(skip)]
    pub reference: Reference,
}

impl Response {
    /// Looks up a header by name.
    pub fn find_header(&self, name: &str) -> Option<&ValueReference<Header>> {
        find_item_in_map(name, &self.headers.value)
    }

    /// Looks up a body description by media type.
    pub fn find_content(&self, media_type: &str) -> Option<&ValueReference<MediaType>> {
        find_item_in_map(media_type, &self.content.value)
    }

    /// Looks up a link by name.
    pub fn find_link(&self, name: &str) -> Option<&ValueReference<Link>> {
        find_item_in_map(name, &self.links.value)
    }
}

impl Buildable for Response {
    fn build(&mut self, root: NodeId, idx: &dyn SpecIndex) -> Result<(), BuildError> {
        let root = prepare(root, idx)?;
        self.extensions = extract_extensions(root, idx)?;
        self.description = extract_string(labels::DESCRIPTION, root, idx)?;
        self.headers = extract_map_extensions(labels::HEADERS, root, idx, true)?;
        self.content = extract_map(labels::CONTENT, root, idx)?;
        self.links = extract_map(labels::LINKS, root, idx)?;
        Ok(())
    }

    fn hash(&self) -> Digest {
        let mut builder = HashBuilder::new();
        builder
            .scalar(&self.description.value)
            .fragments(hash_pairs_ordered(&self.headers.value))
            .fragments(hash_pairs_ordered(&self.content.value))
            .fragments(hash_pairs_ordered(&self.links.value))
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
