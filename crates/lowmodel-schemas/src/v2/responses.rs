//! Version 2 response table.

use lowmodel_canonical::HashBuilder;
use lowmodel_core::{
    extract_extensions, extract_map_no_lookup, find_item_in_map, hash_extensions,
    hash_pairs_sorted, prepare, BuildError, Buildable, Digest, Extensions, HasExtensions,
    KeyReference, NodeId, NodeReference, ObjectMap, SpecIndex, ValueReference,
};
use serde::Serialize;

use crate::labels;
use crate::v2::Response;

/// Responses keyed by status code, plus the fallback `default` response.
///
/// `default` is never kept in `codes`: Build moves it (matched without
/// regard to ASCII case) into the dedicated field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Responses {
    /// Responses by status code, in document order.
    #[serde(flatten)]
    pub codes: ObjectMap<Response>,
    /// Fallback response.
    #[serde(skip_serializing_if = "NodeReference::is_empty")]
    pub default: NodeReference<Response>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Responses {
    /// Looks up a response by status code.
    pub fn find_response_by_code(&self, code: &str) -> Option<&ValueReference<Response>> {
        find_item_in_map(code, &self.codes)
    }

    fn promote_default(&mut self) {
        let is_default = |k: &KeyReference<String>| k.value.eq_ignore_ascii_case(labels::DEFAULT);
        let Some(position) = self.codes.position_by(is_default) else {
            return;
        };
        if let Some(entry) = self.codes.delete_at(position) {
            self.default = NodeReference {
                value: entry.value.value,
                key_node: Some(entry.key.key_node),
                value_node: Some(entry.value.value_node),
                reference: entry.value.reference,
            };
        }
        // Later spellings of `default` are dropped; the first one wins.
        while let Some(position) = self.codes.position_by(is_default) {
            self.codes.delete_at(position);
        }
    }
}

impl Buildable for Responses {
    fn build(&mut self, root: NodeId, idx: &dyn SpecIndex) -> Result<(), BuildError> {
        let root = prepare(root, idx)?;
        self.extensions = extract_extensions(root, idx)?;
        self.codes = extract_map_no_lookup(root, idx)?;
        self.promote_default();
        Ok(())
    }

    fn hash(&self) -> Digest {
        let mut builder = HashBuilder::new();
        builder
            .fragments(hash_pairs_sorted(&self.codes))
            .nested(self.default.as_option().map(Buildable::hash))
            .fragments(hash_extensions(&self.extensions));
        builder.finish()
    }
}

impl HasExtensions for Responses {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}
