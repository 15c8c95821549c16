//! Callback object.

use lowmodel_canonical::HashBuilder;
use lowmodel_core::{
    extract_extensions, extract_object_raw, find_item_in_map, hash_extensions,
    hash_pairs_ordered, prepare, BuildError, Buildable, Digest, Extensions, HasExtensions,
    KeyReference, NodeId, ObjectMap, Reference, SpecIndex, ValueReference,
};
use serde::Serialize;

use crate::v3::PathItem;

/// Out-of-band requests the API may issue, keyed by runtime expression.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Callback {
    /// Path items by expression; `None` when the callback declares none.
    #[serde(flatten)]
    pub expression: Option<ValueReference<ObjectMap<PathItem>>>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
    /// Set when the object was reached through `$ref`.
    #[serde(skip)]
    pub reference: Reference,
}

impl Callback {
    /// Looks up the path item for an expression.
    pub fn find_expression(&self, expression: &str) -> Option<&ValueReference<PathItem>> {
        find_item_in_map(expression, &self.expression.as_ref()?.value)
    }
}

impl Buildable for Callback {
    fn build(&mut self, root: NodeId, idx: &dyn SpecIndex) -> Result<(), BuildError> {
        let root = prepare(root, idx)?;
        self.extensions = extract_extensions(root, idx)?;

        let tree = idx.tree();
        let mut expressions = ObjectMap::new();
        for (k, v) in tree.entries(root) {
            let key = tree.text(k);
            if idx.options().is_extension(key) {
                continue;
            }
            let (item, reference) =
                extract_object_raw::<PathItem>(v, idx).map_err(|e| {
                    BuildError::NestedBuildFailure {
                        label: key.to_string(),
                        source: Box::new(e),
                    }
                })?;
            expressions.push(
                KeyReference::new(key.to_string(), k),
                ValueReference {
                    value: item,
                    value_node: v,
                    reference,
                },
            );
        }
        if !expressions.is_empty() {
            self.expression = Some(ValueReference::new(expressions, root));
        }
        Ok(())
    }

    fn hash(&self) -> Digest {
        let mut builder = HashBuilder::new();
        if let Some(expression) = &self.expression {
            builder.fragments(hash_pairs_ordered(&expression.value));
        }
        builder.fragments(hash_extensions(&self.extensions));
        builder.finish()
    }

    fn reference_mut(&mut self) -> Option<&mut Reference> {
        Some(&mut self.reference)
    }
}

impl HasExtensions for Callback {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}
