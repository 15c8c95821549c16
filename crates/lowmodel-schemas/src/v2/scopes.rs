//! OAuth2 scopes.

use lowmodel_canonical::HashBuilder;
use lowmodel_core::{
    extract_extensions, extract_scalar_map, find_item_in_map, hash_extensions, hash_pairs_sorted,
    prepare, BuildError, Buildable, Digest, Extensions, HasExtensions, NodeId, ObjectMap,
    SpecIndex, ValueReference,
};
use serde::Serialize;

/// Available scopes of an OAuth2 security scheme, name to description.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scopes {
    /// Scope descriptions by scope name, in document order.
    #[serde(flatten)]
    pub values: ObjectMap<String>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Scopes {
    /// Looks up a scope description by scope name.
    pub fn find_scope(&self, scope: &str) -> Option<&ValueReference<String>> {
        find_item_in_map(scope, &self.values)
    }
}

impl Buildable for Scopes {
    fn build(&mut self, root: NodeId, idx: &dyn SpecIndex) -> Result<(), BuildError> {
        let root = prepare(root, idx)?;
        self.extensions = extract_extensions(root, idx)?;
        self.values = extract_scalar_map(root, idx)?;
        Ok(())
    }

    fn hash(&self) -> Digest {
        let mut builder = HashBuilder::new();
        builder
            .fragments(hash_pairs_sorted(&self.values))
            .fragments(hash_extensions(&self.extensions));
        builder.finish()
    }
}

impl HasExtensions for Scopes {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}
