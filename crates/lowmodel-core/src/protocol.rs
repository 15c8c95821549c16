use lowmodel_canonical::Digest;
use lowmodel_node::NodeId;
use serde_json::Value;
use tracing::debug;

use crate::errors::BuildError;
use crate::index::SpecIndex;
use crate::reference::{Extensions, ObjectMap, Reference, ValueReference};

/// Contract shared by every low-level document object.
///
/// `build` is called once on a fresh `Default` value. On success the object
/// is complete; on failure it must be discarded. `hash` may be called any
/// number of times afterwards and always returns the same digest.
pub trait Buildable: Default {
    /// Populates the object from `root`.
    fn build(&mut self, root: NodeId, idx: &dyn SpecIndex) -> Result<(), BuildError>;

    /// Digest of the object's semantic content.
    fn hash(&self) -> Digest;

    /// Slot recording whether the whole object was reached through `$ref`.
    ///
    /// Objects without such a slot keep the default `None`.
    fn reference_mut(&mut self) -> Option<&mut Reference> {
        None
    }
}

/// Objects that carry vendor extensions.
pub trait HasExtensions {
    /// Extensions in document order.
    fn extensions(&self) -> &Extensions;

    /// Looks up one extension by key.
    fn find_extension(&self, key: &str) -> Option<&ValueReference<Value>> {
        find_item_in_map(key, self.extensions())
    }
}

/// Builds `node` as a fresh `T`.
pub fn build_target<T: Buildable>(node: NodeId, idx: &dyn SpecIndex) -> Result<T, BuildError> {
    debug!(
        kind = std::any::type_name::<T>(),
        line = idx.tree().mark(node).line,
        "building object"
    );
    let mut object = T::default();
    object.build(node, idx)?;
    Ok(object)
}

/// Finds a map entry by key.
///
/// Exact matches win; otherwise the first ASCII case-insensitive match is
/// returned (media types and header names are case-insensitive).
pub fn find_item_in_map<'a, T>(key: &str, map: &'a ObjectMap<T>) -> Option<&'a ValueReference<T>> {
    map.get(key).or_else(|| {
        map.find_by(|k| k.value.eq_ignore_ascii_case(key))
            .map(|p| &p.value)
    })
}
