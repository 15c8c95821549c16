//! Extraction engine.
//!
//! Each function reads one field shape out of a mapping node:
//!
//! | shape | function |
//! |---|---|
//! | vendor extensions | [`extract_extensions`] |
//! | scalar field | [`extract_string`], [`extract_bool`], [`extract_value`] |
//! | nested object | [`extract_object`], [`extract_object_raw`] |
//! | map of objects | [`extract_map`], [`extract_map_no_lookup`], [`extract_map_extensions`] |
//! | map of scalars | [`extract_scalar_map`] |
//!
//! A missing label is never an error: the field comes back empty. A node of
//! the wrong shape is a [`BuildError::StructuralMismatch`]. A nested Build
//! failure is wrapped in [`BuildError::NestedBuildFailure`] with the inner
//! error untouched. An explicit null (`~` or an empty value) counts as absent.

use lowmodel_node::{scalar_value, FromNode, NodeId, NodeKind, Tree};
use serde_json::Value;
use tracing::{trace, warn};

use crate::errors::BuildError;
use crate::index::SpecIndex;
use crate::options::MergeKeyPolicy;
use crate::protocol::{build_target, Buildable};
use crate::reference::{
    Extensions, KeyReference, NodeReference, ObjectMap, Reference, ValueReference,
};

/// Key marking a reference mapping.
pub const REF_LABEL: &str = "$ref";

/// Resolves aliases on `root` and applies the merge key policy.
///
/// Every `Buildable::build` starts with this.
pub fn prepare(root: NodeId, idx: &dyn SpecIndex) -> Result<NodeId, BuildError> {
    let root = idx.tree().resolve_alias(root);
    check_for_merge_nodes(root, idx)?;
    Ok(root)
}

/// Reports merge keys in `root` according to [`MergeKeyPolicy`].
///
/// Merge content is never applied.
pub fn check_for_merge_nodes(root: NodeId, idx: &dyn SpecIndex) -> Result<(), BuildError> {
    let tree = idx.tree();
    for key in tree.merge_keys(root) {
        let mark = tree.mark(key);
        match idx.options().merge_keys {
            MergeKeyPolicy::Warn => warn!(
                line = mark.line,
                column = mark.column,
                "merge keys are not supported; entry left unmerged"
            ),
            MergeKeyPolicy::Reject => return Err(BuildError::MergeKey { mark }),
            MergeKeyPolicy::Ignore => {}
        }
    }
    Ok(())
}

/// Pointer text when `node` is a `{$ref: ...}` mapping.
pub fn ref_pointer(tree: &Tree, node: NodeId) -> Option<String> {
    let node = tree.resolve_alias(node);
    if !tree.is_mapping(node) {
        return None;
    }
    let (_, value) = tree.find_key(REF_LABEL, node)?;
    if tree.is_scalar(value) {
        Some(tree.text(value).to_string())
    } else {
        None
    }
}

/// Resolves `node` through the index when it is a `$ref` mapping.
pub fn locate_ref(
    node: NodeId,
    idx: &dyn SpecIndex,
) -> Result<Option<(NodeId, Reference)>, BuildError> {
    let tree = idx.tree();
    let Some(pointer) = ref_pointer(tree, node) else {
        return Ok(None);
    };
    let target = idx
        .resolve_reference(&pointer)
        .map_err(|source| BuildError::ReferenceResolution {
            mark: tree.mark(node),
            source,
        })?;
    Ok(Some((tree.resolve_alias(target), Reference::new(pointer, target))))
}

fn is_null(tree: &Tree, node: NodeId) -> bool {
    let node = tree.resolve_alias(node);
    tree.is_scalar(node) && scalar_value(tree, node).is_null()
}

fn require(
    context: &str,
    expected: NodeKind,
    node: NodeId,
    tree: &Tree,
) -> Result<NodeId, BuildError> {
    let node = tree.resolve_alias(node);
    let found = tree.node(node);
    if found.kind != expected {
        return Err(BuildError::StructuralMismatch {
            context: context.to_string(),
            expected,
            found: found.kind,
            mark: found.mark,
        });
    }
    Ok(node)
}

fn key_text(context: &str, key: NodeId, tree: &Tree) -> Result<String, BuildError> {
    let key = require(context, NodeKind::Scalar, key, tree)?;
    Ok(tree.text(key).to_string())
}

/// Follows `$ref` and checks the target is a mapping.
fn resolve_object_node(
    context: &str,
    node: NodeId,
    idx: &dyn SpecIndex,
) -> Result<(NodeId, Option<Reference>), BuildError> {
    let (target, reference) = match locate_ref(node, idx)? {
        Some((target, reference)) => (target, Some(reference)),
        None => (node, None),
    };
    let target = require(context, NodeKind::Mapping, target, idx.tree())?;
    Ok((target, reference))
}

fn build_resolved<T: Buildable>(
    target: NodeId,
    reference: Option<&Reference>,
    idx: &dyn SpecIndex,
) -> Result<T, BuildError> {
    let mut object: T = build_target(target, idx)?;
    if let (Some(reference), Some(slot)) = (reference, object.reference_mut()) {
        *slot = reference.clone();
    }
    Ok(object)
}

/// Collects every vendor-extension entry of `root`, in document order.
///
/// Other keys are left alone for typed extraction.
pub fn extract_extensions(root: NodeId, idx: &dyn SpecIndex) -> Result<Extensions, BuildError> {
    let tree = idx.tree();
    let options = idx.options();
    let mut extensions = Extensions::new();
    for (k, v) in tree.entries(root) {
        if !tree.is_scalar(k) {
            continue;
        }
        let key = tree.text(k);
        if !options.is_extension(key) {
            continue;
        }
        let value = Value::from_node(tree, v)?;
        extensions.push(
            KeyReference::new(key.to_string(), k),
            ValueReference::new(value, v),
        );
    }
    Ok(extensions)
}

/// Reads a scalar field as text. Null reads as an empty string.
pub fn extract_string(
    label: &str,
    root: NodeId,
    idx: &dyn SpecIndex,
) -> Result<NodeReference<String>, BuildError> {
    let tree = idx.tree();
    let Some((key, value)) = tree.find_key(label, root) else {
        return Ok(NodeReference::default());
    };
    let scalar = require(label, NodeKind::Scalar, value, tree)?;
    let text = if is_null(tree, scalar) {
        String::new()
    } else {
        tree.text(scalar).to_string()
    };
    Ok(NodeReference {
        value: text,
        key_node: Some(key),
        value_node: Some(value),
        reference: None,
    })
}

/// Reads a boolean scalar field.
pub fn extract_bool(
    label: &str,
    root: NodeId,
    idx: &dyn SpecIndex,
) -> Result<NodeReference<bool>, BuildError> {
    let tree = idx.tree();
    let Some((key, value)) = tree.find_key(label, root) else {
        return Ok(NodeReference::default());
    };
    if is_null(tree, value) {
        return Ok(NodeReference::default());
    }
    require(label, NodeKind::Scalar, value, tree)?;
    Ok(NodeReference {
        value: bool::from_node(tree, value)?,
        key_node: Some(key),
        value_node: Some(value),
        reference: None,
    })
}

/// Reads a field of any shape as an untyped value.
pub fn extract_value(
    label: &str,
    root: NodeId,
    idx: &dyn SpecIndex,
) -> Result<NodeReference<Value>, BuildError> {
    let tree = idx.tree();
    let Some((key, value)) = tree.find_key(label, root) else {
        return Ok(NodeReference::default());
    };
    Ok(NodeReference {
        value: Value::from_node(tree, value)?,
        key_node: Some(key),
        value_node: Some(value),
        reference: None,
    })
}

/// Builds `T` from an already located node, following `$ref` first.
///
/// Errors from `T::build` are returned unwrapped; callers iterating their
/// own entries add context themselves.
pub fn extract_object_raw<T: Buildable>(
    node: NodeId,
    idx: &dyn SpecIndex,
) -> Result<(T, Option<Reference>), BuildError> {
    let (target, reference) = resolve_object_node("object", node, idx)?;
    let object = build_resolved(target, reference.as_ref(), idx)?;
    Ok((object, reference))
}

/// Builds the nested object under `label`.
pub fn extract_object<T: Buildable>(
    label: &str,
    root: NodeId,
    idx: &dyn SpecIndex,
) -> Result<NodeReference<T>, BuildError> {
    let tree = idx.tree();
    let Some((key, value)) = tree.find_key(label, root) else {
        return Ok(NodeReference::default());
    };
    if is_null(tree, value) {
        return Ok(NodeReference::default());
    }
    let (target, reference) = resolve_object_node(label, value, idx)?;
    let object = build_resolved(target, reference.as_ref(), idx)
        .map_err(|e| BuildError::nested(label, e))?;
    Ok(NodeReference {
        value: object,
        key_node: Some(key),
        value_node: Some(value),
        reference,
    })
}

/// Which keys of a map become entries.
#[derive(Clone, Copy)]
enum KeyFilter {
    /// Skip keys matching the extension pattern.
    SkipExtensions,
    /// Skip keys matching the extension pattern, ignoring ASCII case.
    SkipExtensionsIgnoreCase,
    /// Keep every key.
    KeepAll,
}

fn collect_entries<T: Buildable>(
    context: &str,
    map: NodeId,
    filter: KeyFilter,
    idx: &dyn SpecIndex,
) -> Result<ObjectMap<T>, BuildError> {
    let tree = idx.tree();
    let options = idx.options();
    let mut entries = ObjectMap::new();
    for (k, v) in tree.entries(map) {
        if tree.is_merge_key(k) {
            continue;
        }
        let key = key_text(context, k, tree)?;
        let skip = match filter {
            KeyFilter::SkipExtensions => options.is_extension(&key),
            KeyFilter::SkipExtensionsIgnoreCase => {
                options.is_extension(&key.to_ascii_lowercase())
            }
            KeyFilter::KeepAll => false,
        };
        if skip {
            continue;
        }
        let entry_context = format!("{}.{}", context, key);
        trace!(entry = entry_context.as_str(), "extracting map entry");
        let (target, reference) = resolve_object_node(&entry_context, v, idx)?;
        let object = build_resolved(target, reference.as_ref(), idx)
            .map_err(|e| BuildError::nested(entry_context, e))?;
        entries.push(
            KeyReference::new(key, k),
            ValueReference {
                value: object,
                value_node: v,
                reference,
            },
        );
    }
    Ok(entries)
}

fn extract_labelled_map<T: Buildable>(
    label: &str,
    root: NodeId,
    filter: KeyFilter,
    idx: &dyn SpecIndex,
) -> Result<NodeReference<ObjectMap<T>>, BuildError> {
    let tree = idx.tree();
    let Some((key, value)) = tree.find_key(label, root) else {
        return Ok(NodeReference::default());
    };
    if is_null(tree, value) {
        return Ok(NodeReference::default());
    }
    let (map, reference) = resolve_object_node(label, value, idx)?;
    check_for_merge_nodes(map, idx)?;
    let entries = collect_entries(label, map, filter, idx)?;
    Ok(NodeReference {
        value: entries,
        key_node: Some(key),
        value_node: Some(value),
        reference,
    })
}

/// Builds every non-extension entry of the mapping under `label`.
pub fn extract_map<T: Buildable>(
    label: &str,
    root: NodeId,
    idx: &dyn SpecIndex,
) -> Result<NodeReference<ObjectMap<T>>, BuildError> {
    extract_labelled_map(label, root, KeyFilter::SkipExtensions, idx)
}

/// Builds every non-extension entry of `root` itself.
pub fn extract_map_no_lookup<T: Buildable>(
    root: NodeId,
    idx: &dyn SpecIndex,
) -> Result<ObjectMap<T>, BuildError> {
    let map = require("map", NodeKind::Mapping, root, idx.tree())?;
    collect_entries("map", map, KeyFilter::SkipExtensions, idx)
}

/// Like [`extract_map`], for maps whose entry names may look like extensions.
///
/// With `allow_nested_extensions` every key becomes an entry (a header named
/// `X-Rate-Limit` is a header, not an extension); each entry's own
/// extensions are kept by its Build either way. Without it, keys matching
/// the extension pattern in any ASCII case are skipped.
pub fn extract_map_extensions<T: Buildable>(
    label: &str,
    root: NodeId,
    idx: &dyn SpecIndex,
    allow_nested_extensions: bool,
) -> Result<NodeReference<ObjectMap<T>>, BuildError> {
    let filter = if allow_nested_extensions {
        KeyFilter::KeepAll
    } else {
        KeyFilter::SkipExtensionsIgnoreCase
    };
    extract_labelled_map(label, root, filter, idx)
}

/// Reads every non-extension entry of `root` as a scalar string.
pub fn extract_scalar_map(
    root: NodeId,
    idx: &dyn SpecIndex,
) -> Result<ObjectMap<String>, BuildError> {
    let tree = idx.tree();
    let options = idx.options();
    let map = require("map", NodeKind::Mapping, root, tree)?;
    let mut entries = ObjectMap::new();
    for (k, v) in tree.entries(map) {
        if tree.is_merge_key(k) {
            continue;
        }
        let key = key_text("map", k, tree)?;
        if options.is_extension(&key) {
            continue;
        }
        let scalar = require(&key, NodeKind::Scalar, v, tree)?;
        entries.push(
            KeyReference::new(key, k),
            ValueReference::new(tree.text(scalar).to_string(), v),
        );
    }
    Ok(entries)
}
