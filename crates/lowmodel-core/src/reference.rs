use lowmodel_canonical::Pairs;
use lowmodel_node::{Mark, NodeId, Tree};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

/// Ordered map of named nested values, keyed as written in the document.
pub type ObjectMap<T> = Pairs<KeyReference<String>, ValueReference<T>>;

/// Vendor extensions of an object, in document order.
pub type Extensions = ObjectMap<Value>;

/// Records that a value was reached through a `$ref` pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reference {
    /// Literal pointer text, e.g. `#/components/responses/NotFound`.
    pub pointer: Option<String>,
    /// Node the index resolved the pointer to.
    pub target: Option<NodeId>,
}

impl Reference {
    /// Creates a resolved reference.
    pub fn new(pointer: impl Into<String>, target: NodeId) -> Self {
        Self {
            pointer: Some(pointer.into()),
            target: Some(target),
        }
    }

    /// Returns true if the value was defined by reference rather than inline.
    pub fn is_reference(&self) -> bool {
        self.pointer.is_some()
    }
}

/// Decoded map key plus the node it was read from.
///
/// Equality and hashing look at the decoded key only; the node handle is
/// there for diagnostics.
#[derive(Debug, Clone)]
pub struct KeyReference<K> {
    /// Decoded key.
    pub value: K,
    /// Key node.
    pub key_node: NodeId,
}

impl<K> KeyReference<K> {
    /// Creates a key reference.
    pub fn new(value: K, key_node: NodeId) -> Self {
        Self { value, key_node }
    }

    /// Source position of the key.
    pub fn mark(&self, tree: &Tree) -> Mark {
        tree.mark(self.key_node)
    }
}

impl<K: PartialEq> PartialEq for KeyReference<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K: Eq> Eq for KeyReference<K> {}

impl<K: Hash> Hash for KeyReference<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl Borrow<str> for KeyReference<String> {
    fn borrow(&self) -> &str {
        &self.value
    }
}

impl<K: Serialize> Serialize for KeyReference<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

/// Decoded value plus its node and, when it came through `$ref`, the reference.
#[derive(Debug, Clone)]
pub struct ValueReference<V> {
    /// Decoded value.
    pub value: V,
    /// Value node as written (the `$ref` mapping when referenced).
    pub value_node: NodeId,
    /// Set when the value was reached through `$ref`.
    pub reference: Option<Reference>,
}

impl<V> ValueReference<V> {
    /// Creates an inline value reference.
    pub fn new(value: V, value_node: NodeId) -> Self {
        Self {
            value,
            value_node,
            reference: None,
        }
    }

    /// Returns true if the value was defined by reference.
    pub fn is_reference(&self) -> bool {
        self.reference.as_ref().is_some_and(Reference::is_reference)
    }

    /// Source position of the value.
    pub fn mark(&self, tree: &Tree) -> Mark {
        tree.mark(self.value_node)
    }
}

impl<V: PartialEq> PartialEq for ValueReference<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<V: Serialize> Serialize for ValueReference<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

/// Value of a singular named field plus its label and content nodes.
///
/// An absent field has neither node set and holds `V::default()`.
#[derive(Debug, Clone, Default)]
pub struct NodeReference<V> {
    /// Decoded value.
    pub value: V,
    /// Label (key) node.
    pub key_node: Option<NodeId>,
    /// Content node as written.
    pub value_node: Option<NodeId>,
    /// Set when the content was reached through `$ref`.
    pub reference: Option<Reference>,
}

impl<V> NodeReference<V> {
    /// Returns true if the field was not present in the document.
    pub fn is_empty(&self) -> bool {
        self.key_node.is_none() && self.value_node.is_none()
    }

    /// Returns true if the content was defined by reference.
    pub fn is_reference(&self) -> bool {
        self.reference.as_ref().is_some_and(Reference::is_reference)
    }

    /// Source position of the content, when present.
    pub fn mark(&self, tree: &Tree) -> Option<Mark> {
        self.value_node.map(|id| tree.mark(id))
    }

    /// Value when present.
    pub fn as_option(&self) -> Option<&V> {
        if self.is_empty() {
            None
        } else {
            Some(&self.value)
        }
    }
}

impl<V: Serialize> Serialize for NodeReference<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}
