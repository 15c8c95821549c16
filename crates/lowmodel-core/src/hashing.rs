//! Hash fragments for maps.
//!
//! Two deliberately separate paths:
//! - [`hash_extensions`] always follows document order.
//! - [`hash_pairs_sorted`] sorts by key, for maps whose order carries no meaning.
//!
//! [`hash_pairs_ordered`] is used for maps where order is part of the content
//! (media type priority, for instance).

use lowmodel_canonical::{entry_fragment, value_fragment};
use serde_json::Value;

use crate::protocol::Buildable;
use crate::reference::{Extensions, ObjectMap};

/// Text a value contributes to its entry's fragment.
pub trait HashFragment {
    /// Fragment text.
    fn hash_fragment(&self) -> String;
}

impl HashFragment for String {
    fn hash_fragment(&self) -> String {
        self.clone()
    }
}

impl HashFragment for Value {
    fn hash_fragment(&self) -> String {
        value_fragment(self)
    }
}

impl<T: Buildable> HashFragment for T {
    fn hash_fragment(&self) -> String {
        self.hash().to_hex()
    }
}

/// One `key-fragment` per entry, in document order.
pub fn hash_pairs_ordered<T: HashFragment>(pairs: &ObjectMap<T>) -> Vec<String> {
    pairs
        .iter()
        .map(|p| entry_fragment(&p.key.value, &p.value.value.hash_fragment()))
        .collect()
}

/// One `key-fragment` per entry, sorted by key.
///
/// Entries with equal keys keep their relative order.
pub fn hash_pairs_sorted<T: HashFragment>(pairs: &ObjectMap<T>) -> Vec<String> {
    let mut entries: Vec<(&str, String)> = pairs
        .iter()
        .map(|p| (p.key.value.as_str(), p.value.value.hash_fragment()))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .map(|(key, fragment)| entry_fragment(key, &fragment))
        .collect()
}

/// One `key-fragment` per extension, in the order they were extracted.
///
/// Extension order is significant for the digest even where the object's
/// other maps are not.
pub fn hash_extensions(extensions: &Extensions) -> Vec<String> {
    let mut fragments = Vec::with_capacity(extensions.len());
    for p in extensions {
        fragments.push(entry_fragment(&p.key.value, &value_fragment(&p.value.value)));
    }
    fragments
}
