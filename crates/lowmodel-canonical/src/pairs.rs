//! Order-preserving key/value container.
//!
//! Document maps are small (tens of entries) and their order carries meaning
//! (content negotiation priority, for one), so [`Pairs`] is a plain vector of
//! entries with linear lookup rather than a hash map. Duplicate keys are
//! accepted on insertion; lookups return the first match.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;

/// One key/value entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pair<K, V> {
    /// Entry key.
    pub key: K,
    /// Entry value.
    pub value: V,
}

/// Ordered sequence of key/value entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pairs<K, V>(Vec<Pair<K, V>>);

impl<K, V> Default for Pairs<K, V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<K, V> Pairs<K, V> {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Appends an entry. Existing entries with the same key are kept.
    pub fn push(&mut self, key: K, value: V) {
        self.0.push(Pair { key, value });
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pair<K, V>> {
        self.0.iter()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.0.iter().map(|p| &p.key)
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.iter().map(|p| &p.value)
    }

    /// Entries as a slice.
    pub fn as_slice(&self) -> &[Pair<K, V>] {
        &self.0
    }

    /// Index of the first entry whose key satisfies `pred`.
    pub fn position_by<F>(&self, mut pred: F) -> Option<usize>
    where
        F: FnMut(&K) -> bool,
    {
        self.0.iter().position(|p| pred(&p.key))
    }

    /// First entry whose key satisfies `pred`.
    pub fn find_by<F>(&self, pred: F) -> Option<&Pair<K, V>>
    where
        F: FnMut(&K) -> bool,
    {
        self.position_by(pred).map(|i| &self.0[i])
    }

    /// Removes the entry at `index`, shifting later entries down.
    ///
    /// Returns `None` when `index` is out of range.
    pub fn delete_at(&mut self, index: usize) -> Option<Pair<K, V>> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    /// Consumes the container, returning the entries.
    pub fn into_vec(self) -> Vec<Pair<K, V>> {
        self.0
    }
}

impl<K, V> Pairs<K, V> {
    /// Value of the first entry with `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find_by(|k| k.borrow() == key).map(|p| &p.value)
    }

    /// Value of the first entry with `key`, or `V::default()` when absent.
    pub fn get_or_default<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        V: Clone + Default,
    {
        self.get(key).cloned().unwrap_or_default()
    }

    /// Returns true if some entry has `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes the first entry with `key`, returning its value.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let index = self.position_by(|k| k.borrow() == key)?;
        self.delete_at(index).map(|p| p.value)
    }
}

impl<K, V> FromIterator<(K, V)> for Pairs<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| Pair { key, value })
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for Pairs<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push(key, value);
        }
    }
}

impl<K, V> IntoIterator for Pairs<K, V> {
    type Item = Pair<K, V>;
    type IntoIter = std::vec::IntoIter<Pair<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Pairs<K, V> {
    type Item = &'a Pair<K, V>;
    type IntoIter = std::slice::Iter<'a, Pair<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Serialize, V: Serialize> Serialize for Pairs<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for p in &self.0 {
            map.serialize_entry(&p.key, &p.value)?;
        }
        map.end()
    }
}

struct PairsVisitor<K, V>(PhantomData<fn() -> Pairs<K, V>>);

impl<'de, K, V> Visitor<'de> for PairsVisitor<K, V>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = Pairs<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut pairs = Pairs::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry()? {
            pairs.push(key, value);
        }
        Ok(pairs)
    }

    // An empty YAML document decodes as unit.
    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Pairs::new())
    }
}

impl<'de, K, V> Deserialize<'de> for Pairs<K, V>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PairsVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Pairs<String, i32> {
        let mut pairs = Pairs::new();
        pairs.push("b".to_string(), 1);
        pairs.push("a".to_string(), 2);
        pairs.push("b".to_string(), 3);
        pairs
    }

    #[test]
    fn get_returns_first_match() {
        let pairs = sample();
        assert_eq!(pairs.get("b"), Some(&1));
        assert_eq!(pairs.get("missing"), None);
        assert_eq!(pairs.get_or_default("missing"), 0);
        assert!(pairs.contains_key("a"));
    }

    #[test]
    fn push_keeps_duplicates() {
        let pairs = sample();
        assert_eq!(pairs.len(), 3);
        let keys: Vec<&str> = pairs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "b"]);
    }

    #[test]
    fn delete_removes_first_match_and_shifts() {
        let mut pairs = sample();
        assert_eq!(pairs.delete("b"), Some(1));
        let keys: Vec<&str> = pairs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(pairs.get("b"), Some(&3));
        assert_eq!(pairs.delete("zzz"), None);
    }

    #[test]
    fn delete_at_bounds() {
        let mut pairs = sample();
        let removed = pairs.delete_at(1).unwrap();
        assert_eq!(removed.key, "a");
        assert_eq!(pairs.len(), 2);
        assert!(pairs.delete_at(5).is_none());
    }
}
