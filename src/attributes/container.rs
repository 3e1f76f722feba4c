//! Mutable working sets and frozen snapshots.
//!
//! The two container types enforce the working-set / snapshot split at the
//! type level: rules mutate a [`MutableAttributeContainer`], and only
//! [`MutableAttributeContainer::freeze`] — which consumes the working set —
//! can produce an [`ImmutableAttributes`]. A snapshot therefore never shares
//! storage with a live mutable view, and mutating one working set cannot be
//! observed through any snapshot or any other working set.

use std::collections::BTreeMap;

use super::types::AttributeValue;

/// A mutable key/value attribute set.
///
/// Keys are unique; setting an existing key overwrites its value. Iteration
/// order is the lexicographic key order, so replaying the same rules over
/// the same base always observes attributes in the same order.
///
/// # Examples
///
/// ```
/// use variant_rules::attributes::MutableAttributeContainer;
///
/// let mut attrs = MutableAttributeContainer::new();
/// attrs.set("platform", "linux-x86_64");
/// attrs.set("debuggable", true);
/// attrs.remove("debuggable");
///
/// let snapshot = attrs.freeze();
/// assert_eq!(snapshot.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutableAttributeContainer {
    entries: BTreeMap<String, AttributeValue>,
}

impl MutableAttributeContainer {
    /// Creates an empty working set.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Creates a working set holding a content copy of `base`.
    ///
    /// The copy owns its storage; mutating it is never observable through
    /// `base`.
    pub fn from_immutable(base: &ImmutableAttributes) -> Self {
        Self {
            entries: base.entries.clone(),
        }
    }

    /// Sets an attribute, overwriting any existing value for the key.
    ///
    /// Returns the previous value, if any.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.entries.insert(name.into(), value.into())
    }

    /// Removes an attribute by key.
    ///
    /// Returns the removed value, or `None` if the key was absent.
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.entries.remove(name)
    }

    /// Returns the value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries.get(name)
    }

    /// Returns `true` if an attribute with the given key exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the working set holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Freezes this working set into an immutable snapshot.
    ///
    /// Consumes `self`: once frozen, no mutable handle to the storage
    /// remains anywhere.
    pub fn freeze(self) -> ImmutableAttributes {
        ImmutableAttributes {
            entries: self.entries,
        }
    }
}

/// A frozen attribute snapshot.
///
/// Produced by [`MutableAttributeContainer::freeze`]; never mutated
/// afterwards. Snapshots own their storage, so distinct snapshots are fully
/// independent even when derived from identical inputs, and `Clone` yields
/// another independent copy.
///
/// Equality is structural: two snapshots compare equal exactly when they
/// hold the same key/value pairs, regardless of construction history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImmutableAttributes {
    entries: BTreeMap<String, AttributeValue>,
}

impl ImmutableAttributes {
    /// Returns the empty attribute set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries.get(name)
    }

    /// Returns `true` if an attribute with the given key exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the snapshot holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns all attribute keys in key order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(|k| k.as_str()).collect()
    }
}
