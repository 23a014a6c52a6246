//! Insertion-ordered YAML mapping with structural keys.
//!
//! Entries live in a `Vec<Pair>` in first-insertion order. A hash index maps
//! the `ahash` digest of each key to the positions holding keys with that
//! digest, so lookups compare only a handful of candidates by structural
//! equality. Removal shifts later entries down and renumbers the index, the
//! same cost as `Vec::remove`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use ahash::RandomState;
use nohash_hasher::BuildNoHashHasher;
use smallvec::SmallVec;

use crate::node::Node;
use crate::style::CollectionStyle;
use crate::tags::Tag;

/// One `key: value` entry of a mapping.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pair {
    pub key: Node,
    pub value: Node,
}

impl Pair {
    pub fn new(key: impl Into<Node>, value: impl Into<Node>) -> Self {
        Pair {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<Node>, V: Into<Node>> From<(K, V)> for Pair {
    fn from((key, value): (K, V)) -> Self {
        Pair::new(key, value)
    }
}

/// Anything a mapping can be looked up by.
///
/// Strings and integers are wrapped into implicit scalar nodes, so `"key"`
/// finds the entry whose key is the plain scalar `key` whatever its tag or
/// style. Compound keys are looked up with a `Node`.
pub trait MappingKey {
    fn to_key(&self) -> Cow<'_, Node>;
}

impl MappingKey for Node {
    fn to_key(&self) -> Cow<'_, Node> {
        Cow::Borrowed(self)
    }
}

impl MappingKey for str {
    fn to_key(&self) -> Cow<'_, Node> {
        Cow::Owned(Node::from(self))
    }
}

impl MappingKey for String {
    fn to_key(&self) -> Cow<'_, Node> {
        Cow::Owned(Node::from(self.as_str()))
    }
}

impl MappingKey for i64 {
    fn to_key(&self) -> Cow<'_, Node> {
        Cow::Owned(Node::from(*self))
    }
}

impl<T: ?Sized + MappingKey> MappingKey for &T {
    fn to_key(&self) -> Cow<'_, Node> {
        (**self).to_key()
    }
}

type PositionIndex = HashMap<u64, SmallVec<[usize; 1]>, BuildNoHashHasher<u64>>;

/// A YAML mapping preserving first-insertion key order.
///
/// Keys are unique under structural [`Node`] equality. Assigning to an
/// existing key replaces the value in place; removing a key and adding it
/// again moves it to the end. Equality ignores order.
///
/// ```rust
/// use saphyr_tree::Mapping;
///
/// let mut m = Mapping::new();
/// m.insert("k1", "v1");
/// m.insert("k2", "v2");
/// m.insert("k1", "changed");
/// assert_eq!(m.keys().filter_map(|k| k.as_str()).collect::<Vec<_>>(), ["k1", "k2"]);
///
/// m.remove("k1");
/// m.insert("k1", "back");
/// assert_eq!(m.keys().filter_map(|k| k.as_str()).collect::<Vec<_>>(), ["k2", "k1"]);
/// ```
#[derive(Clone, Default)]
pub struct Mapping {
    entries: Vec<Pair>,
    index: PositionIndex,
    hasher: RandomState,
    /// Tag written on the mapping.
    pub tag: Tag,
    /// Block or flow presentation hint.
    pub style: CollectionStyle,
}

impl Mapping {
    /// Creates an empty mapping with implicit tag and default style.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Mapping {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity_and_hasher(capacity, BuildNoHashHasher::default()),
            ..Self::default()
        }
    }

    /// Creates a mapping from pairs in order; a repeated key keeps its first
    /// position and its last value.
    pub fn from_parts(
        pairs: impl IntoIterator<Item = Pair>,
        tag: Tag,
        style: CollectionStyle,
    ) -> Self {
        let mut mapping = Mapping {
            tag,
            style,
            ..Self::default()
        };
        for pair in pairs {
            mapping.insert(pair.key, pair.value);
        }
        mapping
    }

    fn digest(&self, key: &Node) -> u64 {
        self.hasher.hash_one(key)
    }

    fn position_of(&self, key: &Node) -> Option<usize> {
        let candidates = self.index.get(&self.digest(key))?;
        candidates
            .iter()
            .copied()
            .find(|&pos| &self.entries[pos].key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value stored under `key`.
    pub fn get<K: ?Sized + MappingKey>(&self, key: &K) -> Option<&Node> {
        let key = key.to_key();
        self.position_of(&key).map(|pos| &self.entries[pos].value)
    }

    /// Mutable value stored under `key`. Keys themselves are never handed out
    /// mutably because that would invalidate the index.
    pub fn get_mut<K: ?Sized + MappingKey>(&mut self, key: &K) -> Option<&mut Node> {
        let key = key.to_key();
        let pos = self.position_of(&key)?;
        Some(&mut self.entries[pos].value)
    }

    pub fn contains_key<K: ?Sized + MappingKey>(&self, key: &K) -> bool {
        let key = key.to_key();
        self.position_of(&key).is_some()
    }

    /// Inserts or replaces. A replaced value keeps its position and is returned.
    pub fn insert(&mut self, key: impl Into<Node>, value: impl Into<Node>) -> Option<Node> {
        let key = key.into();
        let value = value.into();
        if let Some(pos) = self.position_of(&key) {
            return Some(std::mem::replace(&mut self.entries[pos].value, value));
        }
        let digest = self.digest(&key);
        self.index.entry(digest).or_default().push(self.entries.len());
        self.entries.push(Pair { key, value });
        None
    }

    /// Dictionary-style assignment: `Some` inserts or replaces, `None` removes.
    /// Returns the previous value.
    pub fn set(&mut self, key: impl Into<Node>, value: Option<Node>) -> Option<Node> {
        let key = key.into();
        match value {
            Some(value) => self.insert(key, value),
            None => self.remove(&key),
        }
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove<K: ?Sized + MappingKey>(&mut self, key: &K) -> Option<Node> {
        let key = key.to_key();
        let pos = self.position_of(&key)?;
        let pair = self.entries.remove(pos);
        self.reindex_after_removal(self.digest(&pair.key), pos);
        Some(pair.value)
    }

    fn reindex_after_removal(&mut self, digest: u64, removed: usize) {
        if let Some(slots) = self.index.get_mut(&digest) {
            slots.retain(|pos| *pos != removed);
            if slots.is_empty() {
                self.index.remove(&digest);
            }
        }
        for slots in self.index.values_mut() {
            for pos in slots.iter_mut() {
                if *pos > removed {
                    *pos -= 1;
                }
            }
        }
    }

    /// Keeps only the entries for which `keep` returns true, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&Node, &Node) -> bool) {
        self.entries.retain(|pair| keep(&pair.key, &pair.value));
        self.rebuild_index();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    fn rebuild_index(&mut self) {
        let mut index = PositionIndex::with_capacity_and_hasher(
            self.entries.len(),
            BuildNoHashHasher::default(),
        );
        for (pos, pair) in self.entries.iter().enumerate() {
            index.entry(self.digest(&pair.key)).or_default().push(pos);
        }
        self.index = index;
    }

    /// Entries in insertion order.
    pub fn pairs(&self) -> &[Pair] {
        &self.entries
    }

    pub fn first(&self) -> Option<(&Node, &Node)> {
        self.entries.first().map(|p| (&p.key, &p.value))
    }

    pub fn last(&self) -> Option<(&Node, &Node)> {
        self.entries.last().map(|p| (&p.key, &p.value))
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Iterate with mutable access to values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Node, &mut Node)> {
        self.entries.iter_mut().map(|p| (&p.key, &mut p.value))
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Node> + ExactSizeIterator {
        self.entries.iter().map(|p| &p.key)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Node> + ExactSizeIterator {
        self.entries.iter().map(|p| &p.value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.entries.iter_mut().map(|p| &mut p.value)
    }
}

/// Iterator over `(key, value)` in insertion order.
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Pair>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Node, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|p| (&p.key, &p.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|p| (&p.key, &p.value))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a Node, &'a Node);
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Mapping {
    type Item = (Node, Node);
    type IntoIter = std::iter::Map<std::vec::IntoIter<Pair>, fn(Pair) -> (Node, Node)>;
    fn into_iter(self) -> Self::IntoIter {
        let split: fn(Pair) -> (Node, Node) = |p| (p.key, p.value);
        self.entries.into_iter().map(split)
    }
}

impl<K: Into<Node>, V: Into<Node>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        mapping.extend(iter);
        mapping
    }
}

impl<K: Into<Node>, V: Into<Node>> Extend<(K, V)> for Mapping {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Same keys mapping to equal values; insertion order is irrelevant.
impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|pair| other.get(&pair.key) == Some(&pair.value))
    }
}

impl Eq for Mapping {}

/// Fixed-seed hasher so that equal mappings with different per-map hashers
/// produce equal hashes.
fn pair_digest(pair: &Pair) -> u64 {
    RandomState::with_seeds(
        0x243f_6a88_85a3_08d3,
        0x1319_8a2e_0370_7344,
        0xa409_3822_299f_31d0,
        0x082e_fa98_ec4e_6c89,
    )
    .hash_one(pair)
}

impl Hash for Mapping {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Commutative combination keeps the hash order-independent, like equality.
        let combined = self
            .entries
            .iter()
            .fold(0u64, |acc, pair| acc.wrapping_add(pair_digest(pair)));
        self.entries.len().hash(state);
        combined.hash(state);
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
