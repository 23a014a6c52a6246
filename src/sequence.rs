use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};

use crate::node::Node;
use crate::style::CollectionStyle;
use crate::tags::Tag;

/// An ordered YAML sequence of [`Node`]s.
///
/// Reads go through `Deref<Target = [Node]>` (`len`, `get`, `first`, `last`,
/// `iter`, slicing); growth and removal are the inherent methods below, which
/// report out-of-range positions instead of panicking.
#[derive(Clone, Debug, Default)]
pub struct Sequence {
    items: Vec<Node>,
    /// Tag written on the sequence.
    pub tag: Tag,
    /// Block or flow presentation hint.
    pub style: CollectionStyle,
}

impl Sequence {
    /// Creates an empty sequence with implicit tag and default style.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sequence with the given initial capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Sequence {
            items: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Creates a sequence from items, tag and style.
    pub fn from_parts(items: Vec<Node>, tag: Tag, style: CollectionStyle) -> Self {
        Sequence { items, tag, style }
    }

    /// Appends a node at the end.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.items.push(node.into());
    }

    /// Inserts a node at `index`, shifting later items up by one.
    ///
    /// Returns `false` (and drops nothing) when `index > len`.
    pub fn insert(&mut self, index: usize, node: impl Into<Node>) -> bool {
        if index > self.items.len() {
            return false;
        }
        self.items.insert(index, node.into());
        true
    }

    /// Removes and returns the node at `index`, shifting later items down by one.
    pub fn remove(&mut self, index: usize) -> Option<Node> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Removes and returns the last node.
    pub fn pop(&mut self) -> Option<Node> {
        self.items.pop()
    }

    /// Keeps only the nodes for which `keep` returns true, preserving order.
    pub fn retain(&mut self, keep: impl FnMut(&Node) -> bool) {
        self.items.retain(keep);
    }

    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Consumes the sequence, returning its items.
    pub fn into_vec(self) -> Vec<Node> {
        self.items
    }
}

impl Deref for Sequence {
    type Target = [Node];

    fn deref(&self) -> &[Node] {
        &self.items
    }
}

impl DerefMut for Sequence {
    fn deref_mut(&mut self) -> &mut [Node] {
        &mut self.items
    }
}

/// Element-wise, in order. Tag and style are presentation and do not count.
impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for Sequence {}

impl Hash for Sequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

impl From<Vec<Node>> for Sequence {
    fn from(items: Vec<Node>) -> Self {
        Sequence {
            items,
            ..Self::default()
        }
    }
}

impl<T: Into<Node>> FromIterator<T> for Sequence {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sequence::from(iter.into_iter().map(Into::into).collect::<Vec<Node>>())
    }
}

impl<T: Into<Node>> Extend<T> for Sequence {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a mut Sequence {
    type Item = &'a mut Node;
    type IntoIter = std::slice::IterMut<'a, Node>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

impl IntoIterator for Sequence {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
