//! The YAML document tree.
//!
//! A [`Node`] is exactly one of three shapes: a scalar holding raw text, a
//! sequence of nodes, or a mapping of nodes to nodes. Scalars are never typed
//! at construction time; the typed accessors (`as_bool`, `as_i64`, `as_f64`,
//! `as_timestamp`, `as_binary`, ...) parse the text when asked and return
//! `None` when the text, or the node shape, does not fit.
//!
//! ```rust
//! use saphyr_tree::{node, Node};
//!
//! let doc = node!({
//!     "name" => "saphyr",
//!     "stable" => "yes",
//!     "ports" => [8080, "0x1F90", "none"],
//! });
//!
//! assert_eq!(doc["name"].as_str(), Some("saphyr"));
//! assert_eq!(doc["stable"].as_bool(), Some(true));
//! assert_eq!(doc["ports"].array::<i64>(), vec![8080, 8080]);
//! assert!(doc["missing"]["deeper"].is_null());
//! ```

use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};

use crate::base64::decode_base64_yaml;
use crate::convert::FromNode;
use crate::index::Index;
use crate::mapping::{Mapping, Pair};
use crate::parse_scalars::{
    parse_float, parse_int, parse_timestamp, parse_yaml11_bool, scalar_is_null,
};
use crate::resolver::Resolver;
use crate::sequence::Sequence;
use crate::style::{CollectionStyle, ScalarStyle};
use crate::tags::{ResolvedTag, Tag};
use crate::zmij_format::float_to_yaml_string;

/// A scalar: raw text plus the tag and style it was written with.
#[derive(Clone, Debug, Default)]
pub struct Scalar {
    pub content: String,
    pub tag: Tag,
    pub style: ScalarStyle,
}

impl Scalar {
    pub fn new(content: impl Into<String>, tag: Tag, style: ScalarStyle) -> Self {
        Scalar {
            content: content.into(),
            tag,
            style,
        }
    }

    /// Effective tag under `resolver`.
    ///
    /// Untagged quoted and block scalars are strings; only plain text goes
    /// through the implicit rules.
    pub fn resolved_tag_with(&self, resolver: &Resolver) -> ResolvedTag {
        if self.tag == Tag::Implicit && !self.style.is_plain_or_any() {
            return ResolvedTag::Str;
        }
        resolver.resolve(&self.content, &self.tag)
    }
}

/// Scalars compare by text only; tag and style are presentation.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Raw text, never the numeric value: `.nan` must equal itself as a key.
        self.content.hash(state);
    }
}

/// One YAML construct.
#[derive(Clone, Debug)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Sequence),
    Mapping(Mapping),
}

impl Default for Node {
    fn default() -> Self {
        Node::null()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Scalar(a), Node::Scalar(b)) => a == b,
            (Node::Sequence(a), Node::Sequence(b)) => a == b,
            (Node::Mapping(a), Node::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Node::Scalar(v) => v.hash(state),
            Node::Sequence(v) => v.hash(state),
            Node::Mapping(v) => v.hash(state),
        }
    }
}

static NULL: LazyLock<Node> = LazyLock::new(Node::null);

impl Node {
    /// Plain implicit scalar `null`.
    pub fn null() -> Self {
        Node::Scalar(Scalar::new("null", Tag::Implicit, ScalarStyle::Any))
    }

    /// Scalar node from raw text, tag and style.
    pub fn scalar(content: impl Into<String>, tag: Tag, style: ScalarStyle) -> Self {
        Node::Scalar(Scalar::new(content, tag, style))
    }

    /// Sequence node from items, tag and style.
    pub fn sequence(items: Vec<Node>, tag: Tag, style: CollectionStyle) -> Self {
        Node::Sequence(Sequence::from_parts(items, tag, style))
    }

    /// Mapping node from pairs in order, tag and style.
    pub fn mapping(pairs: impl IntoIterator<Item = Pair>, tag: Tag, style: CollectionStyle) -> Self {
        Node::Mapping(Mapping::from_parts(pairs, tag, style))
    }

    /// Tag written on this node.
    pub fn tag(&self) -> &Tag {
        match self {
            Node::Scalar(s) => &s.tag,
            Node::Sequence(s) => &s.tag,
            Node::Mapping(m) => &m.tag,
        }
    }

    /// Replace the tag, keeping shape and contents.
    pub fn set_tag(&mut self, tag: Tag) {
        match self {
            Node::Scalar(s) => s.tag = tag,
            Node::Sequence(s) => s.tag = tag,
            Node::Mapping(m) => m.tag = tag,
        }
    }

    /// Effective tag under the default YAML 1.1 rules.
    pub fn resolved_tag(&self) -> ResolvedTag {
        self.resolved_tag_with(Resolver::yaml11())
    }

    /// Effective tag under a custom resolver.
    ///
    /// Collections resolve to `seq`/`map` unless explicitly tagged.
    pub fn resolved_tag_with(&self, resolver: &Resolver) -> ResolvedTag {
        match self {
            Node::Scalar(s) => s.resolved_tag_with(resolver),
            Node::Sequence(s) => match &s.tag {
                Tag::Explicit(uri) => ResolvedTag::from_uri(uri),
                Tag::Implicit | Tag::NonSpecific => ResolvedTag::Seq,
            },
            Node::Mapping(m) => match &m.tag {
                Tag::Explicit(uri) => ResolvedTag::from_uri(uri),
                Tag::Implicit | Tag::NonSpecific => ResolvedTag::Map,
            },
        }
    }

    pub fn scalar_style(&self) -> Option<ScalarStyle> {
        match self {
            Node::Scalar(s) => Some(s.style),
            _ => None,
        }
    }

    pub fn collection_style(&self) -> Option<CollectionStyle> {
        match self {
            Node::Sequence(s) => Some(s.style),
            Node::Mapping(m) => Some(m.style),
            Node::Scalar(_) => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Node::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Node::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Sequence> {
        match self {
            Node::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Raw text of a scalar, whatever it resolves to.
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().map(|s| s.content.as_str())
    }

    /// YAML 1.1 boolean (`true`, `yes`, `on`, `false`, `no`, `off` in three casings).
    pub fn as_bool(&self) -> Option<bool> {
        self.as_str().and_then(parse_yaml11_bool)
    }

    /// Integer in any YAML 1.1 form that fits `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_str()
            .and_then(parse_int)
            .and_then(|v| i64::try_from(v).ok())
    }

    /// Integer in any YAML 1.1 form that fits `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_str()
            .and_then(parse_int)
            .and_then(|v| u64::try_from(v).ok())
    }

    /// Float, integer, sexagesimal or `.inf`/`.nan` text as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_str().and_then(parse_float)
    }

    /// True for scalars spelled `~`, `null`, `Null`, `NULL` or empty.
    pub fn is_null(&self) -> bool {
        self.as_str().is_some_and(scalar_is_null)
    }

    pub fn as_null(&self) -> Option<()> {
        self.is_null().then_some(())
    }

    /// Timestamp normalized to UTC.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        self.as_str().and_then(parse_timestamp)
    }

    /// Base64 payload of the scalar. The tag is not consulted: any scalar
    /// that decodes is accepted, so untagged binary in older documents still reads.
    pub fn as_binary(&self) -> Option<Vec<u8>> {
        self.as_str().and_then(decode_base64_yaml)
    }

    /// Generic typed accessor.
    pub fn typed<T: FromNode>(&self) -> Option<T> {
        T::from_node(self)
    }

    /// Children of a sequence converted to `T`, skipping those that do not convert.
    ///
    /// Non-sequences yield an empty vector.
    pub fn array<T: FromNode>(&self) -> Vec<T> {
        match self {
            Node::Sequence(seq) => seq.iter().filter_map(T::from_node).collect(),
            _ => Vec::new(),
        }
    }

    /// Look up a mapping value by key or a sequence item by position.
    ///
    /// Returns `None` for missing keys, out-of-range positions and shape
    /// mismatches; never panics.
    pub fn get<I: Index>(&self, index: I) -> Option<&Node> {
        index.index_into(self)
    }

    pub fn get_mut<I: Index>(&mut self, index: I) -> Option<&mut Node> {
        index.index_into_mut(self)
    }

    /// Dictionary-style assignment on a mapping: `Some` inserts or replaces in
    /// place, `None` removes. Any other shape is left untouched.
    ///
    /// Returns the previous value.
    pub fn set(&mut self, key: impl Into<Node>, value: Option<Node>) -> Option<Node> {
        match self {
            Node::Mapping(m) => m.set(key, value),
            Node::Scalar(_) | Node::Sequence(_) => None,
        }
    }

    /// Number of nodes in this subtree, counting keys, values and itself.
    pub fn count(&self) -> usize {
        match self {
            Node::Scalar(_) => 1,
            Node::Sequence(s) => 1 + s.iter().map(Node::count).sum::<usize>(),
            Node::Mapping(m) => {
                1 + m
                    .iter()
                    .map(|(k, v)| k.count() + v.count())
                    .sum::<usize>()
            }
        }
    }
}

/// `node["key"]`, `node[0]`: never panics, missing entries read as null.
impl<I> std::ops::Index<I> for Node
where
    I: Index,
{
    type Output = Node;

    fn index(&self, index: I) -> &Node {
        index.index_into(self).unwrap_or(&*NULL)
    }
}

macro_rules! from_integer {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Node {
                fn from(n: $ty) -> Self {
                    Node::scalar(n.to_string(), Tag::Implicit, ScalarStyle::Any)
                }
            }
        )*
    };
}

from_integer! {
    i8 i16 i32 i64 i128 isize
    u8 u16 u32 u64 u128 usize
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::scalar(float_to_yaml_string(f), Tag::Implicit, ScalarStyle::Any)
    }
}

impl From<f32> for Node {
    fn from(f: f32) -> Self {
        Node::scalar(float_to_yaml_string(f), Tag::Implicit, ScalarStyle::Any)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::scalar(if b { "true" } else { "false" }, Tag::Implicit, ScalarStyle::Any)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::scalar(s, Tag::Implicit, ScalarStyle::Any)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::scalar(s, Tag::Implicit, ScalarStyle::Any)
    }
}

impl From<&String> for Node {
    fn from(s: &String) -> Self {
        Node::scalar(s.as_str(), Tag::Implicit, ScalarStyle::Any)
    }
}

impl From<char> for Node {
    fn from(c: char) -> Self {
        Node::scalar(c.to_string(), Tag::Implicit, ScalarStyle::Any)
    }
}

impl From<Scalar> for Node {
    fn from(s: Scalar) -> Self {
        Node::Scalar(s)
    }
}

impl From<Sequence> for Node {
    fn from(s: Sequence) -> Self {
        Node::Sequence(s)
    }
}

impl From<Mapping> for Node {
    fn from(m: Mapping) -> Self {
        Node::Mapping(m)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::Sequence(items.into_iter().collect())
    }
}

impl<T: Into<Node>> FromIterator<T> for Node {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Node::Sequence(iter.into_iter().collect())
    }
}

impl<K: Into<Node>, V: Into<Node>> FromIterator<(K, V)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Node::Mapping(iter.into_iter().collect())
    }
}
