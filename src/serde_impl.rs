//! `Serialize` and `Deserialize` for [`Node`].
//!
//! Serializing resolves every scalar with the YAML 1.1 rules, so a tree read
//! from YAML turns into typed values in any serde format:
//!
//! ```rust
//! let doc = saphyr_tree::from_str("port: 0x1F90\ndebug: yes\nname: '42'\n").unwrap();
//! let json = serde_json::to_string(&doc).unwrap();
//! assert_eq!(json, r#"{"port":8080,"debug":true,"name":"42"}"#);
//! ```
//!
//! Deserializing builds nodes from any self-describing format. Strings that
//! would resolve to another type are marked double-quoted so they stay strings.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::base64::{decode_base64_yaml, encode_base64_yaml};
use crate::mapping::Mapping;
use crate::node::{Node, Scalar};
use crate::parse_scalars::{parse_float, parse_int, parse_yaml11_bool};
use crate::resolver::Resolver;
use crate::sequence::Sequence;
use crate::style::ScalarStyle;
use crate::tags::{ResolvedTag, TAG_BINARY_CANONICAL, Tag};

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Scalar(scalar) => scalar.serialize(serializer),
            Node::Sequence(seq) => seq.serialize(serializer),
            Node::Mapping(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = self.content.as_str();
        match self.resolved_tag_with(Resolver::yaml11()) {
            ResolvedTag::Null => serializer.serialize_unit(),
            ResolvedTag::Bool => match parse_yaml11_bool(text) {
                Some(b) => serializer.serialize_bool(b),
                None => serializer.serialize_str(text),
            },
            ResolvedTag::Int => match parse_int(text) {
                Some(v) => {
                    if let Ok(i) = i64::try_from(v) {
                        serializer.serialize_i64(i)
                    } else if let Ok(u) = u64::try_from(v) {
                        serializer.serialize_u64(u)
                    } else {
                        serializer.serialize_i128(v)
                    }
                }
                None => serializer.serialize_str(text),
            },
            ResolvedTag::Float => match parse_float(text) {
                Some(f) => serializer.serialize_f64(f),
                None => serializer.serialize_str(text),
            },
            ResolvedTag::Binary => match decode_base64_yaml(text) {
                Some(bytes) => serializer.serialize_bytes(&bytes),
                None => serializer.serialize_str(text),
            },
            ResolvedTag::Timestamp
            | ResolvedTag::Str
            | ResolvedTag::Seq
            | ResolvedTag::Map
            | ResolvedTag::Custom(_) => serializer.serialize_str(text),
        }
    }
}

impl Serialize for Sequence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl Serialize for Mapping {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl NodeVisitor {
    fn string(s: String) -> Node {
        let style = if Resolver::yaml11().resolve(&s, &Tag::Implicit) == ResolvedTag::Str {
            ScalarStyle::Any
        } else {
            ScalarStyle::DoubleQuoted
        };
        Node::scalar(s, Tag::Implicit, style)
    }
}

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<Node, E> {
        Ok(Self::string(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Self::string(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Self::string(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Node, E> {
        Ok(Node::scalar(
            encode_base64_yaml(v),
            Tag::explicit(TAG_BINARY_CANONICAL),
            ScalarStyle::Any,
        ))
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::null())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::null())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Node, D::Error>
    where
        D: Deserializer<'de>,
    {
        Node::deserialize(deserializer)
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Node, D::Error>
    where
        D: Deserializer<'de>,
    {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Node, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut seq = Sequence::with_capacity(cautious(access.size_hint()));
        while let Some(item) = access.next_element::<Node>()? {
            seq.push(item);
        }
        Ok(Node::Sequence(seq))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Node, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Mapping::with_capacity(cautious(access.size_hint()));
        while let Some((key, value)) = access.next_entry::<Node, Node>()? {
            map.insert(key, value);
        }
        Ok(Node::Mapping(map))
    }
}

/// Size hints come from the input; never preallocate more than this many items.
const MAX_PREALLOCATED: usize = 4096;

fn cautious(hint: Option<usize>) -> usize {
    hint.unwrap_or(0).min(MAX_PREALLOCATED)
}
