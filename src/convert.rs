use chrono::{DateTime, Utc};

use crate::node::Node;

/// Native types a [`Node`] can be read as.
///
/// Conversions are attempted from the raw scalar text with the matching YAML
/// 1.1 rule and report failure as `None`. They back [`Node::typed`] and
/// [`Node::array`].
///
/// ```rust
/// use saphyr_tree::Node;
///
/// let seq = Node::from(vec!["true", "1.0", "1", "R0lG"]);
/// assert_eq!(seq.array::<bool>(), vec![true]);
/// assert_eq!(seq.array::<f64>(), vec![1.0, 1.0]);
/// assert_eq!(seq.array::<i64>(), vec![1]);
/// assert_eq!(seq.array::<String>().len(), 4);
/// ```
pub trait FromNode: Sized {
    fn from_node(node: &Node) -> Option<Self>;
}

impl FromNode for Node {
    fn from_node(node: &Node) -> Option<Self> {
        Some(node.clone())
    }
}

impl FromNode for String {
    fn from_node(node: &Node) -> Option<Self> {
        node.as_str().map(str::to_owned)
    }
}

impl FromNode for bool {
    fn from_node(node: &Node) -> Option<Self> {
        node.as_bool()
    }
}

impl FromNode for f64 {
    fn from_node(node: &Node) -> Option<Self> {
        node.as_f64()
    }
}

impl FromNode for f32 {
    fn from_node(node: &Node) -> Option<Self> {
        node.as_f64().map(|f| f as f32)
    }
}

/// The null spellings.
impl FromNode for () {
    fn from_node(node: &Node) -> Option<Self> {
        node.as_null()
    }
}

impl FromNode for DateTime<Utc> {
    fn from_node(node: &Node) -> Option<Self> {
        node.as_timestamp()
    }
}

/// Base64 payload; see [`Node::as_binary`].
impl FromNode for Vec<u8> {
    fn from_node(node: &Node) -> Option<Self> {
        node.as_binary()
    }
}

macro_rules! from_node_integer {
    ($($ty:ty)*) => {
        $(
            impl FromNode for $ty {
                fn from_node(node: &Node) -> Option<Self> {
                    node.as_str()
                        .and_then(crate::parse_scalars::parse_int)
                        .and_then(|v| <$ty>::try_from(v).ok())
                }
            }
        )*
    };
}

from_node_integer! {
    i8 i16 i32 i64 i128 isize
    u8 u16 u32 u64 u128 usize
}
