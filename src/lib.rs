//! A YAML document tree with lazy YAML 1.1 scalar typing.
//!
//! [`Node`] keeps every scalar as the text that was written, together with
//! its [`Tag`] and [`ScalarStyle`]. Types are decided only when asked for:
//! `as_bool`, `as_i64`, `as_f64`, `as_timestamp`, `as_binary` and friends
//! apply the YAML 1.1 implicit rules to the text and return `None` when it
//! does not fit. Mappings keep first-insertion order and compare regardless
//! of order.
//!
//! ```rust
//! use saphyr_tree::{from_str, Node, ResolvedTag};
//!
//! let yaml = "
//! name: demo
//! created: 2001-12-14t21:59:43.10-05:00
//! sizes:
//!   - 1
//!   - 0o17
//!   - 1_000
//!   - 1:30
//! ";
//! let mut doc = from_str(yaml).unwrap();
//!
//! assert_eq!(doc["name"].resolved_tag(), ResolvedTag::Str);
//! assert!(doc["created"].as_timestamp().is_some());
//! assert_eq!(doc["sizes"].array::<i64>(), vec![1, 15, 1000, 90]);
//!
//! doc.set("name", Some(Node::from("renamed")));
//! doc.set("sizes", None);
//! assert_eq!(doc.as_mapping().unwrap().len(), 2);
//! ```
//!
//! Trees can also be composed from hand-fed events (see [`compose`]) or
//! built from literals with [`node!`].

mod base64;
pub mod compose;
mod convert;
pub mod error;
mod index;
mod macros;
pub mod mapping;
mod node;
pub mod options;
mod parse_scalars;
#[cfg(feature = "parser")]
mod parser;
pub mod resolver;
pub mod sequence;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod style;
pub mod tags;
mod zmij_format;

pub use compose::{Composer, Event};
pub use convert::FromNode;
pub use error::{Error, Location};
pub use index::Index;
pub use mapping::{Mapping, MappingKey, Pair};
pub use node::{Node, Scalar};
pub use options::{AliasLimits, DuplicateKeyPolicy, Options};
#[cfg(feature = "parser")]
pub use parser::{from_multiple, from_multiple_with_options, from_str, from_str_with_options};
pub use resolver::{Resolver, Rule};
pub use sequence::Sequence;
pub use style::{CollectionStyle, ScalarStyle};
pub use tags::{ResolvedTag, Tag};
