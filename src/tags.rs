//! Node tags: what the document says ([`Tag`]) and what the resolver decides ([`ResolvedTag`]).

use std::fmt;

pub(crate) const YAML_TAG_PREFIX: &str = "tag:yaml.org,2002:";

pub(crate) const TAG_NULL_CANONICAL: &str = "tag:yaml.org,2002:null";
pub(crate) const TAG_BOOL_CANONICAL: &str = "tag:yaml.org,2002:bool";
pub(crate) const TAG_INT_CANONICAL: &str = "tag:yaml.org,2002:int";
pub(crate) const TAG_FLOAT_CANONICAL: &str = "tag:yaml.org,2002:float";
pub(crate) const TAG_TIMESTAMP_CANONICAL: &str = "tag:yaml.org,2002:timestamp";
pub(crate) const TAG_BINARY_CANONICAL: &str = "tag:yaml.org,2002:binary";
pub(crate) const TAG_STR_CANONICAL: &str = "tag:yaml.org,2002:str";
pub(crate) const TAG_SEQ_CANONICAL: &str = "tag:yaml.org,2002:seq";
pub(crate) const TAG_MAP_CANONICAL: &str = "tag:yaml.org,2002:map";

/// Tag attached to a node as written in the document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tag {
    /// No tag was written; the resolver decides when a value is requested.
    #[default]
    Implicit,
    /// The non-specific `!` tag. The resolver still decides.
    NonSpecific,
    /// A specific tag, e.g. `tag:yaml.org,2002:int`, `!!binary` or `!custom`.
    Explicit(String),
}

impl Tag {
    /// Build an explicit tag from any spelling (`!!int`, `tag:yaml.org,2002:int`, `!local`).
    pub fn explicit(uri: impl Into<String>) -> Self {
        Tag::Explicit(uri.into())
    }

    /// True for [`Tag::Explicit`].
    pub fn is_explicit(&self) -> bool {
        matches!(self, Tag::Explicit(_))
    }

    /// The written tag text, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::Implicit => None,
            Tag::NonSpecific => Some("!"),
            Tag::Explicit(uri) => Some(uri),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Implicit => Ok(()),
            Tag::NonSpecific => f.write_str("!"),
            Tag::Explicit(uri) => f.write_str(uri),
        }
    }
}

/// Effective type of a node after tag resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResolvedTag {
    Null,
    Bool,
    Int,
    Float,
    Timestamp,
    Binary,
    Str,
    Seq,
    Map,
    /// An explicit tag outside the YAML 1.1 type repository, kept verbatim.
    Custom(String),
}

impl ResolvedTag {
    /// Canonical URI of this tag.
    pub fn uri(&self) -> &str {
        match self {
            ResolvedTag::Null => TAG_NULL_CANONICAL,
            ResolvedTag::Bool => TAG_BOOL_CANONICAL,
            ResolvedTag::Int => TAG_INT_CANONICAL,
            ResolvedTag::Float => TAG_FLOAT_CANONICAL,
            ResolvedTag::Timestamp => TAG_TIMESTAMP_CANONICAL,
            ResolvedTag::Binary => TAG_BINARY_CANONICAL,
            ResolvedTag::Str => TAG_STR_CANONICAL,
            ResolvedTag::Seq => TAG_SEQ_CANONICAL,
            ResolvedTag::Map => TAG_MAP_CANONICAL,
            ResolvedTag::Custom(uri) => uri,
        }
    }

    /// Normalize a written tag into a resolved one.
    ///
    /// Accepts the canonical form (`tag:yaml.org,2002:int`), the `!!int`
    /// shorthand, the `!int` local shorthand and the `tag:yaml.org,2002:!int`
    /// spelling some tag handles produce. Anything else becomes `Custom`.
    pub fn from_uri(uri: &str) -> Self {
        let name = if let Some(rest) = uri.strip_prefix(YAML_TAG_PREFIX) {
            rest.strip_prefix('!').unwrap_or(rest)
        } else if let Some(rest) = uri.strip_prefix("!!") {
            rest
        } else if let Some(rest) = uri.strip_prefix('!') {
            rest
        } else {
            return ResolvedTag::Custom(uri.to_owned());
        };
        match name {
            "null" => ResolvedTag::Null,
            "bool" => ResolvedTag::Bool,
            "int" => ResolvedTag::Int,
            "float" => ResolvedTag::Float,
            "timestamp" => ResolvedTag::Timestamp,
            "binary" => ResolvedTag::Binary,
            "str" => ResolvedTag::Str,
            "seq" => ResolvedTag::Seq,
            "map" => ResolvedTag::Map,
            _ => ResolvedTag::Custom(uri.to_owned()),
        }
    }
}

impl fmt::Display for ResolvedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}
