//! Implicit tag resolution for plain scalars (YAML 1.1 type repository).
//!
//! Resolution is lazy: nodes keep their raw text and a [`Tag`], and the
//! resolver is consulted only when a caller asks what a scalar *is*. Building a
//! node never commits to a type, so `"1"` stays readable both as an integer
//! and as a string.
//!
//! The default rule order is `null`, `bool`, `int`, `float`, `timestamp`; the
//! first rule whose pattern matches the whole content wins and anything else
//! is `str`. `binary` is never implicit.

use std::sync::LazyLock;

use regex::Regex;

use crate::tags::{ResolvedTag, Tag};

pub(crate) static NULL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:~|null|Null|NULL|)$").expect("valid null pattern"));

pub(crate) static BOOL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:true|True|TRUE|false|False|FALSE|yes|Yes|YES|no|No|NO|on|On|ON|off|Off|OFF)$",
    )
    .expect("valid bool pattern")
});

pub(crate) static INT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[-+]?0b_*[0-1][0-1_]*|[-+]?0o?_*[0-7][0-7_]*|[-+]?(?:0|[1-9][0-9_]*)|[-+]?0x_*[0-9a-fA-F][0-9a-fA-F_]*|[-+]?[1-9][0-9_]*(?::[0-5]?[0-9])+)$",
    )
    .expect("valid int pattern")
});

pub(crate) static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[-+]?(?:\.[0-9][0-9_]*|[0-9][0-9_]*(?:\.[0-9_]*)?)(?:[eE][-+]?[0-9]+)?|[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
    )
    .expect("valid float pattern")
});

pub(crate) static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[0-9]{4}-[0-9]{2}-[0-9]{2}|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:[Tt]|[ \t]+)[0-9]{1,2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]*)?(?:[ \t]*(?:Z|[-+][0-9]{1,2}(?::?[0-9]{2})?))?)$",
    )
    .expect("valid timestamp pattern")
});

/// One implicit typing rule: content matching `pattern` resolves to `tag`.
#[derive(Clone, Debug)]
pub struct Rule {
    pub tag: ResolvedTag,
    pub pattern: Regex,
}

impl Rule {
    /// True when the pattern covers all of `content`.
    pub fn matches(&self, content: &str) -> bool {
        self.pattern
            .find(content)
            .is_some_and(|m| m.start() == 0 && m.end() == content.len())
    }
}

/// Ordered set of implicit typing rules.
///
/// ```rust
/// use saphyr_tree::{ResolvedTag, Resolver, Tag};
///
/// let resolver = Resolver::default();
/// assert_eq!(resolver.resolve("0x1F", &Tag::Implicit), ResolvedTag::Int);
/// assert_eq!(resolver.resolve("0x1F", &Tag::explicit("!!str")), ResolvedTag::Str);
/// assert_eq!(Resolver::basic().resolve("0x1F", &Tag::Implicit), ResolvedTag::Str);
/// ```
#[derive(Clone, Debug)]
pub struct Resolver {
    rules: Vec<Rule>,
}

static DEFAULT_RESOLVER: LazyLock<Resolver> = LazyLock::new(|| Resolver {
    rules: vec![
        Rule { tag: ResolvedTag::Null, pattern: NULL.clone() },
        Rule { tag: ResolvedTag::Bool, pattern: BOOL.clone() },
        Rule { tag: ResolvedTag::Int, pattern: INT.clone() },
        Rule { tag: ResolvedTag::Float, pattern: FLOAT.clone() },
        Rule { tag: ResolvedTag::Timestamp, pattern: TIMESTAMP.clone() },
    ],
});

impl Default for Resolver {
    fn default() -> Self {
        DEFAULT_RESOLVER.clone()
    }
}

impl Resolver {
    /// Shared instance of the default YAML 1.1 rules.
    pub fn yaml11() -> &'static Resolver {
        &DEFAULT_RESOLVER
    }

    /// A resolver without implicit rules: every untagged scalar is a string.
    pub fn basic() -> Self {
        Resolver { rules: Vec::new() }
    }

    /// Append a rule; it is consulted after all existing rules.
    ///
    /// The pattern must match the whole content; a match on part of it does
    /// not count, so `^`/`$` anchors are optional.
    pub fn with_rule(mut self, tag: ResolvedTag, pattern: Regex) -> Self {
        // Anchoring keeps alternations like `y|yes` from stopping at a prefix.
        let pattern = Regex::new(&format!("^(?:{})$", pattern.as_str())).unwrap_or(pattern);
        self.rules.push(Rule { tag, pattern });
        self
    }

    /// Drop every rule that resolves to `tag`.
    pub fn without(mut self, tag: &ResolvedTag) -> Self {
        self.rules.retain(|rule| &rule.tag != tag);
        self
    }

    /// Rules in the order they are tried.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Effective tag of a scalar.
    ///
    /// An explicit tag is returned normalized and never second-guessed.
    /// Implicit and non-specific tags go through the rules; no match is `str`.
    pub fn resolve(&self, content: &str, tag: &Tag) -> ResolvedTag {
        match tag {
            Tag::Explicit(uri) => ResolvedTag::from_uri(uri),
            Tag::Implicit | Tag::NonSpecific => self
                .rules
                .iter()
                .find(|rule| rule.matches(content))
                .map(|rule| rule.tag.clone())
                .unwrap_or(ResolvedTag::Str),
        }
    }
}
