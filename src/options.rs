#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to do when a mapping repeats a key.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DuplicateKeyPolicy {
    /// Fail composition with [`crate::Error::DuplicateKey`].
    #[default]
    Error,
    /// Keep the first pair; later duplicates are dropped.
    FirstWins,
    /// Keep the first position, take the last value.
    LastWins,
}

/// Limits on alias expansion. Every alias deep-copies its anchored node, so
/// nested anchors can grow a small document exponentially.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AliasLimits {
    /// Maximum number of times a single anchor may be referenced.
    /// Use `usize::MAX` for "unlimited".
    pub max_alias_expansions_per_anchor: usize,
    /// Maximum number of nodes copied in through aliases over the whole
    /// document (see [`crate::Node::count`]).
    pub max_total_aliased_nodes: usize,
}

impl Default for AliasLimits {
    fn default() -> Self {
        Self {
            max_alias_expansions_per_anchor: usize::MAX,
            max_total_aliased_nodes: 1_000_000,
        }
    }
}

/// Composer configuration.
///
/// ```rust
/// use saphyr_tree::options::DuplicateKeyPolicy;
///
/// let options = saphyr_tree::options! {
///     duplicate_keys: DuplicateKeyPolicy::LastWins,
///     max_depth: 64,
/// };
/// assert_eq!(options.max_nodes, 250_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Options {
    /// Policy for duplicate keys.
    pub duplicate_keys: DuplicateKeyPolicy,
    /// Maximum collection nesting depth.
    pub max_depth: usize,
    /// Maximum number of nodes in one document, aliased copies included.
    pub max_nodes: usize,
    /// Limits against alias bombs.
    pub alias_limits: AliasLimits,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            duplicate_keys: DuplicateKeyPolicy::Error,
            max_depth: 2_000,
            max_nodes: 250_000,
            alias_limits: AliasLimits::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let opts = Options::default();
        assert_eq!(opts.duplicate_keys, DuplicateKeyPolicy::Error);
        assert_eq!(opts.max_depth, 2_000);
        assert_eq!(opts.max_nodes, 250_000);
        assert_eq!(opts.alias_limits, AliasLimits::default());
    }

    #[test]
    fn test_alias_limits_default() {
        let limits = AliasLimits::default();
        assert_eq!(limits.max_alias_expansions_per_anchor, usize::MAX);
        assert_eq!(limits.max_total_aliased_nodes, 1_000_000);
    }

    #[test]
    fn test_options_macro_overrides_only_named_fields() {
        let opts = crate::options! {
            duplicate_keys: DuplicateKeyPolicy::FirstWins,
        };
        assert_eq!(opts.duplicate_keys, DuplicateKeyPolicy::FirstWins);
        assert_eq!(opts.max_depth, Options::default().max_depth);
    }
}
