//! Public macros for building options and node literals.

/// Construct [`crate::Options`] from `Default` and a list of field assignments.
///
/// Example:
///
/// ```rust
/// use saphyr_tree::options::DuplicateKeyPolicy;
///
/// let options = saphyr_tree::options! {
///     duplicate_keys: DuplicateKeyPolicy::LastWins,
///     max_nodes: 10_000,
/// };
/// ```
#[macro_export]
macro_rules! options {
    ( $( $field:ident : $value:expr ),* $(,)? ) => {{
        let mut opt = $crate::Options::default();
        $(
            opt.$field = $value;
        )*
        opt
    }};
}

/// Build a [`crate::Node`] from a literal.
///
/// `[a, b]` is a sequence, `{k => v}` a mapping in written order, and any
/// other expression goes through `Node::from`. Nested brackets and braces
/// recurse; elements may be any expression, including `-1` or `cfg.port`.
///
/// ```rust
/// use saphyr_tree::node;
///
/// let offset = 3;
/// let n = node!({"hosts" => ["a", "b"], "port" => 22, "shift" => [-1, offset * 2]});
/// assert_eq!(n["hosts"][1].as_str(), Some("b"));
/// assert_eq!(n["port"].as_i64(), Some(22));
/// assert_eq!(n["shift"].array::<i64>(), [-1, 6]);
/// ```
#[macro_export]
macro_rules! node {
    // Sequence items, one per step; `$elems` holds the finished nodes.
    (@seq [$($elems:expr,)*]) => {
        ::std::vec![$($elems,)*]
    };
    (@seq [$($elems:expr,)*] [$($inner:tt)*] $(, $($rest:tt)*)?) => {
        $crate::node!(@seq [$($elems,)* $crate::node!([$($inner)*]),] $($($rest)*)?)
    };
    (@seq [$($elems:expr,)*] {$($inner:tt)*} $(, $($rest:tt)*)?) => {
        $crate::node!(@seq [$($elems,)* $crate::node!({$($inner)*}),] $($($rest)*)?)
    };
    (@seq [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::node!(@seq [$($elems,)* $crate::node!($next),] $($rest)*)
    };
    (@seq [$($elems:expr,)*] $last:expr) => {
        $crate::node!(@seq [$($elems,)* $crate::node!($last),])
    };

    // Mapping keys.
    (@map [$($pairs:expr,)*]) => {
        ::std::vec![$($pairs,)*]
    };
    (@map [$($pairs:expr,)*] [$($key:tt)*] => $($rest:tt)*) => {
        $crate::node!(@value [$($pairs,)*] ($crate::node!([$($key)*])) $($rest)*)
    };
    (@map [$($pairs:expr,)*] {$($key:tt)*} => $($rest:tt)*) => {
        $crate::node!(@value [$($pairs,)*] ($crate::node!({$($key)*})) $($rest)*)
    };
    (@map [$($pairs:expr,)*] $key:expr => $($rest:tt)*) => {
        $crate::node!(@value [$($pairs,)*] ($crate::node!($key)) $($rest)*)
    };

    // Mapping values; the key is already built.
    (@value [$($pairs:expr,)*] ($key:expr) [$($inner:tt)*] $(, $($rest:tt)*)?) => {
        $crate::node!(@map [$($pairs,)* ($key, $crate::node!([$($inner)*])),] $($($rest)*)?)
    };
    (@value [$($pairs:expr,)*] ($key:expr) {$($inner:tt)*} $(, $($rest:tt)*)?) => {
        $crate::node!(@map [$($pairs,)* ($key, $crate::node!({$($inner)*})),] $($($rest)*)?)
    };
    (@value [$($pairs:expr,)*] ($key:expr) $value:expr, $($rest:tt)*) => {
        $crate::node!(@map [$($pairs,)* ($key, $crate::node!($value)),] $($rest)*)
    };
    (@value [$($pairs:expr,)*] ($key:expr) $value:expr) => {
        $crate::node!(@map [$($pairs,)* ($key, $crate::node!($value)),])
    };

    ([ $($tt:tt)* ]) => {{
        let items: ::std::vec::Vec<$crate::Node> = $crate::node!(@seq [] $($tt)*);
        $crate::Node::Sequence($crate::Sequence::from(items))
    }};
    ({ $($tt:tt)* }) => {{
        let pairs: ::std::vec::Vec<($crate::Node, $crate::Node)> = $crate::node!(@map [] $($tt)*);
        $crate::Node::Mapping(pairs.into_iter().collect::<$crate::Mapping>())
    }};
    ($other:expr) => {
        $crate::Node::from($other)
    };
}
