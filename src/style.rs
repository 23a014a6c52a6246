//! Presentation hints kept on nodes so an emitter can reproduce the source layout.
//! They never take part in equality or hashing.

/// How a scalar was (or should be) written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarStyle {
    /// Let the emitter choose.
    #[default]
    Any,
    Plain,
    SingleQuoted,
    DoubleQuoted,
    /// Block scalar introduced with `|`.
    Literal,
    /// Block scalar introduced with `>`.
    Folded,
}

impl ScalarStyle {
    /// Quoted and block scalars are written as text, so implicit typing does not apply to them.
    pub fn is_plain_or_any(self) -> bool {
        matches!(self, ScalarStyle::Any | ScalarStyle::Plain)
    }
}

#[cfg(feature = "parser")]
impl From<saphyr_parser::ScalarStyle> for ScalarStyle {
    fn from(style: saphyr_parser::ScalarStyle) -> Self {
        match style {
            saphyr_parser::ScalarStyle::Plain => ScalarStyle::Plain,
            saphyr_parser::ScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
            saphyr_parser::ScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
            saphyr_parser::ScalarStyle::Literal => ScalarStyle::Literal,
            saphyr_parser::ScalarStyle::Folded => ScalarStyle::Folded,
        }
    }
}

/// How a sequence or mapping was (or should be) written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollectionStyle {
    /// Let the emitter choose.
    #[default]
    Any,
    /// Indentation based (`- item`, `key: value`).
    Block,
    /// Bracketed (`[a, b]`, `{k: v}`).
    Flow,
}
