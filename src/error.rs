//! Composition and parsing errors, with the source position they refer to.
use std::fmt;

#[cfg(feature = "parser")]
use saphyr_parser::{ScanError, Span};

/// Row/column location within the source YAML document (1-indexed).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    /// 1-indexed row number in the input stream.
    pub(crate) row: u32,
    /// 1-indexed column number in the input stream.
    pub(crate) column: u32,
}

impl Location {
    /// Sentinel value meaning "location unknown".
    ///
    /// Events fed to the composer by hand carry this location.
    pub const UNKNOWN: Self = Self { row: 0, column: 0 };

    /// Create a new location record from a 1-indexed row and column.
    pub const fn new(row: usize, column: usize) -> Self {
        // Error reporting only; 4G lines is beyond any document we would hold in memory.
        Self { row: row as u32, column: column as u32 }
    }

    /// 1-indexed line.
    pub fn line(&self) -> u64 {
        self.row as u64
    }

    /// 1-indexed column.
    pub fn column(&self) -> u64 {
        self.column as u64
    }
}

/// Convert a `saphyr_parser::Span` to a 1-indexed `Location`.
#[cfg(feature = "parser")]
pub(crate) fn location_from_span(span: &Span) -> Location {
    let start = &span.start;
    Location::new(start.line(), start.col() + 1)
}

/// Errors raised while composing or parsing documents.
///
/// The node model itself never fails: accessors report absence through `Option`.
/// This type only covers building trees from an event stream or from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Free-form error with optional source location (scanner errors land here).
    Message {
        msg: String,
        location: Location,
    },
    /// The event stream ended while a sequence or mapping was still open.
    Eof {
        location: Location,
    },
    /// Structural mismatch: an event arrived that cannot appear at this point.
    Unexpected {
        expected: &'static str,
        location: Location,
    },
    /// Alias references an anchor that was never defined in this document.
    UnknownAnchor {
        id: usize,
        location: Location,
    },
    /// Alias references an anchored node that is still being built (one of its ancestors).
    RecursiveAlias {
        id: usize,
        location: Location,
    },
    /// A mapping key appeared twice while [`DuplicateKeyPolicy::Error`](crate::DuplicateKeyPolicy) is active.
    DuplicateKey {
        key: String,
        location: Location,
    },
    /// One of the configured [`Options`](crate::Options) limits was exceeded.
    LimitExceeded {
        what: &'static str,
        limit: usize,
        location: Location,
    },
    /// A single document was requested but the stream holds more.
    MultipleDocuments {
        location: Location,
    },
}

impl Error {
    /// Free-form message; the location is filled in later.
    pub(crate) fn msg<S: Into<String>>(s: S) -> Self {
        Error::Message {
            msg: s.into(),
            location: Location::UNKNOWN,
        }
    }

    /// `Unexpected` naming what the composer was waiting for.
    pub(crate) fn unexpected(what: &'static str) -> Self {
        Error::Unexpected {
            expected: what,
            location: Location::UNKNOWN,
        }
    }

    pub(crate) fn eof() -> Self {
        Error::Eof {
            location: Location::UNKNOWN,
        }
    }

    pub(crate) fn unknown_anchor(id: usize) -> Self {
        Error::UnknownAnchor {
            id,
            location: Location::UNKNOWN,
        }
    }

    pub(crate) fn recursive_alias(id: usize) -> Self {
        Error::RecursiveAlias {
            id,
            location: Location::UNKNOWN,
        }
    }

    pub(crate) fn duplicate_key(key: String) -> Self {
        Error::DuplicateKey {
            key,
            location: Location::UNKNOWN,
        }
    }

    pub(crate) fn limit(what: &'static str, limit: usize) -> Self {
        Error::LimitExceeded {
            what,
            limit,
            location: Location::UNKNOWN,
        }
    }

    /// Attach/override a concrete location to this error and return it.
    ///
    /// Errors are created where the problem is detected and receive the event
    /// position once the caller knows it.
    pub(crate) fn with_location(mut self, set_location: Location) -> Self {
        match &mut self {
            Error::Message { location, .. }
            | Error::Eof { location }
            | Error::Unexpected { location, .. }
            | Error::UnknownAnchor { location, .. }
            | Error::RecursiveAlias { location, .. }
            | Error::DuplicateKey { location, .. }
            | Error::LimitExceeded { location, .. }
            | Error::MultipleDocuments { location } => {
                *location = set_location;
            }
        }
        self
    }

    /// If the error has a known location, return it.
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::Message { location, .. }
            | Error::Eof { location }
            | Error::Unexpected { location, .. }
            | Error::UnknownAnchor { location, .. }
            | Error::RecursiveAlias { location, .. }
            | Error::DuplicateKey { location, .. }
            | Error::LimitExceeded { location, .. }
            | Error::MultipleDocuments { location } => {
                if location != &Location::UNKNOWN {
                    Some(*location)
                } else {
                    None
                }
            }
        }
    }

    /// Scanner failure, positioned at the scanner mark.
    #[cfg(feature = "parser")]
    pub(crate) fn from_scan_error(err: ScanError) -> Self {
        let mark = err.marker();
        let location = Location::new(mark.line(), mark.col() + 1);
        Error::Message {
            msg: err.info().to_owned(),
            location,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Message { msg, location } => fmt_with_location(f, msg, location),
            Error::Eof { location } => fmt_with_location(f, "unexpected end of input", location),
            Error::Unexpected { expected, location } => {
                fmt_with_location(f, &format!("unexpected event: expected {expected}"), location)
            }
            Error::UnknownAnchor { id, location } => {
                fmt_with_location(f, &format!("alias references unknown anchor id {id}"), location)
            }
            Error::RecursiveAlias { id, location } => fmt_with_location(
                f,
                &format!("alias references anchor id {id} from inside its own node"),
                location,
            ),
            Error::DuplicateKey { key, location } => {
                fmt_with_location(f, &format!("duplicate mapping key: {key}"), location)
            }
            Error::LimitExceeded { what, limit, location } => {
                fmt_with_location(f, &format!("{what} limit exceeded ({limit})"), location)
            }
            Error::MultipleDocuments { location } => fmt_with_location(
                f,
                "multiple YAML documents found; use from_multiple to read all of them",
                location,
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(feature = "serde")]
impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::msg(msg.to_string())
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::msg(msg.to_string())
    }
}

/// Print a message optionally suffixed with "at line X, column Y".
fn fmt_with_location(f: &mut fmt::Formatter<'_>, msg: &str, location: &Location) -> fmt::Result {
    if location != &Location::UNKNOWN {
        write!(
            f,
            "{msg} at line {}, column {}",
            location.row, location.column
        )
    } else {
        write!(f, "{msg}")
    }
}
