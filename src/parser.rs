//! Reading YAML text through `saphyr_parser`.
//!
//! The parser's event stream is translated into [`Event`]s and folded by a
//! [`Composer`]. Stream markers are skipped; every document start resets the
//! anchors, so an alias can only see anchors of its own document.

use saphyr_parser::{Event as ParserEvent, Parser, Tag as ParserTag};
use tracing::debug;

use crate::compose::{Composer, Event};
use crate::error::{Error, Location, location_from_span};
use crate::node::Node;
use crate::options::Options;
use crate::style::{CollectionStyle, ScalarStyle};
use crate::tags::Tag;

/// Parse a single YAML document into a [`Node`].
///
/// An empty stream yields an empty plain scalar, which reads as null. A
/// stream with more than one document is [`Error::MultipleDocuments`].
///
/// ```rust
/// let doc = saphyr_tree::from_str("retries: 3\nverbose: off\n").unwrap();
/// assert_eq!(doc["retries"].as_i64(), Some(3));
/// assert_eq!(doc["verbose"].as_bool(), Some(false));
/// ```
pub fn from_str(input: &str) -> Result<Node, Error> {
    from_str_with_options(input, Options::default())
}

/// [`from_str`] with custom [`Options`].
pub fn from_str_with_options(input: &str, options: Options) -> Result<Node, Error> {
    let mut root = None;
    drive(input, options, |node, location| {
        if root.is_some() {
            return Err(Error::MultipleDocuments { location });
        }
        root = Some(node);
        Ok(())
    })?;
    Ok(root.unwrap_or_else(|| Node::scalar("", Tag::Implicit, ScalarStyle::Plain)))
}

/// Parse every document of a YAML stream.
pub fn from_multiple(input: &str) -> Result<Vec<Node>, Error> {
    from_multiple_with_options(input, Options::default())
}

/// [`from_multiple`] with custom [`Options`]. Limits apply per document.
pub fn from_multiple_with_options(input: &str, options: Options) -> Result<Vec<Node>, Error> {
    let mut docs = Vec::new();
    drive(input, options, |node, _| {
        docs.push(node);
        Ok(())
    })?;
    Ok(docs)
}

/// Pump the parser, calling `on_root` with every completed document root.
fn drive(
    input: &str,
    options: Options,
    mut on_root: impl FnMut(Node, Location) -> Result<(), Error>,
) -> Result<(), Error> {
    let mut composer = Composer::new(options);
    let mut last_location = Location::UNKNOWN;

    for item in Parser::new_from_str(input) {
        let (raw, span) = item.map_err(Error::from_scan_error)?;
        let location = location_from_span(&span);
        last_location = location;

        let event = match raw {
            ParserEvent::StreamStart | ParserEvent::StreamEnd | ParserEvent::Nothing => continue,
            ParserEvent::DocumentStart(_) => {
                composer.reset_document();
                continue;
            }
            ParserEvent::DocumentEnd => {
                composer.finish().map_err(|err| err.with_location(location))?;
                continue;
            }
            ParserEvent::Scalar(content, style, anchor_id, tag) => Event::Scalar {
                content: content.into_owned(),
                tag: tag.as_ref().map_or(Tag::Implicit, |t| tag_from_parser(t)),
                style: ScalarStyle::from(style),
                anchor: anchor(anchor_id),
            },
            ParserEvent::SequenceStart(anchor_id, tag) => Event::SequenceStart {
                tag: tag.as_ref().map_or(Tag::Implicit, |t| tag_from_parser(t)),
                style: CollectionStyle::Any,
                anchor: anchor(anchor_id),
            },
            ParserEvent::SequenceEnd => Event::SequenceEnd,
            ParserEvent::MappingStart(anchor_id, tag) => Event::MappingStart {
                tag: tag.as_ref().map_or(Tag::Implicit, |t| tag_from_parser(t)),
                style: CollectionStyle::Any,
                anchor: anchor(anchor_id),
            },
            ParserEvent::MappingEnd => Event::MappingEnd,
            ParserEvent::Alias(anchor_id) => Event::Alias(anchor_id),
        };

        if let Some(root) = composer.feed_at(event, location)? {
            debug!(line = location.line(), "document composed");
            on_root(root, location)?;
        }
    }

    composer
        .finish()
        .map_err(|err| err.with_location(last_location))
}

/// The parser reports "no anchor" as id 0.
fn anchor(id: usize) -> Option<usize> {
    (id != 0).then_some(id)
}

/// Resolved handle plus suffix; the lone `!` is the non-specific tag.
fn tag_from_parser(tag: &ParserTag) -> Tag {
    match (tag.handle.as_str(), tag.suffix.as_str()) {
        ("", "!") | ("!", "") => Tag::NonSpecific,
        (handle, suffix) => Tag::Explicit(format!("{handle}{suffix}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_anchor_id_means_none() {
        assert_eq!(anchor(0), None);
        assert_eq!(anchor(7), Some(7));
    }

    #[test]
    fn empty_stream_is_null() {
        let node = from_str("").unwrap();
        assert!(node.is_null());
        assert!(from_multiple("").unwrap().is_empty());
    }

    #[test]
    fn second_document_is_rejected() {
        let err = from_str("a: 1\n---\nb: 2\n").unwrap_err();
        assert!(matches!(err, Error::MultipleDocuments { .. }));
        assert!(err.location().is_some());
    }
}
