//! Folding an event stream into [`Node`] trees.
//!
//! The composer is push-driven: feed it events in document order and it hands
//! back every root node as soon as the root's last event arrives. Anchors are
//! carried on the event that defines them; an alias resolves to a deep copy of
//! the anchored node, which must already be complete. Aliasing an ancestor
//! that is still open is rejected, so composed trees are always finite.
//!
//! ```rust
//! use saphyr_tree::compose::{compose, Event};
//! use saphyr_tree::{CollectionStyle, ScalarStyle, Tag};
//!
//! let scalar = |s: &str, anchor| Event::Scalar {
//!     content: s.to_owned(),
//!     tag: Tag::Implicit,
//!     style: ScalarStyle::Plain,
//!     anchor,
//! };
//! let events = vec![
//!     Event::SequenceStart { tag: Tag::Implicit, style: CollectionStyle::Block, anchor: None },
//!     scalar("42", Some(1)),
//!     Event::Alias(1),
//!     Event::SequenceEnd,
//! ];
//! let docs = compose(events).unwrap();
//! assert_eq!(docs[0][1].as_i64(), Some(42));
//! ```

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{Error, Location};
use crate::mapping::Mapping;
use crate::node::{Node, Scalar};
use crate::options::{DuplicateKeyPolicy, Options};
use crate::sequence::Sequence;
use crate::style::{CollectionStyle, ScalarStyle};
use crate::tags::Tag;

/// A parser event as the composer consumes it.
///
/// Stream and document markers are not events here: callers split documents
/// with [`Composer::reset_document`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Scalar {
        content: String,
        tag: Tag,
        style: ScalarStyle,
        anchor: Option<usize>,
    },
    SequenceStart {
        tag: Tag,
        style: CollectionStyle,
        anchor: Option<usize>,
    },
    SequenceEnd,
    MappingStart {
        tag: Tag,
        style: CollectionStyle,
        anchor: Option<usize>,
    },
    MappingEnd,
    /// Reference to a previously anchored node.
    Alias(usize),
}

/// An open collection.
#[derive(Debug)]
enum Frame {
    Sequence {
        seq: Sequence,
        anchor: Option<usize>,
    },
    Mapping {
        map: Mapping,
        pending_key: Option<Node>,
        anchor: Option<usize>,
    },
}

impl Frame {
    fn anchor(&self) -> Option<usize> {
        match self {
            Frame::Sequence { anchor, .. } | Frame::Mapping { anchor, .. } => *anchor,
        }
    }
}

/// Incremental event-to-tree builder.
#[derive(Debug)]
pub struct Composer {
    options: Options,
    stack: Vec<Frame>,
    /// Completed anchored nodes of the current document.
    anchors: HashMap<usize, Node>,
    /// Anchor id -> number of times it was aliased.
    per_anchor_expansions: HashMap<usize, usize>,
    /// Nodes copied in through aliases in the current document.
    total_aliased_nodes: usize,
    /// Nodes in the current document, aliased copies and anchor snapshots included.
    nodes: usize,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Composer {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            stack: Vec::new(),
            anchors: HashMap::new(),
            per_anchor_expansions: HashMap::new(),
            total_aliased_nodes: 0,
            nodes: 0,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// True while a sequence or mapping is open.
    pub fn in_progress(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Feed one event. Returns the root node when this event completes it.
    pub fn feed(&mut self, event: Event) -> Result<Option<Node>, Error> {
        self.feed_at(event, Location::UNKNOWN)
    }

    /// Like [`Composer::feed`], attaching `location` to any error raised.
    pub fn feed_at(&mut self, event: Event, location: Location) -> Result<Option<Node>, Error> {
        self.step(event).map_err(|err| err.with_location(location))
    }

    /// Forget anchors, counters and any half-built tree. Called between documents.
    pub fn reset_document(&mut self) {
        self.stack.clear();
        self.anchors.clear();
        self.per_anchor_expansions.clear();
        self.total_aliased_nodes = 0;
        self.nodes = 0;
    }

    /// Check that no collection was left open.
    pub fn finish(&self) -> Result<(), Error> {
        if self.stack.is_empty() {
            Ok(())
        } else {
            Err(Error::eof())
        }
    }

    fn step(&mut self, event: Event) -> Result<Option<Node>, Error> {
        match event {
            Event::Scalar {
                content,
                tag,
                style,
                anchor,
            } => {
                self.count_nodes(1)?;
                let node = Node::Scalar(Scalar::new(content, tag, style));
                if let Some(id) = anchor {
                    self.define_anchor(id, &node)?;
                }
                self.attach(node)
            }
            Event::SequenceStart { tag, style, anchor } => {
                self.open()?;
                self.stack.push(Frame::Sequence {
                    seq: Sequence::from_parts(Vec::new(), tag, style),
                    anchor,
                });
                Ok(None)
            }
            Event::MappingStart { tag, style, anchor } => {
                self.open()?;
                self.stack.push(Frame::Mapping {
                    map: Mapping::from_parts(std::iter::empty(), tag, style),
                    pending_key: None,
                    anchor,
                });
                Ok(None)
            }
            Event::SequenceEnd => match self.stack.pop() {
                Some(Frame::Sequence { seq, anchor }) => self.close(Node::Sequence(seq), anchor),
                Some(frame) => {
                    self.stack.push(frame);
                    Err(Error::unexpected("a mapping entry or mapping end"))
                }
                None => Err(Error::unexpected("a node")),
            },
            Event::MappingEnd => match self.stack.pop() {
                Some(Frame::Mapping {
                    map,
                    pending_key: None,
                    anchor,
                }) => self.close(Node::Mapping(map), anchor),
                Some(frame @ Frame::Mapping { .. }) => {
                    self.stack.push(frame);
                    Err(Error::unexpected("a mapping value"))
                }
                Some(frame) => {
                    self.stack.push(frame);
                    Err(Error::unexpected("a sequence item or sequence end"))
                }
                None => Err(Error::unexpected("a node")),
            },
            Event::Alias(id) => {
                let node = self.expand_alias(id)?;
                self.attach(node)
            }
        }
    }

    /// Depth and node-count checks for a collection start.
    fn open(&mut self) -> Result<(), Error> {
        if self.stack.len() >= self.options.max_depth {
            return Err(Error::limit("nesting depth", self.options.max_depth));
        }
        self.count_nodes(1)
    }

    fn close(&mut self, node: Node, anchor: Option<usize>) -> Result<Option<Node>, Error> {
        if let Some(id) = anchor {
            self.define_anchor(id, &node)?;
        }
        self.attach(node)
    }

    fn count_nodes(&mut self, n: usize) -> Result<(), Error> {
        self.nodes = self.nodes.saturating_add(n);
        if self.nodes > self.options.max_nodes {
            return Err(Error::limit("node count", self.options.max_nodes));
        }
        Ok(())
    }

    /// Keep a copy of an anchored node for later aliases.
    ///
    /// The copy is charged to the node budget like any other node, so nested
    /// anchors cannot hold more than `max_nodes` in total.
    fn define_anchor(&mut self, id: usize, node: &Node) -> Result<(), Error> {
        let size = node.count();
        self.count_nodes(size)?;
        // A later definition of the same id shadows the earlier one.
        trace!(anchor = id, nodes = size, "anchor defined");
        self.anchors.insert(id, node.clone());
        Ok(())
    }

    fn expand_alias(&mut self, id: usize) -> Result<Node, Error> {
        if self.stack.iter().any(|frame| frame.anchor() == Some(id)) {
            return Err(Error::recursive_alias(id));
        }
        let node = self
            .anchors
            .get(&id)
            .ok_or_else(|| Error::unknown_anchor(id))?;

        let limits = self.options.alias_limits;
        let count = self
            .per_anchor_expansions
            .entry(id)
            .and_modify(|c| *c += 1)
            .or_insert(1);
        if *count > limits.max_alias_expansions_per_anchor {
            return Err(Error::limit(
                "alias expansions per anchor",
                limits.max_alias_expansions_per_anchor,
            ));
        }

        let size = node.count();
        self.total_aliased_nodes = self.total_aliased_nodes.saturating_add(size);
        if self.total_aliased_nodes > limits.max_total_aliased_nodes {
            return Err(Error::limit("aliased nodes", limits.max_total_aliased_nodes));
        }
        let node = node.clone();
        self.count_nodes(size)?;
        trace!(anchor = id, nodes = size, "alias expanded");
        Ok(node)
    }

    /// Hand a finished node to its parent, or return it as a root.
    fn attach(&mut self, node: Node) -> Result<Option<Node>, Error> {
        let Some(parent) = self.stack.last_mut() else {
            debug!(nodes = self.nodes, "root node complete");
            return Ok(Some(node));
        };
        match parent {
            Frame::Sequence { seq, .. } => seq.push(node),
            Frame::Mapping {
                map, pending_key, ..
            } => match pending_key.take() {
                None => *pending_key = Some(node),
                Some(key) => insert_entry(map, key, node, self.options.duplicate_keys)?,
            },
        }
        Ok(None)
    }
}

fn insert_entry(
    map: &mut Mapping,
    key: Node,
    value: Node,
    policy: DuplicateKeyPolicy,
) -> Result<(), Error> {
    if !map.contains_key(&key) {
        map.insert(key, value);
        return Ok(());
    }
    match policy {
        DuplicateKeyPolicy::Error => Err(Error::duplicate_key(describe_key(&key))),
        DuplicateKeyPolicy::FirstWins => {
            debug!(key = %describe_key(&key), "duplicate key skipped");
            Ok(())
        }
        DuplicateKeyPolicy::LastWins => {
            debug!(key = %describe_key(&key), "duplicate key replaces earlier value");
            map.insert(key, value);
            Ok(())
        }
    }
}

fn describe_key(key: &Node) -> String {
    match key {
        Node::Scalar(s) => s.content.clone(),
        Node::Sequence(_) => "<sequence>".to_owned(),
        Node::Mapping(_) => "<mapping>".to_owned(),
    }
}

/// Compose every root in `events` with default options.
///
/// Anchors stay visible across roots; split documents with a [`Composer`]
/// and [`Composer::reset_document`] when they must not.
pub fn compose(events: impl IntoIterator<Item = Event>) -> Result<Vec<Node>, Error> {
    compose_with_options(events, Options::default())
}

pub fn compose_with_options(
    events: impl IntoIterator<Item = Event>,
    options: Options,
) -> Result<Vec<Node>, Error> {
    let mut composer = Composer::new(options);
    let mut roots = Vec::new();
    for event in events {
        if let Some(root) = composer.feed(event)? {
            roots.push(root);
        }
    }
    composer.finish()?;
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> Event {
        Event::Scalar {
            content: s.to_owned(),
            tag: Tag::Implicit,
            style: ScalarStyle::Plain,
            anchor: None,
        }
    }

    fn map_start(anchor: Option<usize>) -> Event {
        Event::MappingStart {
            tag: Tag::Implicit,
            style: CollectionStyle::Block,
            anchor,
        }
    }

    #[test]
    fn unbalanced_end_is_unexpected() {
        let mut c = Composer::default();
        assert!(matches!(
            c.feed(Event::SequenceEnd),
            Err(Error::Unexpected { .. })
        ));
        c.feed(map_start(None)).unwrap();
        c.feed(plain("k")).unwrap();
        assert!(matches!(
            c.feed(Event::MappingEnd),
            Err(Error::Unexpected { expected: "a mapping value", .. })
        ));
    }

    #[test]
    fn error_takes_feed_location() {
        let mut c = Composer::default();
        let err = c.feed_at(Event::Alias(3), Location::new(4, 2)).unwrap_err();
        assert_eq!(err.location(), Some(Location::new(4, 2)));
    }

    #[test]
    fn finish_reports_open_collection() {
        let mut c = Composer::default();
        c.feed(map_start(None)).unwrap();
        assert!(c.in_progress());
        assert!(matches!(c.finish(), Err(Error::Eof { .. })));
        c.reset_document();
        assert!(c.finish().is_ok());
    }

    #[test]
    fn node_limit_counts_aliased_copies() {
        let options = crate::options! { max_nodes: 5 };
        let events = vec![
            Event::SequenceStart {
                tag: Tag::Implicit,
                style: CollectionStyle::Flow,
                anchor: None,
            },
            map_start(Some(1)),
            plain("a"),
            plain("b"),
            Event::MappingEnd,
            Event::Alias(1),
            Event::SequenceEnd,
        ];
        let err = compose_with_options(events, options).unwrap_err();
        assert!(matches!(
            err,
            Error::LimitExceeded { what: "node count", limit: 5, .. }
        ));
    }

    #[test]
    fn anchor_snapshots_count_toward_node_limit() {
        let seq_start = |anchor| Event::SequenceStart {
            tag: Tag::Implicit,
            style: CollectionStyle::Flow,
            anchor,
        };
        // Three nested anchored sequences around four scalars: 7 nodes in the
        // tree, plus snapshots of 5, 6 and 7 nodes.
        let mut events = vec![seq_start(Some(1)), seq_start(Some(2)), seq_start(Some(3))];
        events.extend(["a", "b", "c", "d"].map(plain));
        events.extend([Event::SequenceEnd, Event::SequenceEnd, Event::SequenceEnd]);

        let roots = compose_with_options(events.clone(), crate::options! { max_nodes: 25 })
            .unwrap();
        assert_eq!(roots[0].count(), 7);

        let err = compose_with_options(events, crate::options! { max_nodes: 24 }).unwrap_err();
        assert!(matches!(
            err,
            Error::LimitExceeded { what: "node count", limit: 24, .. }
        ));
    }
}
