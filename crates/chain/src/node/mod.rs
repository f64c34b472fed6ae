//! The decorator node every chain is built from.
//!
//! A [`ChainNode`] holds two references:
//!
//! - `subject`: the terminal [`Sink`] the whole chain bottoms out at. It is captured once,
//!   when the node is built, either directly from a bare sink or by copying the subject of
//!   the wrapped node, and never changes afterwards.
//! - `delegate`: the node this one wraps, if any. Writes go to the delegate while it is
//!   linked and fall back to the subject otherwise.
//!
//! The delegate link is the only mutable state of a node. It lives in an
//! [`ArcSwapOption`] and can only be cleared, atomically, by [`ChainNode::remove_delegate`].
//! Clearing the link of a parent whose delegate is the removal target bypasses the target
//! *and everything the target wraps*: the parent falls back to writing straight into the
//! subject. Nodes inside the removed segment keep working for callers holding them
//! directly.
//!
//! ```text
//!   outer ──delegate──▶ middle ──delegate──▶ leaf ──▶ sink
//!     │                                                ▲
//!     └──────────────────── subject ───────────────────┘
//!
//!   outer.remove_delegate(&middle):
//!
//!   outer ──────────────────────────────────────────▶ sink
//! ```

mod behavior;
mod writer;

pub(crate) use behavior::Behavior;
pub use behavior::{ByteMap, BytePredicate, NodeKind, StringMap, StringPredicate};
pub use writer::NodeWriter;

use crate::builder::NodeBuilder;
use crate::error::{ArgumentError, WriteError};
use crate::segment::segment;
use crate::sink::Sink;
use arc_swap::ArcSwapOption;
use std::fmt;
use std::io;
use std::sync::{Arc, Weak};
use tracing::{debug, trace, warn};

/// The thing a new node wraps: a bare sink, or an existing chain.
#[derive(Clone)]
pub enum Target {
    Sink(Arc<dyn Sink>),
    Node(Arc<ChainNode>),
}

impl Target {
    /// The terminal sink a node built over this target would capture.
    pub fn subject(&self) -> Arc<dyn Sink> {
        match self {
            Target::Sink(sink) => Arc::clone(sink),
            Target::Node(node) => Arc::clone(&node.subject),
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Sink(_) => f.write_str("Target::Sink"),
            Target::Node(node) => f.debug_tuple("Target::Node").field(node).finish(),
        }
    }
}

impl From<Arc<ChainNode>> for Target {
    fn from(node: Arc<ChainNode>) -> Self {
        Target::Node(node)
    }
}

impl From<&Arc<ChainNode>> for Target {
    fn from(node: &Arc<ChainNode>) -> Self {
        Target::Node(Arc::clone(node))
    }
}

impl From<Arc<dyn Sink>> for Target {
    fn from(sink: Arc<dyn Sink>) -> Self {
        Target::Sink(sink)
    }
}

impl<S: Sink + 'static> From<Arc<S>> for Target {
    fn from(sink: Arc<S>) -> Self {
        Target::Sink(sink)
    }
}

pub struct ChainNode {
    subject: Arc<dyn Sink>,
    delegate: ArcSwapOption<ChainNode>,
    behavior: Behavior,
    /// built over another node rather than a bare sink
    layered: bool,
}

impl ChainNode {
    pub(crate) fn new(target: Target, behavior: Behavior) -> Arc<Self> {
        let (subject, delegate) = match target {
            Target::Sink(sink) => (sink, None),
            Target::Node(node) => (Arc::clone(&node.subject), Some(node)),
        };

        let wraps = delegate.as_ref().map(|inner| inner.kind());
        let layered = wraps.is_some();
        let node = Arc::new(Self { subject, delegate: ArcSwapOption::new(delegate), behavior, layered });
        trace!(kind = %node.kind(), wraps = ?wraps, "chain node created");
        node
    }

    /// Starts building a node of the given kind from optional parts.
    pub fn builder(kind: NodeKind) -> NodeBuilder {
        NodeBuilder::new(kind)
    }

    pub fn kind(&self) -> NodeKind {
        self.behavior.kind()
    }

    /// The terminal sink this node bottoms out at, no matter how deep the chain is or
    /// what has been removed from it since.
    pub fn resolved_subject(&self) -> &Arc<dyn Sink> {
        &self.subject
    }

    /// A snapshot of the currently linked delegate.
    pub fn find_delegate(&self) -> Option<Arc<ChainNode>> {
        self.delegate.load_full()
    }

    /// Whether writes currently go straight to the subject.
    pub fn is_leaf(&self) -> bool {
        self.delegate.load().is_none()
    }

    /// Number of nodes currently linked below this one.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.find_delegate();
        while let Some(node) = current {
            depth += 1;
            current = node.find_delegate();
        }
        depth
    }

    /// Removes `target` from this chain.
    ///
    /// If this node's delegate is `target` (by identity) the link is cleared and the node
    /// falls back to its subject, which bypasses `target` together with everything it
    /// wraps. Otherwise the request is handed to the delegate, and with no delegate left
    /// nothing happens.
    ///
    /// Returns `true` only to the caller whose request actually cleared a link; repeated
    /// or concurrent requests for the same target return `false`.
    pub fn remove_delegate(&self, target: &Arc<ChainNode>) -> bool {
        let expected = Some(Arc::clone(target));
        let previous = self.delegate.compare_and_swap(&expected, None::<Arc<ChainNode>>);

        match &*previous {
            Some(delegate) if Arc::ptr_eq(delegate, target) => {
                debug!(parent = %self.kind(), removed = %target.kind(), "delegate removed");
                true
            }
            Some(delegate) => {
                trace!(parent = %self.kind(), "removal target not linked here, trying delegate");
                delegate.remove_delegate(target)
            }
            None => false,
        }
    }

    /// Like [`remove_delegate`](Self::remove_delegate), for callers that only keep weak
    /// handles to the nodes they may remove later.
    pub fn try_remove_delegate(&self, target: &Weak<ChainNode>) -> Result<bool, ArgumentError> {
        let target = target.upgrade().ok_or(ArgumentError::NullTarget)?;
        Ok(self.remove_delegate(&target))
    }

    /// A [`Sink`] + [`io::Write`] view of this node.
    pub fn writer(self: &Arc<Self>) -> NodeWriter {
        NodeWriter::new(Arc::clone(self))
    }

    pub fn write_byte(&self, byte: u8) -> Result<(), WriteError> {
        match &self.behavior {
            Behavior::ByteFilter(predicate) => {
                if predicate(byte) {
                    self.forward_byte(byte)
                } else {
                    Ok(())
                }
            }
            Behavior::ByteTransform(f) => self.forward_byte(f(byte)),
            Behavior::Copy(secondary) => duplicate(self.forward_byte(byte), secondary.write_byte(byte)),
            Behavior::Redirect(replacement) => replacement.write_byte(byte).map_err(WriteError::io),
            Behavior::Passthrough | Behavior::StringFilter(_) | Behavior::StringTransform(_) => {
                self.forward_byte(byte)
            }
        }
    }

    /// Writes `len` bytes of `buf` starting at `offset`.
    ///
    /// The span is checked before anything is written; an out of bounds span fails with
    /// [`WriteError::OutOfRange`] and leaves every sink untouched.
    pub fn write_range(&self, buf: &[u8], offset: usize, len: usize) -> Result<(), WriteError> {
        let bytes = segment(buf, offset, len)?;

        match &self.behavior {
            Behavior::ByteFilter(_) | Behavior::ByteTransform(_) => {
                bytes.iter().try_for_each(|&b| self.write_byte(b))
            }
            Behavior::Copy(secondary) => {
                duplicate(self.forward_range(buf, offset, len), secondary.write_range(buf, offset, len))
            }
            Behavior::Redirect(replacement) => replacement.write_range(buf, offset, len).map_err(WriteError::io),
            Behavior::Passthrough | Behavior::StringFilter(_) | Behavior::StringTransform(_) => {
                self.forward_range(buf, offset, len)
            }
        }
    }

    /// Prints a string. String filter and string transform nodes act on the whole string
    /// here; every other node writes its UTF-8 bytes through its own byte behavior.
    pub fn print(&self, s: &str) -> Result<(), WriteError> {
        match &self.behavior {
            Behavior::StringFilter(predicate) if !predicate(s) => Ok(()),
            Behavior::StringTransform(f) => self.write_str(&f(s)),
            _ => self.write_str(s),
        }
    }

    /// Prints a string followed by `\n`.
    ///
    /// String filter nodes act on the string. A string transform node transforms it only
    /// when it was built over another node; over a bare sink the line goes out unmodified.
    pub fn println(&self, s: &str) -> Result<(), WriteError> {
        match &self.behavior {
            Behavior::StringFilter(predicate) if !predicate(s) => Ok(()),
            Behavior::StringTransform(f) if self.layered => self.write_line(&f(s)),
            _ => self.write_line(s),
        }
    }

    pub fn flush(&self) -> Result<(), WriteError> {
        match &self.behavior {
            Behavior::Copy(secondary) => duplicate(self.forward_flush(), secondary.flush()),
            Behavior::Redirect(replacement) => replacement.flush().map_err(WriteError::io),
            _ => self.forward_flush(),
        }
    }

    fn write_line(&self, s: &str) -> Result<(), WriteError> {
        let mut line = String::with_capacity(s.len() + 1);
        line.push_str(s);
        line.push('\n');
        self.write_str(&line)
    }

    fn write_str(&self, s: &str) -> Result<(), WriteError> {
        self.write_range(s.as_bytes(), 0, s.len())
    }

    fn forward_byte(&self, byte: u8) -> Result<(), WriteError> {
        match &*self.delegate.load() {
            Some(delegate) => delegate.write_byte(byte),
            None => self.subject.write_byte(byte).map_err(WriteError::io),
        }
    }

    fn forward_range(&self, buf: &[u8], offset: usize, len: usize) -> Result<(), WriteError> {
        match &*self.delegate.load() {
            Some(delegate) => delegate.write_range(buf, offset, len),
            None => self.subject.write_range(buf, offset, len).map_err(WriteError::io),
        }
    }

    fn forward_flush(&self) -> Result<(), WriteError> {
        match &*self.delegate.load() {
            Some(delegate) => delegate.flush(),
            None => self.subject.flush().map_err(WriteError::io),
        }
    }
}

impl fmt::Debug for ChainNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainNode")
            .field("kind", &self.kind())
            .field("delegate", &self.find_delegate())
            .finish_non_exhaustive()
    }
}

/// Combines the two halves of a copy: both are always attempted, primary first.
fn duplicate(primary: Result<(), WriteError>, secondary: io::Result<()>) -> Result<(), WriteError> {
    let Err(secondary) = secondary else {
        return primary;
    };

    warn!(cause = %secondary, "failed to copy to secondary sink");
    match primary {
        Ok(()) => Err(WriteError::secondary(secondary)),
        Err(primary) => Err(WriteError::Duplicate { primary: Box::new(primary), secondary }),
    }
}
