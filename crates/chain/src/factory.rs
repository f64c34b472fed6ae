//! Constructors for every node kind.
//!
//! Each takes the thing to wrap as `impl Into<Target>`: an `Arc` of any [`Sink`](crate::Sink), or an
//! existing [`ChainNode`]. Wrapping a sink produces a leaf; wrapping a node links it as the
//! new node's delegate and inherits its subject.

use crate::node::{Behavior, ChainNode, Target};
use crate::sink::IntoSink;
use std::sync::Arc;

/// A node that forwards everything unmodified.
pub fn passthrough<T: Into<Target>>(target: T) -> Arc<ChainNode> {
    ChainNode::new(target.into(), Behavior::Passthrough)
}

/// A node that forwards only the bytes `predicate` accepts. Range writes are checked byte
/// by byte.
pub fn filter_bytes<T, F>(target: T, predicate: F) -> Arc<ChainNode>
where
    T: Into<Target>,
    F: Fn(u8) -> bool + Send + Sync + 'static,
{
    ChainNode::new(target.into(), Behavior::ByteFilter(Box::new(predicate)))
}

/// A node that drops `print`/`println` calls whose string `predicate` rejects. Raw byte and
/// range writes pass through unfiltered.
pub fn filter_strings<T, F>(target: T, predicate: F) -> Arc<ChainNode>
where
    T: Into<Target>,
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    ChainNode::new(target.into(), Behavior::StringFilter(Box::new(predicate)))
}

/// A node that forwards `f(b)` for every byte `b`.
pub fn transform_bytes<T, F>(target: T, f: F) -> Arc<ChainNode>
where
    T: Into<Target>,
    F: Fn(u8) -> u8 + Send + Sync + 'static,
{
    ChainNode::new(target.into(), Behavior::ByteTransform(Box::new(f)))
}

/// A node that forwards `f(s)` for every `print(s)`. Raw writes are unaffected, and so is
/// `println` unless `target` is an existing chain node.
pub fn transform_strings<T, F>(target: T, f: F) -> Arc<ChainNode>
where
    T: Into<Target>,
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    ChainNode::new(target.into(), Behavior::StringTransform(Box::new(f)))
}

/// A node that forwards as usual and also writes the same bytes to `secondary`.
pub fn copy<T: Into<Target>, S: IntoSink>(target: T, secondary: S) -> Arc<ChainNode> {
    ChainNode::new(target.into(), Behavior::Copy(secondary.into_sink()))
}

/// A node that sends every write to `replacement` and nothing to what it wraps.
pub fn redirect<T: Into<Target>, S: IntoSink>(target: T, replacement: S) -> Arc<ChainNode> {
    ChainNode::new(target.into(), Behavior::Redirect(replacement.into_sink()))
}

/// The node directly wrapped by `target`; `None` for a bare sink or a leaf.
pub fn unwrap<T: Into<Target>>(target: T) -> Option<Arc<ChainNode>> {
    match target.into() {
        Target::Sink(_) => None,
        Target::Node(node) => node.find_delegate(),
    }
}
