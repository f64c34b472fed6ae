//! Building a single node out of parts that may or may not have been supplied.
//!
//! The typed constructors in [`crate::factory`] cannot be called with a missing predicate
//! or sink. `NodeBuilder` is for the cases where those parts are gathered one at a time;
//! every required part that was never supplied is reported by [`NodeBuilder::build`], with
//! the missing wrap target checked first.

use crate::error::ArgumentError;
use crate::node::{Behavior, ByteMap, BytePredicate, ChainNode, NodeKind, StringMap, StringPredicate, Target};
use crate::sink::{IntoSink, Sink};
use std::fmt;
use std::sync::Arc;

pub struct NodeBuilder {
    kind: NodeKind,
    target: Option<Target>,
    byte_predicate: Option<BytePredicate>,
    string_predicate: Option<StringPredicate>,
    byte_map: Option<ByteMap>,
    string_map: Option<StringMap>,
    sink: Option<Arc<dyn Sink>>,
}

impl NodeBuilder {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            target: None,
            byte_predicate: None,
            string_predicate: None,
            byte_map: None,
            string_map: None,
            sink: None,
        }
    }

    /// The sink or chain node the new node wraps.
    pub fn wrap<T: Into<Target>>(mut self, target: T) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Like [`wrap`](Self::wrap), but accepts a target that may be absent, such as the
    /// result of [`crate::unwrap`].
    pub fn wrap_option<T: Into<Target>>(mut self, target: Option<T>) -> Self {
        self.target = target.map(Into::into);
        self
    }

    pub fn byte_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(u8) -> bool + Send + Sync + 'static,
    {
        self.byte_predicate = Some(Box::new(predicate));
        self
    }

    pub fn string_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.string_predicate = Some(Box::new(predicate));
        self
    }

    pub fn byte_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(u8) -> u8 + Send + Sync + 'static,
    {
        self.byte_map = Some(Box::new(f));
        self
    }

    pub fn string_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.string_map = Some(Box::new(f));
        self
    }

    /// The secondary sink of a copy node, or the replacement sink of a redirect node.
    pub fn sink<S: IntoSink>(mut self, sink: S) -> Self {
        self.sink = Some(sink.into_sink());
        self
    }

    pub fn build(self) -> Result<Arc<ChainNode>, ArgumentError> {
        let kind = self.kind;
        let target = self.target.ok_or(ArgumentError::NullSubject)?;

        let behavior = match kind {
            NodeKind::Passthrough => Behavior::Passthrough,
            NodeKind::ByteFilter => {
                Behavior::ByteFilter(self.byte_predicate.ok_or(ArgumentError::NullPredicate { kind })?)
            }
            NodeKind::StringFilter => {
                Behavior::StringFilter(self.string_predicate.ok_or(ArgumentError::NullPredicate { kind })?)
            }
            NodeKind::ByteTransform => {
                Behavior::ByteTransform(self.byte_map.ok_or(ArgumentError::NullTransform { kind })?)
            }
            NodeKind::StringTransform => {
                Behavior::StringTransform(self.string_map.ok_or(ArgumentError::NullTransform { kind })?)
            }
            NodeKind::Copy => Behavior::Copy(self.sink.ok_or(ArgumentError::NullSecondarySink)?),
            NodeKind::Redirect => Behavior::Redirect(self.sink.ok_or(ArgumentError::NullReplacementSink)?),
        };

        Ok(ChainNode::new(target, behavior))
    }
}

impl fmt::Debug for NodeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeBuilder").field("kind", &self.kind).field("target", &self.target).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{passthrough, unwrap};
    use crate::sink::MemorySink;

    fn sink() -> Arc<MemorySink> {
        Arc::new(MemorySink::new())
    }

    #[test]
    fn test_missing_target() {
        let err = ChainNode::builder(NodeKind::Passthrough).build().unwrap_err();
        assert_eq!(err, ArgumentError::NullSubject);
    }

    #[test]
    fn test_missing_target_checked_before_missing_predicate() {
        let err = ChainNode::builder(NodeKind::ByteFilter).build().unwrap_err();
        assert_eq!(err, ArgumentError::NullSubject);
    }

    #[test]
    fn test_missing_predicate() {
        for kind in [NodeKind::ByteFilter, NodeKind::StringFilter] {
            let err = ChainNode::builder(kind).wrap(sink()).build().unwrap_err();
            assert_eq!(err, ArgumentError::NullPredicate { kind });
        }
    }

    #[test]
    fn test_predicate_of_other_kind_does_not_count() {
        let err = ChainNode::builder(NodeKind::StringFilter).wrap(sink()).byte_predicate(|_| true).build().unwrap_err();
        assert_eq!(err, ArgumentError::NullPredicate { kind: NodeKind::StringFilter });
    }

    #[test]
    fn test_missing_transform() {
        for kind in [NodeKind::ByteTransform, NodeKind::StringTransform] {
            let err = ChainNode::builder(kind).wrap(sink()).build().unwrap_err();
            assert_eq!(err, ArgumentError::NullTransform { kind });
        }
    }

    #[test]
    fn test_missing_sinks() {
        let err = ChainNode::builder(NodeKind::Copy).wrap(sink()).build().unwrap_err();
        assert_eq!(err, ArgumentError::NullSecondarySink);

        let err = ChainNode::builder(NodeKind::Redirect).wrap(sink()).build().unwrap_err();
        assert_eq!(err, ArgumentError::NullReplacementSink);
    }

    #[test]
    fn test_wrap_unwrapped_leaf_is_null_subject() {
        let leaf = passthrough(sink());
        let err = ChainNode::builder(NodeKind::Passthrough).wrap_option(unwrap(&leaf)).build().unwrap_err();
        assert_eq!(err, ArgumentError::NullSubject);
    }

    #[test]
    fn test_build_complete_node() {
        let out = sink();
        let node = ChainNode::builder(NodeKind::ByteTransform)
            .wrap(Arc::clone(&out))
            .byte_transform(|b| b.to_ascii_uppercase())
            .build()
            .unwrap();

        node.print("abc").unwrap();

        assert_eq!(node.kind(), NodeKind::ByteTransform);
        assert_eq!(out.to_string_lossy(), "ABC");
    }

    #[test]
    fn test_build_over_chain_keeps_subject() {
        let out = sink();
        let inner = passthrough(Arc::clone(&out));
        let copy_to = sink();
        let node = ChainNode::builder(NodeKind::Copy).wrap(&inner).sink(copy_to).build().unwrap();

        assert!(Arc::ptr_eq(node.find_delegate().as_ref().unwrap(), &inner));
        assert!(Arc::ptr_eq(node.resolved_subject(), inner.resolved_subject()));
    }
}
