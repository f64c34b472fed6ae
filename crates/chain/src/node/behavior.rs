use crate::sink::Sink;
use std::fmt;
use std::sync::Arc;

pub type BytePredicate = Box<dyn Fn(u8) -> bool + Send + Sync>;
pub type StringPredicate = Box<dyn Fn(&str) -> bool + Send + Sync>;
pub type ByteMap = Box<dyn Fn(u8) -> u8 + Send + Sync>;
pub type StringMap = Box<dyn Fn(&str) -> String + Send + Sync>;

/// The one cross-cutting behavior a node adds on top of plain delegation.
pub(crate) enum Behavior {
    Passthrough,
    ByteFilter(BytePredicate),
    StringFilter(StringPredicate),
    ByteTransform(ByteMap),
    StringTransform(StringMap),
    Copy(Arc<dyn Sink>),
    Redirect(Arc<dyn Sink>),
}

impl Behavior {
    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            Behavior::Passthrough => NodeKind::Passthrough,
            Behavior::ByteFilter(_) => NodeKind::ByteFilter,
            Behavior::StringFilter(_) => NodeKind::StringFilter,
            Behavior::ByteTransform(_) => NodeKind::ByteTransform,
            Behavior::StringTransform(_) => NodeKind::StringTransform,
            Behavior::Copy(_) => NodeKind::Copy,
            Behavior::Redirect(_) => NodeKind::Redirect,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Passthrough,
    ByteFilter,
    StringFilter,
    ByteTransform,
    StringTransform,
    Copy,
    Redirect,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Passthrough => "passthrough",
            NodeKind::ByteFilter => "byte filter",
            NodeKind::StringFilter => "string filter",
            NodeKind::ByteTransform => "byte transform",
            NodeKind::StringTransform => "string transform",
            NodeKind::Copy => "copy",
            NodeKind::Redirect => "redirect",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
