use crate::node::NodeKind;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("argument error: {source}")]
    ArgumentError {
        #[from]
        source: ArgumentError,
    },

    #[error("write error: {source}")]
    WriteError {
        #[from]
        source: WriteError,
    },
}

/// Missing inputs, reported at the construction or removal call that needed them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("nothing to wrap: a sink or a chain node is required")]
    NullSubject,

    #[error("{kind} node requires a predicate")]
    NullPredicate { kind: NodeKind },

    #[error("{kind} node requires a transform")]
    NullTransform { kind: NodeKind },

    #[error("copy node requires a secondary sink")]
    NullSecondarySink,

    #[error("redirect node requires a replacement sink")]
    NullReplacementSink,

    #[error("removal target is no longer alive")]
    NullTarget,
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("range out of bounds, buf.len: {buf_len}, offset: {offset}, len: {len}")]
    OutOfRange { buf_len: usize, offset: usize, len: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("secondary sink io error: {source}")]
    Secondary { source: io::Error },

    #[error("primary write failed: {primary}, secondary write failed: {secondary}")]
    Duplicate { primary: Box<WriteError>, secondary: io::Error },
}

impl WriteError {
    pub fn out_of_range(buf_len: usize, offset: usize, len: usize) -> Self {
        Self::OutOfRange { buf_len, offset, len }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    pub fn secondary<E: Into<io::Error>>(e: E) -> Self {
        Self::Secondary { source: e.into() }
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

impl From<WriteError> for io::Error {
    fn from(e: WriteError) -> Self {
        match e {
            WriteError::Io { source } => source,
            WriteError::OutOfRange { .. } => io::Error::new(io::ErrorKind::InvalidInput, e),
            other => io::Error::other(other),
        }
    }
}
