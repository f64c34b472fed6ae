//! The terminal byte-accepting capability a chain writes to.
//!
//! A [`Sink`] is shared by every node of the chains built over it, and possibly by several
//! chains at once, so its methods take `&self` and implementations bring their own interior
//! synchronization. Two implementations are bundled:
//!
//! - [`MemorySink`]: collects bytes in memory, useful for capturing output
//! - [`WriteSink`]: adapts any [`std::io::Write`] (stdout, files, `Vec<u8>`) behind a mutex

mod memory;
mod write;

pub use memory::MemorySink;
pub use write::WriteSink;

use crate::segment::segment;
use std::io;
use std::sync::Arc;

#[cfg_attr(test, mockall::automock)]
pub trait Sink: Send + Sync {
    /// Accepts one byte.
    fn write_byte(&self, byte: u8) -> io::Result<()>;

    /// Accepts `len` bytes of `buf` starting at `offset`.
    ///
    /// The default implementation validates the span, then writes it byte by byte.
    fn write_range(&self, buf: &[u8], offset: usize, len: usize) -> io::Result<()> {
        segment(buf, offset, len)?.iter().try_for_each(|&b| self.write_byte(b))
    }

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Anything that can be shared as the secondary or replacement sink of a node: a concrete
/// `Arc<S>` as well as an already erased `Arc<dyn Sink>`.
pub trait IntoSink {
    fn into_sink(self) -> Arc<dyn Sink>;
}

impl IntoSink for Arc<dyn Sink> {
    fn into_sink(self) -> Arc<dyn Sink> {
        self
    }
}

impl<S: Sink + 'static> IntoSink for Arc<S> {
    fn into_sink(self) -> Arc<dyn Sink> {
        self
    }
}

pub(crate) fn poisoned() -> io::Error {
    io::Error::other("sink lock poisoned")
}
