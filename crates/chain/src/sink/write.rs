use crate::segment::segment;
use crate::sink::{Sink, poisoned};
use std::io::{self, Write};
use std::sync::Mutex;

/// Gives any [`Write`] the [`Sink`] capability.
///
/// Writes are serialized through a mutex, so the same `WriteSink` can sit under several
/// chains that are written from different threads.
#[derive(Debug)]
pub struct WriteSink<W> {
    inner: Mutex<W>,
}

impl<W: Write + Send> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner: Mutex::new(inner) }
    }

    /// Consumes the sink, returning the wrapped writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.inner.into_inner().map_err(|_poisoned| poisoned())
    }

    /// Runs `f` against the wrapped writer while holding the lock.
    pub fn with_inner<R>(&self, f: impl FnOnce(&mut W) -> R) -> io::Result<R> {
        let mut guard = self.inner.lock().map_err(|_poisoned| poisoned())?;
        Ok(f(&mut guard))
    }
}

impl WriteSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriteSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> Sink for WriteSink<W> {
    fn write_byte(&self, byte: u8) -> io::Result<()> {
        self.inner.lock().map_err(|_poisoned| poisoned())?.write_all(&[byte])
    }

    fn write_range(&self, buf: &[u8], offset: usize, len: usize) -> io::Result<()> {
        let bytes = segment(buf, offset, len)?;
        self.inner.lock().map_err(|_poisoned| poisoned())?.write_all(bytes)
    }

    fn flush(&self) -> io::Result<()> {
        self.inner.lock().map_err(|_poisoned| poisoned())?.flush()
    }
}
