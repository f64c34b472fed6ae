use crate::segment::segment;
use crate::sink::{Sink, poisoned};
use bytes::{BufMut, Bytes, BytesMut};
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A [`Sink`] that keeps everything written to it in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    buf: Mutex<BytesMut>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    // a panic in another writer must not hide what was captured before it
    fn captured(&self) -> MutexGuard<'_, BytesMut> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of everything written so far.
    pub fn to_vec(&self) -> Vec<u8> {
        self.captured().to_vec()
    }

    /// Everything written so far, decoded as UTF-8 with replacement of invalid sequences.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.to_vec()).into_owned()
    }

    /// Drains the buffer, returning its content.
    pub fn take(&self) -> Bytes {
        self.captured().split().freeze()
    }

    pub fn len(&self) -> usize {
        self.captured().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for MemorySink {
    fn write_byte(&self, byte: u8) -> io::Result<()> {
        self.buf.lock().map_err(|_poisoned| poisoned())?.put_u8(byte);
        Ok(())
    }

    fn write_range(&self, buf: &[u8], offset: usize, len: usize) -> io::Result<()> {
        let bytes = segment(buf, offset, len)?;
        self.buf.lock().map_err(|_poisoned| poisoned())?.extend_from_slice(bytes);
        Ok(())
    }
}
