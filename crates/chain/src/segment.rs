//! Bounds checking for `(buf, offset, len)` range writes.
//!
//! Every range write, at every node and in every bundled sink, validates its span here
//! before a single byte is visited, so a rejected write never produces partial output.

use crate::error::WriteError;
use crate::utils::ensure;

/// Returns `buf[offset..offset + len]`, or [`WriteError::OutOfRange`] when the span does not
/// fit inside `buf`.
pub fn segment(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], WriteError> {
    let end = offset.checked_add(len).ok_or_else(|| WriteError::out_of_range(buf.len(), offset, len))?;
    ensure!(end <= buf.len(), WriteError::out_of_range(buf.len(), offset, len));
    Ok(&buf[offset..end])
}
