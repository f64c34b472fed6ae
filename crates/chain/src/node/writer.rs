use crate::node::ChainNode;
use crate::sink::Sink;
use std::io;
use std::sync::Arc;

/// A chain seen from the outside as a plain [`Sink`] and as an [`io::Write`].
///
/// Lets a whole chain serve as the secondary sink of a copy node or the replacement sink
/// of a redirect node, and lets `write!`/`writeln!` target a chain.
#[derive(Debug, Clone)]
pub struct NodeWriter {
    node: Arc<ChainNode>,
}

impl NodeWriter {
    pub(crate) fn new(node: Arc<ChainNode>) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &Arc<ChainNode> {
        &self.node
    }
}

impl Sink for NodeWriter {
    fn write_byte(&self, byte: u8) -> io::Result<()> {
        Ok(self.node.write_byte(byte)?)
    }

    fn write_range(&self, buf: &[u8], offset: usize, len: usize) -> io::Result<()> {
        Ok(self.node.write_range(buf, offset, len)?)
    }

    fn flush(&self) -> io::Result<()> {
        Ok(self.node.flush()?)
    }
}

impl io::Write for NodeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.node.write_range(buf, 0, buf.len())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.node.flush()?)
    }
}
