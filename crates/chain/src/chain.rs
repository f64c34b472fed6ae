//! Assembling a whole pipeline in one expression.
//!
//! [`ChainBuilder`] stacks nodes from the innermost outwards, each new layer wrapping the
//! previous one. The resulting [`Chain`] writes through its outermost layer and remembers
//! every layer, so any of them can be removed later.
//!
//! ```
//! use micro_chain::{Chain, MemorySink};
//! use std::sync::Arc;
//!
//! let out = Arc::new(MemorySink::new());
//! let errors = Arc::new(MemorySink::new());
//!
//! let chain = Chain::builder(Arc::clone(&out))
//!     .copy(Arc::clone(&errors))
//!     .filter_strings(|s| s.contains("error"))
//!     .build();
//!
//! chain.head().println("boom error").unwrap();
//! chain.head().println("fine").unwrap();
//!
//! assert_eq!(out.to_string_lossy(), "boom error\n");
//! assert_eq!(errors.to_string_lossy(), "boom error\n");
//! ```

use crate::factory;
use crate::node::{ChainNode, Target};
use crate::sink::{IntoSink, Sink};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Chain {
    /// innermost first
    layers: Vec<Arc<ChainNode>>,
}

impl Chain {
    pub fn builder<T: Into<Target>>(target: T) -> ChainBuilder {
        ChainBuilder::new(target.into())
    }

    /// The outermost layer, where writes enter the chain.
    pub fn head(&self) -> &Arc<ChainNode> {
        // a chain always has at least one layer, see `ChainBuilder::build`
        &self.layers[self.layers.len() - 1]
    }

    /// Every layer as built, innermost first. Removed layers are still listed.
    pub fn layers(&self) -> &[Arc<ChainNode>] {
        &self.layers
    }

    pub fn subject(&self) -> &Arc<dyn Sink> {
        self.head().resolved_subject()
    }

    /// Removes `layer` from the chain, see [`ChainNode::remove_delegate`].
    pub fn remove(&self, layer: &Arc<ChainNode>) -> bool {
        self.head().remove_delegate(layer)
    }
}

#[derive(Debug)]
pub struct ChainBuilder {
    target: Target,
    layers: Vec<Arc<ChainNode>>,
}

impl ChainBuilder {
    fn new(target: Target) -> Self {
        Self { target, layers: vec![] }
    }

    fn push(mut self, node: Arc<ChainNode>) -> Self {
        self.target = Target::Node(Arc::clone(&node));
        self.layers.push(node);
        self
    }

    pub fn passthrough(self) -> Self {
        let node = factory::passthrough(self.target.clone());
        self.push(node)
    }

    pub fn filter_bytes<F>(self, predicate: F) -> Self
    where
        F: Fn(u8) -> bool + Send + Sync + 'static,
    {
        let node = factory::filter_bytes(self.target.clone(), predicate);
        self.push(node)
    }

    pub fn filter_strings<F>(self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let node = factory::filter_strings(self.target.clone(), predicate);
        self.push(node)
    }

    pub fn transform_bytes<F>(self, f: F) -> Self
    where
        F: Fn(u8) -> u8 + Send + Sync + 'static,
    {
        let node = factory::transform_bytes(self.target.clone(), f);
        self.push(node)
    }

    pub fn transform_strings<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        let node = factory::transform_strings(self.target.clone(), f);
        self.push(node)
    }

    pub fn copy<S: IntoSink>(self, secondary: S) -> Self {
        let node = factory::copy(self.target.clone(), secondary);
        self.push(node)
    }

    pub fn redirect<S: IntoSink>(self, replacement: S) -> Self {
        let node = factory::redirect(self.target.clone(), replacement);
        self.push(node)
    }

    /// Finishes the chain. A builder without layers yields a single passthrough leaf.
    pub fn build(self) -> Chain {
        let builder = if self.layers.is_empty() { self.passthrough() } else { self };
        Chain { layers: builder.layers }
    }
}
