//! A removable decorator chain over byte sinks
//!
//! This crate lets you stack small cross-cutting behaviors (filtering, transforming,
//! copying, redirecting) around a terminal byte [`Sink`], and then treat the whole stack as
//! a single sink. Any layer can later be removed at runtime, from any thread, by identity.
//!
//! # Features
//!
//! - Pass-through, byte filter, string filter, byte transform, string transform, copy and
//!   redirect nodes
//! - Constant-time access to the terminal sink from every node
//! - Atomic, lock-free removal of any layer while other threads keep writing
//! - Chains usable as plain sinks and as [`std::io::Write`]
//!
//! # Example
//!
//! ```
//! use micro_chain::{copy, filter_strings, MemorySink};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let secondary = Arc::new(MemorySink::new());
//!
//! let c1 = copy(Arc::clone(&sink), Arc::clone(&secondary));
//! let c2 = filter_strings(&c1, |s| s.contains("error"));
//!
//! c2.println("boom error").unwrap();
//! c2.println("fine").unwrap();
//!
//! assert_eq!(sink.to_string_lossy(), "boom error\n");
//! assert_eq!(secondary.to_string_lossy(), "boom error\n");
//! ```
//!
//! # Architecture
//!
//! - [`sink`]: the terminal [`Sink`] capability, with in-memory and [`std::io::Write`]
//!   backed implementations
//! - [`node`]: [`ChainNode`], its delegation contract and the removal protocol
//! - [`factory`]: one constructor per node kind, plus [`unwrap`]
//! - [`builder`]: [`NodeBuilder`], building one node from parts that may be missing
//! - [`chain`]: [`Chain`] and [`ChainBuilder`], assembling a pipeline layer by layer
//!
//! # Removal
//!
//! Every node keeps a fixed reference to the terminal sink (its *subject*) and a clearable
//! link to the node it wraps (its *delegate*). Removing a node clears its parent's link, so
//! the parent writes straight into the subject from then on. Everything the removed node
//! wrapped is bypassed along with it:
//!
//! ```
//! use micro_chain::{passthrough, redirect, MemorySink};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let elsewhere = Arc::new(MemorySink::new());
//!
//! let middle = redirect(Arc::clone(&sink), Arc::clone(&elsewhere));
//! let outer = passthrough(&middle);
//!
//! outer.write_byte(b'a').unwrap();
//! assert!(outer.remove_delegate(&middle));
//! outer.write_byte(b'b').unwrap();
//!
//! assert_eq!(elsewhere.to_vec(), b"a");
//! assert_eq!(sink.to_vec(), b"b");
//! ```
//!
//! # Error Handling
//!
//! - [`ArgumentError`]: a required input was missing, reported by the call that needed it
//! - [`WriteError`]: out of bounds range writes and sink I/O failures
//! - [`ChainError`]: wraps both
//!
//! # Logging
//!
//! The crate emits [`tracing`] events: `trace` when nodes are created and removal requests
//! walk the chain, `debug` when a delegate is removed, `warn` when a copy node fails to
//! write to its secondary sink. Installing a subscriber is left to the application.

pub mod builder;
pub mod chain;
pub mod factory;
pub mod node;
pub mod sink;

mod error;
mod segment;
mod utils;

pub use builder::NodeBuilder;
pub use chain::{Chain, ChainBuilder};
pub use error::{ArgumentError, ChainError, WriteError};
pub use factory::{
    copy, filter_bytes, filter_strings, passthrough, redirect, transform_bytes, transform_strings, unwrap,
};
pub use node::{ChainNode, NodeKind, NodeWriter, Target};
pub use segment::segment;
pub use sink::{IntoSink, MemorySink, Sink, WriteSink};
