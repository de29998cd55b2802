//! kubedoc library
//!
//! Core functionality for the kubedoc TUI: the declarative rendering engine,
//! the resource state store, and the polling/delete coordination. Usable as
//! a library (and by the test suite) without a terminal or a cluster.

pub mod cli;
pub mod cluster;
pub mod config;
pub mod models;
pub mod poll;
pub mod render;
pub mod state;
#[cfg(feature = "tui")]
pub mod tui;
pub mod views;

// Re-export commonly used types for convenience
pub use cluster::{ClusterError, ClusterExecutor};
pub use models::{ItemDetail, ResourceItem, ResourceKind};
pub use poll::{ClusterEvent, Outcome, Poller};
pub use render::{Document, Evaluator, Node, RenderError, SectionStates, StyleTag};
pub use state::{ResourceStore, StoreError};
pub use views::{render_document, KindSnapshot};
