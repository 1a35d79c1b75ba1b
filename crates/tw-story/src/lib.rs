//! Story graph model for Taleweaver.
//!
//! A story is a JSON document keyed by node identifier. Each node carries its
//! text and up to three choices; a choice leads either to another node or to
//! an ending (`end_*`). This crate parses those documents into a
//! [`StoryGraph`], fetches them through a [`StorySource`], and builds a
//! cycle-safe [`OutlineNode`] tree for hosts that visualize the graph.

/// Error types for loading story documents.
pub mod error;
/// The in-memory story graph.
pub mod graph;
/// Nodes, choices, and their targets.
pub mod node;
/// Tree outline of the graph, reachable from `start`.
pub mod outline;
/// Where story documents come from.
pub mod source;

pub use error::{LoadError, StoryResult};
pub use graph::StoryGraph;
pub use node::{Choice, ChoiceTarget, ENDING_PREFIX, NodeKind, START_NODE, StoryNode, is_ending_id};
pub use outline::OutlineNode;
pub use source::{DirSource, MemorySource, StorySource, load};
