//! In-memory link graph and the operations over it.

pub mod link_graph;
pub mod shared;
pub mod traversal;

pub use link_graph::{GraphStats, LinkGraph, LinkOutcome};
pub use shared::SharedLinkGraph;
pub use traversal::{bfs_traverse, Traversal, TraversalDirection, TraversedLink};
