//! ku-graph: directed, weighted links between knowledge units.
//!
//! Holds a mapping from a knowledge-unit id to its outgoing `(target, weight)`
//! links, with weights confined to [0.0, 1.0]. Linking the same pair twice
//! updates the weight in place. Everything lives in memory for the lifetime
//! of the owning value.

pub mod cli;
pub mod config;
pub mod graph;
pub mod service;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::KugConfig;
pub use graph::{
    bfs_traverse, GraphStats, LinkGraph, LinkOutcome, SharedLinkGraph, Traversal,
    TraversalDirection,
};
pub use service::{LinkRequest, LinkResponse, LinkService, OutgoingLinks};
pub use types::{validate_weight, KnowledgeUnitId, KuGraphError, KuGraphResult, Link};
