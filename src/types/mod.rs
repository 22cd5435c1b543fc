//! All data types for the ku-graph library.

pub mod error;
pub mod link;

pub use error::{KuGraphError, KuGraphResult};
pub use link::{validate_weight, KnowledgeUnitId, Link, MAX_WEIGHT, MIN_WEIGHT};
