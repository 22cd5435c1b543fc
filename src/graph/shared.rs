//! Thread-safe handle around a [`LinkGraph`].
//!
//! A single lock guards the whole mapping: one writer at a time, many readers.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::{KnowledgeUnitId, KuGraphResult, Link};

use super::link_graph::{LinkGraph, LinkOutcome};

/// Cloneable, shareable link graph.
#[derive(Debug, Clone, Default)]
pub struct SharedLinkGraph {
    inner: Arc<RwLock<LinkGraph>>,
}

impl SharedLinkGraph {
    /// Create a new empty shared graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing graph.
    pub fn from_graph(graph: LinkGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// See [`LinkGraph::add_link`].
    pub fn add_link(&self, from_id: &str, to_id: &str, weight: f64) -> KuGraphResult<LinkOutcome> {
        self.inner.write().add_link(from_id, to_id, weight)
    }

    /// Owned copy of the outgoing links for `ku_id`.
    pub fn links_from(&self, ku_id: &str) -> Option<Vec<Link>> {
        self.inner.read().get_links_from(ku_id).map(<[Link]>::to_vec)
    }

    /// Owned copy of the whole mapping.
    pub fn snapshot(&self) -> HashMap<KnowledgeUnitId, Vec<Link>> {
        self.inner.read().get_all_links().clone()
    }

    /// Run `f` with shared read access.
    pub fn with_read<R>(&self, f: impl FnOnce(&LinkGraph) -> R) -> R {
        f(&self.inner.read())
    }
}
