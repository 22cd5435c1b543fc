//! Core graph structure: knowledge units and their weighted outgoing links.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::{validate_weight, KnowledgeUnitId, KuGraphResult, Link};

/// What a successful [`LinkGraph::add_link`] call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkOutcome {
    /// A new link was appended to the source's list.
    Added,
    /// An existing link had its weight replaced in place.
    Updated {
        /// Weight held before the update.
        previous: f64,
    },
}

impl LinkOutcome {
    /// True if the call created a new link.
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Summary counts for a graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Knowledge units with at least one outgoing link.
    pub sources: usize,
    /// Total number of links.
    pub links: usize,
    /// Distinct knowledge units appearing as source or target.
    pub units: usize,
    /// Mean link weight, 0.0 for an empty graph.
    pub mean_weight: f64,
}

/// Directed, weighted links between knowledge units.
///
/// Each source maps to its outgoing links in insertion order. A second link
/// to the same target updates the weight in place instead of appending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkGraph {
    /// Outgoing links, keyed by source id.
    links: HashMap<KnowledgeUnitId, Vec<Link>>,
}

impl LinkGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link from `from_id` to `to_id`, or update its weight if one exists.
    ///
    /// Weights outside [0.0, 1.0] are rejected and the graph is left untouched.
    /// Self-links and unknown ids are accepted.
    pub fn add_link(
        &mut self,
        from_id: &str,
        to_id: &str,
        weight: f64,
    ) -> KuGraphResult<LinkOutcome> {
        if let Err(e) = validate_weight(weight) {
            log::warn!("Rejected link from {from_id} to {to_id}: {e}");
            return Err(e);
        }

        let outcome = self.insert_validated(from_id, to_id.to_string(), weight);
        match outcome {
            LinkOutcome::Added => {
                log::info!("Added link from {from_id} to {to_id} with weight {weight}")
            }
            LinkOutcome::Updated { .. } => {
                log::info!("Updated link from {from_id} to {to_id} with new weight {weight}")
            }
        }
        Ok(outcome)
    }

    fn insert_validated(
        &mut self,
        from_id: &str,
        to_id: KnowledgeUnitId,
        weight: f64,
    ) -> LinkOutcome {
        let outgoing = self.links.entry(from_id.to_string()).or_default();

        // Linear scan; at most one entry per target.
        if let Some(existing) = outgoing.iter_mut().find(|l| l.target == to_id) {
            let previous = existing.weight;
            existing.weight = weight;
            LinkOutcome::Updated { previous }
        } else {
            outgoing.push(Link::new(to_id, weight));
            LinkOutcome::Added
        }
    }

    /// Outgoing links for `ku_id` in their stored order, or `None` if it has none.
    pub fn get_links_from(&self, ku_id: &str) -> Option<&[Link]> {
        self.links.get(ku_id).map(Vec::as_slice)
    }

    /// The entire graph, source id to outgoing links.
    pub fn get_all_links(&self) -> &HashMap<KnowledgeUnitId, Vec<Link>> {
        &self.links
    }

    /// Current weight of the link `from_id -> to_id`.
    pub fn weight(&self, from_id: &str, to_id: &str) -> Option<f64> {
        self.get_links_from(from_id)?
            .iter()
            .find(|l| l.target == to_id)
            .map(|l| l.weight)
    }

    /// All links that point TO `ku_id`, as `(source, link)` pairs sorted by source.
    pub fn links_to(&self, ku_id: &str) -> Vec<(&str, &Link)> {
        let mut result: Vec<(&str, &Link)> = self
            .links
            .iter()
            .filter_map(|(source, outgoing)| {
                outgoing
                    .iter()
                    .find(|l| l.target == ku_id)
                    .map(|l| (source.as_str(), l))
            })
            .collect();
        result.sort_by(|a, b| a.0.cmp(b.0));
        result
    }

    /// Source ids in sorted order.
    pub fn sources(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.links.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of sources with an entry.
    pub fn source_count(&self) -> usize {
        self.links.len()
    }

    /// Total number of links.
    pub fn link_count(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    /// True if the graph holds no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Summary counts.
    pub fn stats(&self) -> GraphStats {
        let mut units: HashSet<&str> = HashSet::new();
        let mut total = 0.0;
        let mut links = 0usize;
        for (source, outgoing) in &self.links {
            units.insert(source);
            for link in outgoing {
                units.insert(&link.target);
                total += link.weight;
                links += 1;
            }
        }
        GraphStats {
            sources: self.links.len(),
            links,
            units: units.len(),
            mean_weight: if links == 0 { 0.0 } else { total / links as f64 },
        }
    }

    /// Drop every link.
    pub fn clear(&mut self) {
        self.links.clear();
    }
}
