//! Graph traversal algorithms (BFS).

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::types::KnowledgeUnitId;

use super::LinkGraph;

/// Direction for graph traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalDirection {
    /// Follow outgoing links (source -> target).
    Forward,
    /// Follow incoming links (target <- source).
    Backward,
    /// Follow links in both directions.
    Both,
}

impl TraversalDirection {
    /// Parse a direction name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "forward" | "out" => Some(Self::Forward),
            "backward" | "in" => Some(Self::Backward),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// A link followed during traversal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraversedLink {
    pub from: KnowledgeUnitId,
    pub to: KnowledgeUnitId,
    pub weight: f64,
}

/// Result of a breadth-first traversal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Traversal {
    /// Knowledge units in visit order, starting with the start id.
    pub visited: Vec<KnowledgeUnitId>,
    /// Hop count from the start for each visited unit.
    pub depths: HashMap<KnowledgeUnitId, u32>,
    /// Links followed to reach each newly visited unit.
    pub links: Vec<TraversedLink>,
}

/// BFS traversal from a starting knowledge unit.
///
/// Links lighter than `min_weight` are not followed. An id with no links
/// yields a traversal holding only itself.
pub fn bfs_traverse(
    graph: &LinkGraph,
    start_id: &str,
    direction: TraversalDirection,
    max_depth: u32,
    max_results: usize,
    min_weight: f64,
) -> Traversal {
    let mut visited: HashSet<String> = HashSet::new();
    let mut result = Traversal::default();
    let mut queue: VecDeque<(String, u32)> = VecDeque::new();

    if max_results == 0 {
        return result;
    }

    visited.insert(start_id.to_string());
    result.visited.push(start_id.to_string());
    result.depths.insert(start_id.to_string(), 0);
    queue.push_back((start_id.to_string(), 0));

    while let Some((current_id, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        if result.visited.len() >= max_results {
            break;
        }

        let mut neighbors: Vec<(String, TraversedLink)> = Vec::new();

        if direction != TraversalDirection::Backward {
            for link in graph.get_links_from(&current_id).unwrap_or_default() {
                neighbors.push((
                    link.target.clone(),
                    TraversedLink {
                        from: current_id.clone(),
                        to: link.target.clone(),
                        weight: link.weight,
                    },
                ));
            }
        }

        if direction != TraversalDirection::Forward {
            for (source, link) in graph.links_to(&current_id) {
                neighbors.push((
                    source.to_string(),
                    TraversedLink {
                        from: source.to_string(),
                        to: current_id.clone(),
                        weight: link.weight,
                    },
                ));
            }
        }

        for (neighbor_id, link) in neighbors {
            if link.weight < min_weight || visited.contains(&neighbor_id) {
                continue;
            }
            if result.visited.len() >= max_results {
                break;
            }

            visited.insert(neighbor_id.clone());
            result.visited.push(neighbor_id.clone());
            result.depths.insert(neighbor_id.clone(), depth + 1);
            result.links.push(link);
            queue.push_back((neighbor_id, depth + 1));
        }
    }

    result
}
