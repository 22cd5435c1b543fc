//! Request/response layer over the link graph.
//!
//! These are the bodies a knowledge-submission path sends to register a
//! relationship and the listings a query path renders. The self-link
//! policy lives here; the graph itself accepts self-links.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::{LinkGraph, LinkOutcome};
use crate::types::{KnowledgeUnitId, KuGraphError, KuGraphResult, Link};

/// Body of a link request: `{from_ku_id, to_ku_id, weight}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRequest {
    pub from_ku_id: KnowledgeUnitId,
    pub to_ku_id: KnowledgeUnitId,
    pub weight: f64,
}

impl LinkRequest {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self {
            from_ku_id: from.into(),
            to_ku_id: to.into(),
            weight,
        }
    }
}

/// Reply to an accepted link request.
///
/// Unlike the original endpoint, which always answered "Link created
/// successfully", an in-place update answers "Link updated successfully"
/// and sets `updated`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkResponse {
    pub message: String,
    pub from_ku_id: KnowledgeUnitId,
    pub to_ku_id: KnowledgeUnitId,
    pub weight: f64,
    /// True when an existing link was updated rather than created.
    pub updated: bool,
}

/// One outgoing link as rendered to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkView {
    pub to_ku_id: KnowledgeUnitId,
    pub weight: f64,
}

/// Outgoing links of one knowledge unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingLinks {
    pub ku_id: KnowledgeUnitId,
    pub links: Vec<LinkView>,
}

/// One incoming link as rendered to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomingView {
    pub from_ku_id: KnowledgeUnitId,
    pub weight: f64,
}

/// Incoming links of one knowledge unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomingLinks {
    pub ku_id: KnowledgeUnitId,
    pub links: Vec<IncomingView>,
}

/// Owns a graph and applies caller-facing policy on top of it.
#[derive(Debug, Default)]
pub struct LinkService {
    graph: LinkGraph,
    reject_self_links: bool,
}

impl LinkService {
    pub fn new(reject_self_links: bool) -> Self {
        Self {
            graph: LinkGraph::new(),
            reject_self_links,
        }
    }

    /// Create or update a link.
    pub fn link(&mut self, request: &LinkRequest) -> KuGraphResult<LinkResponse> {
        if self.reject_self_links && request.from_ku_id == request.to_ku_id {
            log::warn!("Rejected self link on {}", request.from_ku_id);
            return Err(KuGraphError::SelfLink(request.from_ku_id.clone()));
        }

        let outcome = self
            .graph
            .add_link(&request.from_ku_id, &request.to_ku_id, request.weight)?;

        let message = match outcome {
            LinkOutcome::Added => "Link created successfully",
            LinkOutcome::Updated { .. } => "Link updated successfully",
        };

        Ok(LinkResponse {
            message: message.to_string(),
            from_ku_id: request.from_ku_id.clone(),
            to_ku_id: request.to_ku_id.clone(),
            weight: request.weight,
            updated: !outcome.is_added(),
        })
    }

    /// Outgoing links for `ku_id`. An unknown id renders as an empty list.
    pub fn outgoing(&self, ku_id: &str) -> OutgoingLinks {
        let links = self
            .graph
            .get_links_from(ku_id)
            .unwrap_or_default()
            .iter()
            .map(|l| LinkView {
                to_ku_id: l.target.clone(),
                weight: l.weight,
            })
            .collect();
        OutgoingLinks {
            ku_id: ku_id.to_string(),
            links,
        }
    }

    /// Incoming links for `ku_id`, sorted by source.
    pub fn incoming(&self, ku_id: &str) -> IncomingLinks {
        let links = self
            .graph
            .links_to(ku_id)
            .into_iter()
            .map(|(source, l)| IncomingView {
                from_ku_id: source.to_string(),
                weight: l.weight,
            })
            .collect();
        IncomingLinks {
            ku_id: ku_id.to_string(),
            links,
        }
    }

    /// The full mapping.
    pub fn all_links(&self) -> &HashMap<KnowledgeUnitId, Vec<Link>> {
        self.graph.get_all_links()
    }

    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_from_json_body() {
        let req: LinkRequest =
            serde_json::from_str(r#"{"from_ku_id": "ku_A", "to_ku_id": "ku_B", "weight": 0.85}"#)
                .unwrap();
        assert_eq!(req, LinkRequest::new("ku_A", "ku_B", 0.85));
    }

    #[test]
    fn self_link_allowed_when_policy_off() {
        let mut service = LinkService::new(false);
        assert!(service.link(&LinkRequest::new("a", "a", 0.5)).is_ok());
        assert_eq!(service.graph().weight("a", "a"), Some(0.5));
    }
}
