//! Phase 2 tests: link service, traversal, and shared access.

use std::thread;

use ku_graph::graph::{bfs_traverse, LinkGraph, SharedLinkGraph, TraversalDirection};
use ku_graph::service::{LinkRequest, LinkService, LinkView};
use ku_graph::types::{KuGraphError, Link};

// ==================== Service Tests ====================

#[test]
fn test_link_success_response() {
    let mut service = LinkService::new(true);
    let response = service
        .link(&LinkRequest::new("ku_test_1", "ku_test_2", 0.75))
        .unwrap();
    assert_eq!(response.message, "Link created successfully");
    assert_eq!(response.from_ku_id, "ku_test_1");
    assert_eq!(response.to_ku_id, "ku_test_2");
    assert_eq!(response.weight, 0.75);
    assert!(!response.updated);

    let links = service.graph().get_links_from("ku_test_1").unwrap();
    assert_eq!(links, &[Link::new("ku_test_2", 0.75)]);
}

#[test]
fn test_link_update_response() {
    let mut service = LinkService::new(true);
    service.link(&LinkRequest::new("ku_test_A", "ku_test_B", 0.5)).unwrap();
    let response = service
        .link(&LinkRequest::new("ku_test_A", "ku_test_B", 0.9))
        .unwrap();
    assert!(response.updated);
    assert_eq!(response.message, "Link updated successfully");
    assert_eq!(response.weight, 0.9);
    assert_eq!(service.graph().link_count(), 1);
}

#[test]
fn test_invalid_weight_rejected() {
    let mut service = LinkService::new(true);
    for w in [1.1, -0.1] {
        match service.link(&LinkRequest::new("ku_fail_1", "ku_fail_2", w)) {
            Err(KuGraphError::InvalidWeight(got)) => assert_eq!(got, w),
            other => panic!("Expected InvalidWeight, got {:?}", other),
        }
    }
    assert!(service.all_links().is_empty());
}

#[test]
fn test_self_link_rejected_by_policy() {
    let mut service = LinkService::new(true);
    let err = service
        .link(&LinkRequest::new("ku_self", "ku_self", 0.5))
        .unwrap_err();
    assert!(matches!(err, KuGraphError::SelfLink(ref id) if id == "ku_self"));
    assert!(err.to_string().contains("Cannot link a Knowledge Unit to itself"));
    assert!(service.graph().is_empty());
}

#[test]
fn test_outgoing_listing() {
    let mut service = LinkService::new(true);
    service.link(&LinkRequest::new("ku_source", "ku_target1", 0.8)).unwrap();
    service.link(&LinkRequest::new("ku_source", "ku_target2", 0.6)).unwrap();

    let outgoing = service.outgoing("ku_source");
    assert_eq!(outgoing.ku_id, "ku_source");
    assert_eq!(
        outgoing.links,
        vec![
            LinkView { to_ku_id: "ku_target1".to_string(), weight: 0.8 },
            LinkView { to_ku_id: "ku_target2".to_string(), weight: 0.6 },
        ]
    );

    let json = serde_json::to_value(&outgoing).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "ku_id": "ku_source",
            "links": [
                {"to_ku_id": "ku_target1", "weight": 0.8},
                {"to_ku_id": "ku_target2", "weight": 0.6}
            ]
        })
    );
}

#[test]
fn test_outgoing_unknown_renders_empty() {
    let service = LinkService::new(true);
    let outgoing = service.outgoing("ku_does_not_exist_in_graph");
    assert_eq!(outgoing.ku_id, "ku_does_not_exist_in_graph");
    assert!(outgoing.links.is_empty());
    // The core still reports absence
    assert!(service.graph().get_links_from("ku_does_not_exist_in_graph").is_none());
}

#[test]
fn test_incoming_listing() {
    let mut service = LinkService::new(true);
    service.link(&LinkRequest::new("k2", "k3", 0.3)).unwrap();
    service.link(&LinkRequest::new("k1", "k3", 0.2)).unwrap();
    let incoming = service.incoming("k3");
    let sources: Vec<&str> = incoming.links.iter().map(|l| l.from_ku_id.as_str()).collect();
    assert_eq!(sources, vec!["k1", "k2"]);
}

#[test]
fn test_all_links_json_shape() {
    let mut service = LinkService::new(true);
    service.link(&LinkRequest::new("k1", "k2", 0.1)).unwrap();
    service.link(&LinkRequest::new("k1", "k3", 0.2)).unwrap();
    service.link(&LinkRequest::new("k2", "k3", 0.3)).unwrap();

    let json = serde_json::to_value(service.all_links()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"k1": [["k2", 0.1], ["k3", 0.2]], "k2": [["k3", 0.3]]})
    );
}

// ==================== Traversal Tests ====================

fn chain_graph() -> LinkGraph {
    let mut graph = LinkGraph::new();
    graph.add_link("a", "b", 0.9).unwrap();
    graph.add_link("b", "c", 0.8).unwrap();
    graph.add_link("c", "d", 0.2).unwrap();
    graph.add_link("a", "e", 0.1).unwrap();
    graph
}

#[test]
fn test_traverse_forward_depth_limit() {
    let graph = chain_graph();
    let t = bfs_traverse(&graph, "a", TraversalDirection::Forward, 2, 100, 0.0);
    assert_eq!(t.visited, vec!["a", "b", "e", "c"]);
    assert_eq!(t.depths["c"], 2);
    assert!(!t.depths.contains_key("d"));
    assert_eq!(t.links.len(), 3);
}

#[test]
fn test_traverse_min_weight() {
    let graph = chain_graph();
    let t = bfs_traverse(&graph, "a", TraversalDirection::Forward, 10, 100, 0.5);
    assert_eq!(t.visited, vec!["a", "b", "c"]);
}

#[test]
fn test_traverse_backward_and_both() {
    let graph = chain_graph();
    let back = bfs_traverse(&graph, "c", TraversalDirection::Backward, 10, 100, 0.0);
    assert_eq!(back.visited, vec!["c", "b", "a"]);

    let both = bfs_traverse(&graph, "b", TraversalDirection::Both, 1, 100, 0.0);
    assert_eq!(both.visited, vec!["b", "c", "a"]);
}

#[test]
fn test_traverse_unknown_start_and_max_results() {
    let graph = chain_graph();
    let t = bfs_traverse(&graph, "zzz", TraversalDirection::Forward, 5, 100, 0.0);
    assert_eq!(t.visited, vec!["zzz"]);
    assert!(t.links.is_empty());

    let t = bfs_traverse(&graph, "a", TraversalDirection::Forward, 5, 2, 0.0);
    assert_eq!(t.visited.len(), 2);
}

#[test]
fn test_direction_from_name() {
    assert_eq!(TraversalDirection::from_name("Forward"), Some(TraversalDirection::Forward));
    assert_eq!(TraversalDirection::from_name("in"), Some(TraversalDirection::Backward));
    assert_eq!(TraversalDirection::from_name("sideways"), None);
}

// ==================== Shared Access Tests ====================

#[test]
fn test_shared_concurrent_writers() {
    let shared = SharedLinkGraph::new();
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let g = shared.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    g.add_link("hub", &format!("t{}_{}", t, i), 0.5).unwrap();
                    // Every thread also hammers the same pair
                    g.add_link("hub", "shared", (i as f64) / 100.0).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let hub = shared.links_from("hub").unwrap();
    assert_eq!(hub.len(), 8 * 100 + 1);
    assert_eq!(hub.iter().filter(|l| l.target == "shared").count(), 1);
    assert_eq!(shared.with_read(|g| g.source_count()), 1);
}

#[test]
fn test_shared_rejection_and_snapshot() {
    let shared = SharedLinkGraph::from_graph(chain_graph());
    let before = shared.snapshot();
    assert!(shared.add_link("a", "b", 2.0).is_err());
    assert_eq!(shared.snapshot(), before);
}
