//! Cross-cutting properties and the concrete scenarios: these span
//! more than one algorithm module, so they live here rather than inside
//! any single algorithm's own `#[cfg(test)]` block.

use std::sync::Arc;
use wayfare_core::algorithm::search::{
    astar, bfs, bidirectional, dstar_lite::DStarLite, trace::VecObserver, ucs, GraphState, SearchAction,
    TraceEvent,
};
use wayfare_core::heuristic::haversine::haversine_distance_meters;
use wayfare_core::heuristic::Heuristic;
use wayfare_core::model::{Graph, GraphBuilder, GraphManager, Node};

/// `G1`: the basic triangle graph used across these scenarios.
fn g1() -> Graph {
    let mut b = GraphBuilder::new(false);
    b.add_node(Node::new("A", 0.0, 0.0)).unwrap();
    b.add_node(Node::new("B", 1.0, 0.0)).unwrap();
    b.add_node(Node::new("C", 1.0, 1.0)).unwrap();
    b.add_edge(&"A".into(), &"B".into(), 1.0).unwrap();
    b.add_edge(&"B".into(), &"C".into(), 1.0).unwrap();
    b.add_edge(&"A".into(), &"C".into(), 3.0).unwrap();
    b.build().unwrap()
}

/// `G2`: the triangle-with-detour used for UCS's replan scenario.
fn g2(b_cost: f64) -> Graph {
    let mut b = GraphBuilder::new(false);
    for id in ["A", "B", "C", "D"] {
        b.add_node(Node::new(id, 0.0, 0.0)).unwrap();
    }
    b.add_edge(&"A".into(), &"B".into(), b_cost).unwrap();
    b.add_edge(&"B".into(), &"C".into(), b_cost).unwrap();
    b.add_edge(&"A".into(), &"D".into(), 10.0).unwrap();
    b.add_edge(&"D".into(), &"C".into(), 1.0).unwrap();
    b.build().unwrap()
}

/// `G3`: two disconnected components.
fn g3() -> Graph {
    let mut b = GraphBuilder::new(false);
    for id in ["A", "B", "C", "D"] {
        b.add_node(Node::new(id, 0.0, 0.0)).unwrap();
    }
    b.add_edge(&"A".into(), &"B".into(), 1.0).unwrap();
    b.add_edge(&"C".into(), &"D".into(), 1.0).unwrap();
    b.build().unwrap()
}

struct Euclidean {
    graph: Arc<Graph>,
    goal: wayfare_core::model::NodeId,
}

impl Heuristic for Euclidean {
    fn estimate(&self, from: &wayfare_core::model::NodeId) -> f64 {
        let a = self.graph.coordinate_of(from).unwrap();
        let b = self.graph.coordinate_of(&self.goal).unwrap();
        haversine_distance_meters(a, b)
    }
}

#[test]
fn scenario_1_ucs_on_triangle() {
    let graph = Arc::new(g1());
    let start = GraphState::forward(graph.clone(), "A".into());
    let goal = GraphState::forward(graph, "C".into());
    let outcome = ucs::ucs(start, &goal, &(), None).unwrap();
    assert_eq!(outcome.path_cost(), Some(2.0));
    assert_eq!(outcome.solution_labels().unwrap(), vec!["A", "B", "C"]);
}

#[test]
fn scenario_2_bfs_graph_minimizes_hops_not_cost() {
    let graph = Arc::new(g1());
    let start = GraphState::forward(graph.clone(), "A".into());
    let goal = GraphState::forward(graph, "C".into());
    let outcome = bfs::bfs_graph(start, &goal, &(), None).unwrap();
    let path = outcome.solution_states().unwrap();
    assert_eq!(path.len(), 2, "BFS should take the direct one-hop A-C edge");
}

#[test]
fn scenario_3_astar_matches_ucs_cost_with_fewer_or_equal_expansions() {
    let graph = Arc::new(g1());
    let goal_id: wayfare_core::model::NodeId = "C".into();
    let h = Euclidean {
        graph: graph.clone(),
        goal: goal_id.clone(),
    };
    let start_u = GraphState::forward(graph.clone(), "A".into());
    let goal_u = GraphState::forward(graph.clone(), "C".into());
    let ucs_outcome = ucs::ucs(start_u, &goal_u, &(), None).unwrap();

    let start_a = GraphState::forward(graph.clone(), "A".into());
    let goal_a = GraphState::forward(graph, "C".into());
    let h_fn = |s: &GraphState| h.estimate(s.node_id());
    let astar_outcome = astar::astar(start_a, &goal_a, &h_fn, &(), None).unwrap();

    assert_eq!(astar_outcome.path_cost(), Some(2.0));
    assert_eq!(astar_outcome.solution_labels().unwrap(), vec!["A", "B", "C"]);
    assert!(astar_outcome.expansions <= ucs_outcome.expansions);
}

#[test]
fn scenario_4_bidirectional_matches_ucs_on_triangle() {
    let graph = Arc::new(g1());
    let outcome = bidirectional::bidirectional_ucs(graph, "A".into(), "C".into(), &(), None).unwrap();
    assert!((outcome.path_cost.unwrap() - 2.0).abs() < 1e-9);
    let labels = outcome.solution_labels.unwrap();
    assert_eq!(labels.first().unwrap(), "A");
    assert_eq!(labels.last().unwrap(), "C");
}

#[test]
fn scenario_5_ucs_replans_after_inflating_edges_touching_b() {
    let cheap = Arc::new(g2(1.0));
    let start = GraphState::forward(cheap.clone(), "A".into());
    let goal = GraphState::forward(cheap, "C".into());
    let before = ucs::ucs(start, &goal, &(), None).unwrap();
    assert_eq!(before.path_cost(), Some(2.0));
    assert_eq!(before.solution_labels().unwrap(), vec!["A", "B", "C"]);

    let inflated = Arc::new(g2(100.0));
    let start2 = GraphState::forward(inflated.clone(), "A".into());
    let goal2 = GraphState::forward(inflated, "C".into());
    let after = ucs::ucs(start2, &goal2, &(), None).unwrap();
    assert_eq!(after.path_cost(), Some(11.0));
    assert_eq!(after.solution_labels().unwrap(), vec!["A", "D", "C"]);
}

#[test]
fn scenario_6_disconnected_graph_has_no_path_and_no_goal_found_event() {
    let graph = Arc::new(g3());

    let mut manager = GraphManager::new();
    manager.register("g3", g3(), "G3", "two disconnected components");
    assert!(!manager.reachable("g3", &"A".into(), &"C".into()).unwrap());

    let start = GraphState::forward(graph.clone(), "A".into());
    let goal = GraphState::forward(graph.clone(), "C".into());
    let ucs_outcome = ucs::ucs(start, &goal, &(), None).unwrap();
    assert!(ucs_outcome.solution_states().is_none());

    let start_a = GraphState::forward(graph.clone(), "A".into());
    let goal_a = GraphState::forward(graph.clone(), "C".into());
    let zero_h = |_: &GraphState| 0.0;
    let astar_outcome = astar::astar(start_a, &goal_a, &zero_h, &(), None).unwrap();
    assert!(astar_outcome.solution_states().is_none());

    let bidir_outcome = bidirectional::bidirectional_ucs(graph.clone(), "A".into(), "C".into(), &(), None).unwrap();
    assert!(bidir_outcome.solution_labels.is_none());

    let mut observer = VecObserver::default();
    let start_t = GraphState::forward(graph.clone(), "A".into());
    let goal_t = GraphState::forward(graph, "C".into());
    ucs::ucs(start_t, &goal_t, &(), Some(&mut observer)).unwrap();
    assert!(!matches!(observer.events.last(), Some(TraceEvent::GoalFound { .. })));
}

#[test]
fn bfs_graph_path_length_matches_ucs_cost_on_unit_weight_graph() {
    let mut b = GraphBuilder::new(false);
    for id in ["A", "B", "C", "D", "E"] {
        b.add_node(Node::new(id, 0.0, 0.0)).unwrap();
    }
    b.add_edge(&"A".into(), &"B".into(), 1.0).unwrap();
    b.add_edge(&"B".into(), &"C".into(), 1.0).unwrap();
    b.add_edge(&"C".into(), &"D".into(), 1.0).unwrap();
    b.add_edge(&"A".into(), &"E".into(), 1.0).unwrap();
    b.add_edge(&"E".into(), &"D".into(), 1.0).unwrap();
    let graph = Arc::new(b.build().unwrap());

    let bfs_outcome = bfs::bfs_graph(
        GraphState::forward(graph.clone(), "A".into()),
        &GraphState::forward(graph.clone(), "D".into()),
        &(),
        None,
    )
    .unwrap();
    let ucs_outcome = ucs::ucs(
        GraphState::forward(graph.clone(), "A".into()),
        &GraphState::forward(graph, "D".into()),
        &(),
        None,
    )
    .unwrap();

    let bfs_edge_count = bfs_outcome.solution_states().unwrap().len() - 1;
    assert_eq!(bfs_edge_count as f64, ucs_outcome.path_cost().unwrap());
}

#[test]
fn trace_soundness_every_expanded_node_appears_in_later_expanded_lists() {
    let graph = Arc::new(g2(1.0));
    let mut observer = VecObserver::default();
    ucs::ucs(
        GraphState::forward(graph.clone(), "A".into()),
        &GraphState::forward(graph, "C".into()),
        &(),
        Some(&mut observer),
    )
    .unwrap();

    for (i, event) in observer.events.iter().enumerate() {
        let current = match event {
            TraceEvent::NodeExpanded { current_node, .. } => current_node.clone(),
            TraceEvent::GoalFound { current_node, .. } => current_node.clone(),
        };
        for later in &observer.events[i + 1..] {
            let expanded = match later {
                TraceEvent::NodeExpanded { expanded, .. } => expanded,
                TraceEvent::GoalFound { expanded, .. } => expanded,
            };
            assert!(
                expanded.contains(&current) || expanded.is_empty(),
                "node {current} expanded at step {i} never appears in a later expanded list"
            );
        }
    }
}

#[test]
fn round_trip_path_cost_matches_summed_edge_costs() {
    let graph = Arc::new(g2(1.0));
    let outcome = ucs::ucs(
        GraphState::forward(graph.clone(), "A".into()),
        &GraphState::forward(graph, "C".into()),
        &(),
        None,
    )
    .unwrap();
    let goal_ref = outcome.goal.unwrap();
    let mut summed = 0.0;
    let mut cursor = Some(goal_ref);
    while let Some(r) = cursor {
        let node = outcome.tree.get(r);
        if let Some(action) = &node.action {
            summed += action.cost();
        }
        cursor = node.parent;
    }
    let relative_error = (summed - outcome.path_cost().unwrap()).abs() / outcome.path_cost().unwrap();
    assert!(relative_error < 1e-6);
}

#[test]
fn node_id_normalization_is_idempotent() {
    let mut manager = GraphManager::new();
    manager.register("g1", g1(), "G1", "triangle");
    let first = manager.find_node("g1", "b").unwrap().unwrap();
    let second = manager.find_node("g1", &first.as_str_form()).unwrap().unwrap();
    assert_eq!(first, second);
}

#[test]
fn dstar_lite_replans_the_same_way_ucs_does_on_g2() {
    let graph = Arc::new(g2(1.0));
    let goal: wayfare_core::model::NodeId = "C".into();
    let h = move |_: &wayfare_core::model::NodeId, _: &wayfare_core::model::NodeId| 0.0;
    let mut planner = DStarLite::plan(graph, "A".into(), goal, h, None).unwrap();
    assert!((planner.start_distance() - 2.0).abs() < 1e-9);

    planner.update_edge_cost(&"A".into(), &"B".into(), 100.0).unwrap();
    planner.update_edge_cost(&"B".into(), &"C".into(), 100.0).unwrap();
    planner.replan(None);
    assert!((planner.start_distance() - 11.0).abs() < 1e-9);
    assert_eq!(
        planner.extract_path().unwrap(),
        vec!["A".into(), "D".into(), "C".into()]
    );
}
