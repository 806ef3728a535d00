//! A* search: the same best-first engine as [`super::ucs`], keyed
//! by `f = g + h` instead of `g` alone. Degrades to UCS when `h` is the
//! zero function.

use super::common::{Cancellation, SearchOutcome};
use super::search_error::SearchError;
use super::state::SearchState;
use super::trace::SearchObserver;
use super::ucs::best_first;

/// `heuristic` estimates remaining cost from a state to the goal. It is a
/// plain closure over `S`, not the [`crate::heuristic::Heuristic`] trait
/// directly -- that trait is keyed by [`crate::model::NodeId`], so the
/// registry wires a `GreatCircleHeuristic` (or any other `Heuristic`) into
/// this shape once it knows the concrete graph-backed state type.
pub fn astar<S: SearchState>(
    start: S,
    goal: &S,
    heuristic: &dyn Fn(&S) -> f64,
    cancel: &dyn Cancellation,
    observer: Option<&mut dyn SearchObserver>,
) -> Result<SearchOutcome<S>, SearchError> {
    best_first(start, goal, |g, s| g + heuristic(s), cancel, observer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::search::graph_state::GraphState;
    use crate::heuristic::haversine::haversine_distance_meters;
    use crate::model::{GraphBuilder, Node};
    use std::sync::Arc;

    #[test]
    fn astar_with_zero_heuristic_matches_ucs_cost() {
        let mut b = GraphBuilder::new(false);
        b.add_node(Node::new("A", 0.0, 0.0)).unwrap();
        b.add_node(Node::new("B", 0.0, 1.0)).unwrap();
        b.add_node(Node::new("C", 1.0, 1.0)).unwrap();
        b.add_edge(&"A".into(), &"B".into(), 1.0).unwrap();
        b.add_edge(&"B".into(), &"C".into(), 1.0).unwrap();
        b.add_edge(&"A".into(), &"C".into(), 3.0).unwrap();
        let graph = Arc::new(b.build().unwrap());
        let start = GraphState::forward(graph.clone(), "A".into());
        let goal = GraphState::forward(graph, "C".into());

        let outcome = astar(start, &goal, &|_s| 0.0, &(), None).unwrap();
        assert_eq!(outcome.path_cost(), Some(2.0));
    }

    #[test]
    fn astar_consistent_heuristic_finds_optimal_path() {
        let mut b = GraphBuilder::new(false);
        b.add_node(Node::new("A", 0.0, 0.0)).unwrap();
        b.add_node(Node::new("B", 0.0, 0.01)).unwrap();
        b.add_node(Node::new("C", 0.0, 0.02)).unwrap();
        b.add_node(Node::new("D", 0.01, 0.0)).unwrap();
        b.add_edge(&"A".into(), &"B".into(), 1000.0).unwrap();
        b.add_edge(&"B".into(), &"C".into(), 1000.0).unwrap();
        b.add_edge(&"A".into(), &"D".into(), 5000.0).unwrap();
        b.add_edge(&"D".into(), &"C".into(), 5000.0).unwrap();
        let graph = Arc::new(b.build().unwrap());
        let start = GraphState::forward(graph.clone(), "A".into());
        let goal = GraphState::forward(graph.clone(), "C".into());
        let goal_coord = graph.coordinate_of(&"C".into()).unwrap();

        let h = |s: &GraphState| haversine_distance_meters(s.graph().coordinate_of(s.node_id()).unwrap(), goal_coord);

        let outcome = astar(start, &goal, &h, &(), None).unwrap();
        assert_eq!(outcome.path_cost(), Some(2000.0));
        assert_eq!(
            outcome.solution_labels().unwrap(),
            vec!["A".to_string(), "B".to_string(), "C".to_string()]
        );
    }
}
