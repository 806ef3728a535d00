//! Depth-first search, tree and graph variants. Complete on finite
//! graphs but gives no optimality guarantee, in cost or in hop count.

use super::common::{emit_expanded, emit_goal, Cancellation, SearchOutcome};
use super::frontier::{Frontier, LifoFrontier};
use super::node::SearchTree;
use super::search_error::SearchError;
use super::state::SearchState;
use super::trace::SearchObserver;
use std::collections::HashSet;

/// No reached set; duplicate states may enter the frontier. Unlike BFS
/// tree, the goal test happens at expansion time.
pub fn dfs_tree<S: SearchState>(
    start: S,
    goal: &S,
    cancel: &dyn Cancellation,
    mut observer: Option<&mut dyn SearchObserver>,
) -> Result<SearchOutcome<S>, SearchError> {
    let mut tree: SearchTree<S> = SearchTree::new();
    let root = tree.root(start);
    tree.set_value(root, 0.0);

    let mut frontier = LifoFrontier::default();
    frontier.add(root, 0.0);
    let mut expansions = 0usize;

    while let Some(current) = frontier.remove() {
        if cancel.is_cancelled() {
            return Ok(SearchOutcome {
                tree,
                goal: None,
                expansions,
                cancelled: true,
            });
        }
        expansions += 1;
        let state = tree.get(current).state.clone();
        log::trace!("dfs_tree expanding {}", state.label());
        emit_expanded(&mut observer, &tree, current, &frontier.snapshot(), &[], None);

        if state == *goal {
            log::debug!(
                "dfs_tree search iterations: {}, frontier high-water mark: {}",
                expansions,
                frontier.high_water_mark()
            );
            emit_goal(&mut observer, &tree, current, &frontier.snapshot(), &[], None);
            return Ok(SearchOutcome {
                tree,
                goal: Some(current),
                expansions,
                cancelled: false,
            });
        }

        for action in state.applicable_actions() {
            let child_state = state.apply(&action);
            let child = tree.child(current, action, child_state);
            tree.set_value(child, 0.0);
            frontier.add(child, 0.0);
        }
    }

    log::debug!(
        "dfs_tree exhausted the frontier without reaching the goal: {} iterations",
        expansions
    );
    Ok(SearchOutcome {
        tree,
        goal: None,
        expansions,
        cancelled: false,
    })
}

/// Tests at expansion and skips states already in the expanded set --
/// duplicates may still sit in the frontier, they are simply discarded
/// (uncounted) when popped.
pub fn dfs_graph<S: SearchState>(
    start: S,
    goal: &S,
    cancel: &dyn Cancellation,
    mut observer: Option<&mut dyn SearchObserver>,
) -> Result<SearchOutcome<S>, SearchError> {
    let mut tree: SearchTree<S> = SearchTree::new();
    let root = tree.root(start);
    tree.set_value(root, 0.0);

    let mut frontier = LifoFrontier::default();
    frontier.add(root, 0.0);
    let mut expanded: HashSet<S> = HashSet::new();
    let mut expanded_refs = Vec::new();
    let mut expansions = 0usize;

    while let Some(current) = frontier.remove() {
        if cancel.is_cancelled() {
            return Ok(SearchOutcome {
                tree,
                goal: None,
                expansions,
                cancelled: true,
            });
        }
        let state = tree.get(current).state.clone();
        if expanded.contains(&state) {
            continue;
        }
        expansions += 1;
        log::trace!("dfs_graph expanding {}", state.label());
        emit_expanded(
            &mut observer,
            &tree,
            current,
            &frontier.snapshot(),
            &expanded_refs,
            None,
        );

        if state == *goal {
            log::debug!(
                "dfs_graph search iterations: {}, frontier high-water mark: {}, expanded states: {}",
                expansions,
                frontier.high_water_mark(),
                expanded.len()
            );
            emit_goal(
                &mut observer,
                &tree,
                current,
                &frontier.snapshot(),
                &expanded_refs,
                None,
            );
            return Ok(SearchOutcome {
                tree,
                goal: Some(current),
                expansions,
                cancelled: false,
            });
        }
        expanded.insert(state.clone());
        expanded_refs.push(current);

        for action in state.applicable_actions() {
            let child_state = state.apply(&action);
            let child = tree.child(current, action, child_state);
            tree.set_value(child, 0.0);
            frontier.add(child, 0.0);
        }
    }

    log::debug!(
        "dfs_graph exhausted the frontier without reaching the goal: {} iterations, {} expanded states",
        expansions,
        expanded.len()
    );
    Ok(SearchOutcome {
        tree,
        goal: None,
        expansions,
        cancelled: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::search::graph_state::GraphState;
    use crate::model::{GraphBuilder, Node};
    use std::sync::Arc;

    #[test]
    fn dfs_graph_terminates_on_cyclic_graph() {
        let mut b = GraphBuilder::new(false);
        b.add_node(Node::new("A", 0.0, 0.0)).unwrap();
        b.add_node(Node::new("B", 0.0, 0.0)).unwrap();
        b.add_node(Node::new("C", 0.0, 0.0)).unwrap();
        b.add_edge(&"A".into(), &"B".into(), 1.0).unwrap();
        b.add_edge(&"B".into(), &"C".into(), 1.0).unwrap();
        b.add_edge(&"C".into(), &"A".into(), 1.0).unwrap();
        let graph = Arc::new(b.build().unwrap());
        let start = GraphState::forward(graph.clone(), "A".into());
        let goal = GraphState::forward(graph, "C".into());
        let outcome = dfs_graph(start, &goal, &(), None).unwrap();
        assert!(outcome.goal.is_some());
    }

    #[test]
    fn dfs_tree_finds_some_path_no_optimality_claim() {
        let mut b = GraphBuilder::new(false);
        b.add_node(Node::new("A", 0.0, 0.0)).unwrap();
        b.add_node(Node::new("B", 0.0, 0.0)).unwrap();
        b.add_node(Node::new("C", 0.0, 0.0)).unwrap();
        b.add_edge(&"A".into(), &"B".into(), 1.0).unwrap();
        b.add_edge(&"B".into(), &"C".into(), 1.0).unwrap();
        let graph = Arc::new(b.build().unwrap());
        let start = GraphState::forward(graph.clone(), "A".into());
        let goal = GraphState::forward(graph, "C".into());
        let outcome = dfs_tree(start, &goal, &(), None).unwrap();
        assert!(outcome.goal.is_some());
    }
}
