//! Breadth-first search, tree and graph variants. Complete on
//! finite graphs; optimal in edge count (not cost) unless every edge
//! shares one weight.

use super::common::{emit_expanded, emit_goal, Cancellation, SearchOutcome};
use super::frontier::{FifoFrontier, Frontier};
use super::node::SearchTree;
use super::search_error::SearchError;
use super::state::SearchState;
use super::trace::SearchObserver;
use std::collections::HashSet;

/// No reached set; duplicate states may enter the frontier. The goal
/// test is applied to each child at generation time, guaranteeing that
/// the first goal found is at the shallowest possible depth.
pub fn bfs_tree<S: SearchState>(
    start: S,
    goal: &S,
    cancel: &dyn Cancellation,
    mut observer: Option<&mut dyn SearchObserver>,
) -> Result<SearchOutcome<S>, SearchError> {
    let mut tree: SearchTree<S> = SearchTree::new();
    let root = tree.root(start.clone());
    tree.set_value(root, 0.0);

    if start == *goal {
        emit_goal(&mut observer, &tree, root, &[], &[], None);
        return Ok(SearchOutcome {
            tree,
            goal: Some(root),
            expansions: 0,
            cancelled: false,
        });
    }

    let mut frontier = FifoFrontier::default();
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
        log::trace!("bfs_tree expanding {}", state.label());
        emit_expanded(&mut observer, &tree, current, &frontier.snapshot(), &[], None);

        for action in state.applicable_actions() {
            let child_state = state.apply(&action);
            let child = tree.child(current, action, child_state.clone());
            tree.set_value(child, 0.0);
            if child_state == *goal {
                log::debug!(
                    "bfs_tree search iterations: {}, frontier high-water mark: {}",
                    expansions,
                    frontier.high_water_mark()
                );
                emit_goal(&mut observer, &tree, child, &frontier.snapshot(), &[], None);
                return Ok(SearchOutcome {
                    tree,
                    goal: Some(child),
                    expansions,
                    cancelled: false,
                });
            }
            frontier.add(child, 0.0);
        }
    }

    log::debug!(
        "bfs_tree exhausted the frontier without reaching the goal: {} iterations",
        expansions
    );
    Ok(SearchOutcome {
        tree,
        goal: None,
        expansions,
        cancelled: false,
    })
}

/// A reached set of states prevents re-enqueuing a state already in the
/// frontier or already expanded. Goal test at generation, as in the tree
/// variant.
pub fn bfs_graph<S: SearchState>(
    start: S,
    goal: &S,
    cancel: &dyn Cancellation,
    mut observer: Option<&mut dyn SearchObserver>,
) -> Result<SearchOutcome<S>, SearchError> {
    let mut tree: SearchTree<S> = SearchTree::new();
    let root = tree.root(start.clone());
    tree.set_value(root, 0.0);

    let mut reached: HashSet<S> = HashSet::new();
    reached.insert(start.clone());

    if start == *goal {
        emit_goal(&mut observer, &tree, root, &[], &[], None);
        return Ok(SearchOutcome {
            tree,
            goal: Some(root),
            expansions: 0,
            cancelled: false,
        });
    }

    let mut frontier = FifoFrontier::default();
    frontier.add(root, 0.0);
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
        expansions += 1;
        let state = tree.get(current).state.clone();
        log::trace!("bfs_graph expanding {}", state.label());
        emit_expanded(
            &mut observer,
            &tree,
            current,
            &frontier.snapshot(),
            &expanded_refs,
            None,
        );

        for action in state.applicable_actions() {
            let child_state = state.apply(&action);
            if reached.contains(&child_state) {
                continue;
            }
            reached.insert(child_state.clone());
            let child = tree.child(current, action, child_state.clone());
            tree.set_value(child, 0.0);
            if child_state == *goal {
                log::debug!(
                    "bfs_graph search iterations: {}, frontier high-water mark: {}, reached states: {}",
                    expansions,
                    frontier.high_water_mark(),
                    reached.len()
                );
                emit_goal(
                    &mut observer,
                    &tree,
                    child,
                    &frontier.snapshot(),
                    &expanded_refs,
                    None,
                );
                return Ok(SearchOutcome {
                    tree,
                    goal: Some(child),
                    expansions,
                    cancelled: false,
                });
            }
            frontier.add(child, 0.0);
        }
        expanded_refs.push(current);
    }

    log::debug!(
        "bfs_graph exhausted the frontier without reaching the goal: {} iterations, {} reached states",
        expansions,
        reached.len()
    );
    Ok(SearchOutcome {
        tree,
        goal: None,
        expansions,
        cancelled: false,
    })
}
