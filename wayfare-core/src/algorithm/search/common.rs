//! Shared scaffolding used by every algorithm in this module: the
//! outcome type returned from a search, the cancellation capability
//! polled at each expansion, and the small helpers that turn arena
//! state into trace-event label lists.

use super::node::{NodeRef, SearchTree};
use super::state::SearchState;
use super::trace::{SearchDirection, SearchObserver, TraceEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Polled once per expansion. A session's cancellation flag is the
/// typical implementor; `()` is the no-op default for standalone use.
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

impl Cancellation for () {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl Cancellation for Arc<AtomicBool> {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

pub struct SearchOutcome<S: SearchState> {
    pub tree: SearchTree<S>,
    pub goal: Option<NodeRef>,
    pub expansions: usize,
    pub cancelled: bool,
}

impl<S: SearchState> SearchOutcome<S> {
    pub fn solution_states(&self) -> Option<Vec<S>> {
        self.goal.map(|g| self.tree.path_states(g))
    }

    pub fn solution_labels(&self) -> Option<Vec<String>> {
        self.solution_states()
            .map(|states| states.iter().map(|s| s.label()).collect())
    }

    pub fn path_cost(&self) -> Option<f64> {
        self.goal.map(|g| self.tree.get(g).path_cost)
    }
}

pub(super) fn labels<S: SearchState>(tree: &SearchTree<S>, refs: &[NodeRef]) -> Vec<String> {
    refs.iter().map(|&r| tree.get(r).state.label()).collect()
}

pub(super) fn emit_expanded<S: SearchState>(
    observer: &mut Option<&mut dyn SearchObserver>,
    tree: &SearchTree<S>,
    current: NodeRef,
    frontier_refs: &[NodeRef],
    expanded_refs: &[NodeRef],
    direction: Option<SearchDirection>,
) {
    if let Some(obs) = observer.as_deref_mut() {
        let node = tree.get(current);
        obs.on_event(TraceEvent::NodeExpanded {
            current_node: node.state.label(),
            frontier: labels(tree, frontier_refs),
            expanded: labels(tree, expanded_refs),
            path_cost: node.path_cost,
            depth: node.depth,
            direction,
        });
    }
}

#[allow(clippy::too_many_arguments)]
pub(super) fn emit_goal<S: SearchState>(
    observer: &mut Option<&mut dyn SearchObserver>,
    tree: &SearchTree<S>,
    current: NodeRef,
    frontier_refs: &[NodeRef],
    expanded_refs: &[NodeRef],
    direction: Option<SearchDirection>,
) {
    if let Some(obs) = observer.as_deref_mut() {
        let node = tree.get(current);
        let solution_path = tree
            .path_states(current)
            .iter()
            .map(|s| s.label())
            .collect();
        obs.on_event(TraceEvent::GoalFound {
            current_node: node.state.label(),
            frontier: labels(tree, frontier_refs),
            expanded: labels(tree, expanded_refs),
            path_cost: node.path_cost,
            depth: node.depth,
            solution_path,
            direction,
        });
    }
}
