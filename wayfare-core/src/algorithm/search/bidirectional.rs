//! Bidirectional UCS: a forward frontier grown from the start and
//! a backward frontier grown from the goal over [`GraphState::backward`],
//! alternating expansion and meeting in the middle.
//!
//! Specialized to [`GraphState`] rather than generic over `SearchState` --
//! meeting detection needs to compare the two sides by the same `NodeId`
//! space, and constructing the backward side requires `GraphState`'s own
//! `backward`/`sibling` constructors.

use super::common::{emit_expanded, labels as node_labels, Cancellation};
use super::frontier::{BestFirstFrontier, Frontier};
use super::graph_state::GraphState;
use super::node::{NodeRef, SearchTree};
use super::search_error::SearchError;
use super::state::{SearchAction, SearchState};
use super::trace::{SearchDirection, SearchObserver, TraceEvent};
use crate::model::{Graph, NodeId};
use std::collections::HashMap;
use std::sync::Arc;

const STALE_TOLERANCE: f64 = 1e-9;

pub struct BidirectionalOutcome {
    pub solution_labels: Option<Vec<String>>,
    pub path_cost: Option<f64>,
    pub expansions: usize,
    pub cancelled: bool,
}

struct Side {
    tree: SearchTree<GraphState>,
    frontier: BestFirstFrontier,
    best_g: HashMap<NodeId, f64>,
    best_ref: HashMap<NodeId, NodeRef>,
    expanded_refs: Vec<NodeRef>,
    expansions: usize,
}

impl Side {
    fn seed(state: GraphState) -> Self {
        let mut tree = SearchTree::new();
        let root = tree.root(state.clone());
        tree.set_value(root, 0.0);
        let mut frontier = BestFirstFrontier::default();
        frontier.add(root, 0.0);
        let mut best_g = HashMap::new();
        best_g.insert(state.node_id().clone(), 0.0);
        let mut best_ref = HashMap::new();
        best_ref.insert(state.node_id().clone(), root);
        Side {
            tree,
            frontier,
            best_g,
            best_ref,
            expanded_refs: Vec::new(),
            expansions: 0,
        }
    }

    fn top_value(&self) -> f64 {
        self.frontier.peek_top().map(|(_, v)| v).unwrap_or(f64::INFINITY)
    }
}

pub fn bidirectional_ucs(
    graph: Arc<Graph>,
    start: NodeId,
    goal: NodeId,
    cancel: &dyn Cancellation,
    mut observer: Option<&mut dyn SearchObserver>,
) -> Result<BidirectionalOutcome, SearchError> {
    if start == goal {
        return Ok(BidirectionalOutcome {
            solution_labels: Some(vec![start.as_str_form()]),
            path_cost: Some(0.0),
            expansions: 0,
            cancelled: false,
        });
    }

    let mut fwd = Side::seed(GraphState::forward(graph.clone(), start));
    let mut bwd = Side::seed(GraphState::backward(graph, goal));

    let mut best_cost = f64::INFINITY;
    let mut meeting: Option<NodeId> = None;

    loop {
        if cancel.is_cancelled() {
            return Ok(BidirectionalOutcome {
                solution_labels: None,
                path_cost: None,
                expansions: fwd.expansions + bwd.expansions,
                cancelled: true,
            });
        }

        if fwd.frontier.is_empty() && bwd.frontier.is_empty() {
            break;
        }

        if meeting.is_some() && fwd.top_value().min(bwd.top_value()) >= best_cost - STALE_TOLERANCE {
            break;
        }

        // ties favor the forward side.
        let expand_forward = if fwd.frontier.is_empty() {
            false
        } else if bwd.frontier.is_empty() {
            true
        } else {
            fwd.top_value() <= bwd.top_value()
        };

        let direction = if expand_forward {
            SearchDirection::Forward
        } else {
            SearchDirection::Backward
        };
        let (this, other) = if expand_forward {
            (&mut fwd, &mut bwd)
        } else {
            (&mut bwd, &mut fwd)
        };

        let Some(current) = this.frontier.remove() else {
            continue;
        };
        let path_cost = this.tree.get(current).path_cost;
        let state = this.tree.get(current).state.clone();
        let node_id = state.node_id().clone();

        let recorded_best = *this.best_g.get(&node_id).unwrap_or(&f64::INFINITY);
        if path_cost > recorded_best + STALE_TOLERANCE {
            continue;
        }

        this.expansions += 1;
        log::trace!("bidirectional expanding {} ({:?})", node_id, direction);
        emit_expanded(
            &mut observer,
            &this.tree,
            current,
            &this.frontier.snapshot(),
            &this.expanded_refs,
            Some(direction),
        );

        if let Some(&other_g) = other.best_g.get(&node_id) {
            let candidate = path_cost + other_g;
            if candidate < best_cost {
                best_cost = candidate;
                meeting = Some(node_id.clone());
            }
        }

        for action in state.applicable_actions() {
            let tentative_g = path_cost + action.cost();
            let successor = state.apply(&action);
            let succ_id = successor.node_id().clone();
            let existing = *this.best_g.get(&succ_id).unwrap_or(&f64::INFINITY);
            if tentative_g < existing - STALE_TOLERANCE {
                this.best_g.insert(succ_id.clone(), tentative_g);
                let child = this.tree.child(current, action, successor);
                this.tree.set_value(child, tentative_g);
                this.frontier.add(child, tentative_g);
                this.best_ref.insert(succ_id.clone(), child);

                if let Some(&other_g) = other.best_g.get(&succ_id) {
                    let candidate = tentative_g + other_g;
                    if candidate < best_cost {
                        best_cost = candidate;
                        meeting = Some(succ_id);
                    }
                }
            }
        }
        this.expanded_refs.push(current);
    }

    let Some(meet) = meeting else {
        log::debug!(
            "bidirectional search exhausted both frontiers without meeting: {} forward + {} backward expansions",
            fwd.expansions,
            bwd.expansions
        );
        return Ok(BidirectionalOutcome {
            solution_labels: None,
            path_cost: None,
            expansions: fwd.expansions + bwd.expansions,
            cancelled: false,
        });
    };
    log::debug!(
        "bidirectional search met at {}: {} forward + {} backward expansions, frontier high-water marks {}/{}",
        meet,
        fwd.expansions,
        bwd.expansions,
        fwd.frontier.high_water_mark(),
        bwd.frontier.high_water_mark()
    );

    let fwd_ref = *fwd.best_ref.get(&meet).expect("meeting node reached from start");
    let bwd_ref = *bwd.best_ref.get(&meet).expect("meeting node reached from goal");

    let forward_half = fwd.tree.path_states(fwd_ref);
    let mut backward_half = bwd.tree.path_states(bwd_ref);
    backward_half.reverse();
    backward_half.remove(0); // drop the duplicated meeting node

    let mut solution = forward_half;
    solution.extend(backward_half);
    let solution_labels: Vec<String> = solution.iter().map(|s| s.label()).collect();

    // The meeting node is an interior point of the real path, not its
    // goal -- report the reconstructed start-to-goal route here, not
    // just the forward half up to the meeting point.
    if let Some(obs) = observer.as_deref_mut() {
        let mut frontier = node_labels(&fwd.tree, &fwd.frontier.snapshot());
        frontier.extend(node_labels(&bwd.tree, &bwd.frontier.snapshot()));
        let mut expanded = node_labels(&fwd.tree, &fwd.expanded_refs);
        expanded.extend(node_labels(&bwd.tree, &bwd.expanded_refs));
        obs.on_event(TraceEvent::GoalFound {
            current_node: solution_labels.last().expect("solution includes at least the goal").clone(),
            frontier,
            expanded,
            path_cost: best_cost,
            depth: (solution_labels.len() - 1) as u32,
            solution_path: solution_labels.clone(),
            direction: Some(SearchDirection::Forward),
        });
    }

    Ok(BidirectionalOutcome {
        solution_labels: Some(solution_labels),
        path_cost: Some(best_cost),
        expansions: fwd.expansions + bwd.expansions,
        cancelled: false,
    })
}
