//! Uniform-cost search: best-first keyed by `g`, with lazy deletion of
//! stale frontier entries rather than an O(n) heap removal.

use super::common::{emit_expanded, emit_goal, Cancellation, SearchOutcome};
use super::frontier::{BestFirstFrontier, Frontier};
use super::node::SearchTree;
use super::search_error::SearchError;
use super::state::{SearchAction, SearchState};
use super::trace::SearchObserver;
use std::collections::HashMap;

/// Floating-point slack used when deciding whether a popped frontier
/// entry is stale (its recorded path cost exceeds the best known g for
/// its state). Costs accumulate via repeated addition, so an exact `>`
/// comparison would occasionally treat a fresh, optimal entry as stale.
const STALE_TOLERANCE: f64 = 1e-9;

pub fn ucs<S: SearchState>(
    start: S,
    goal: &S,
    cancel: &dyn Cancellation,
    observer: Option<&mut dyn SearchObserver>,
) -> Result<SearchOutcome<S>, SearchError> {
    best_first(start, goal, |g, _s| g, cancel, observer)
}

/// Shared engine for UCS and A*: both are best-first search keyed by
/// `f(n)`, differing only in whether `f` includes a heuristic term. A*
/// passes `|g, s| g + h(s)`; UCS passes `|g, _| g`.
pub(super) fn best_first<S: SearchState>(
    start: S,
    goal: &S,
    eval: impl Fn(f64, &S) -> f64,
    cancel: &dyn Cancellation,
    mut observer: Option<&mut dyn SearchObserver>,
) -> Result<SearchOutcome<S>, SearchError> {
    let mut tree: SearchTree<S> = SearchTree::new();
    let mut best_g: HashMap<S, f64> = HashMap::new();
    let mut frontier = BestFirstFrontier::default();

    let root = tree.root(start.clone());
    let root_value = eval(0.0, &start);
    tree.set_value(root, root_value);
    frontier.add(root, root_value);
    best_g.insert(start, 0.0);

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

        let path_cost = tree.get(current).path_cost;
        let state = tree.get(current).state.clone();

        let recorded_best = *best_g.get(&state).unwrap_or(&f64::INFINITY);
        if path_cost > recorded_best + STALE_TOLERANCE {
            // stale: a cheaper route to this state was already found and
            // expanded. skip without counting it as an expansion.
            continue;
        }

        expansions += 1;
        log::trace!("best-first expanding {} at g={}", state.label(), path_cost);

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
                "best-first search iterations: {}, frontier high-water mark: {}",
                expansions,
                frontier.high_water_mark()
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

        for action in state.applicable_actions() {
            let tentative_g = path_cost + action.cost();
            let successor = state.apply(&action);
            let existing = *best_g.get(&successor).unwrap_or(&f64::INFINITY);
            if tentative_g < existing - STALE_TOLERANCE {
                best_g.insert(successor.clone(), tentative_g);
                let child = tree.child(current, action, successor.clone());
                let value = eval(tentative_g, &successor);
                tree.set_value(child, value);
                frontier.add(child, value);
            }
        }
        expanded_refs.push(current);
    }

    log::debug!(
        "best-first search exhausted the frontier without reaching the goal: {} iterations, frontier high-water mark: {}",
        expansions,
        frontier.high_water_mark()
    );
    Ok(SearchOutcome {
        tree,
        goal: None,
        expansions,
        cancelled: false,
    })
}
