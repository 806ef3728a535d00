//! Search algorithms and the scaffolding they share: the
//! generic [`SearchState`]/[`SearchAction`] abstraction, an arena-backed
//! [`SearchTree`], three frontier disciplines, and the trace/observer
//! protocol. Every algorithm except [`dstar_lite`] is generic over any
//! `SearchState` implementation; `dstar_lite` is specialized to
//! [`crate::model::Graph`] because incremental replanning needs mutable
//! edge costs the generic abstraction doesn't model.

pub mod astar;
pub mod bfs;
pub mod bidirectional;
pub mod common;
pub mod dfs;
pub mod dstar_lite;
pub mod frontier;
pub mod graph_state;
pub mod node;
pub mod search_error;
pub mod state;
pub mod trace;
pub mod ucs;

pub use common::{Cancellation, SearchOutcome};
pub use frontier::{BestFirstFrontier, FifoFrontier, Frontier, LifoFrontier};
pub use graph_state::{GraphAction, GraphState};
pub use node::{Node, NodeRef, SearchTree};
pub use search_error::SearchError;
pub use state::{SearchAction, SearchState};
pub use trace::{SearchDirection, SearchObserver, TraceEvent, VecObserver};

use bidirectional::BidirectionalOutcome;
use dstar_lite::DStarLite;

/// The outcome shape every registered algorithm reduces to, so the
/// registry and session layer don't need to match on which algorithm
/// ran. Per-algorithm detail (the full search tree, D*-Lite's live
/// planner) is still available from the algorithm's own return type for
/// callers that want it.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub solution_labels: Option<Vec<String>>,
    pub path_cost: Option<f64>,
    pub expansions: usize,
    pub cancelled: bool,
}

impl<S: SearchState> From<SearchOutcome<S>> for RunResult {
    fn from(outcome: SearchOutcome<S>) -> Self {
        RunResult {
            solution_labels: outcome.solution_labels(),
            path_cost: outcome.path_cost(),
            expansions: outcome.expansions,
            cancelled: outcome.cancelled,
        }
    }
}

impl From<BidirectionalOutcome> for RunResult {
    fn from(outcome: BidirectionalOutcome) -> Self {
        RunResult {
            solution_labels: outcome.solution_labels,
            path_cost: outcome.path_cost,
            expansions: outcome.expansions,
            cancelled: outcome.cancelled,
        }
    }
}

impl From<&DStarLite> for RunResult {
    fn from(planner: &DStarLite) -> Self {
        let path = planner.extract_path();
        RunResult {
            solution_labels: path.map(|p| p.iter().map(|id| id.as_str_form()).collect()),
            path_cost: Some(planner.start_distance()).filter(|c| c.is_finite()),
            expansions: planner.settled_count(),
            cancelled: false,
        }
    }
}

/// Runs one of the six tree/graph uninformed and semi-informed
/// algorithms by name over a [`GraphState`] space. `astar` requires a
/// non-`None` `heuristic`; every other name ignores it.
///
/// This is the dispatcher the algorithm registry hangs off of --
/// it exists so `wayfare-app` can invoke an algorithm chosen at request
/// time without matching on a type per call site.
pub fn run_named<'a>(
    name: &str,
    start: GraphState,
    goal: &GraphState,
    heuristic: Option<&'a dyn Fn(&GraphState) -> f64>,
    cancel: &dyn Cancellation,
    observer: Option<&mut dyn SearchObserver>,
) -> Result<RunResult, SearchError> {
    match name {
        "bfs_tree" => bfs::bfs_tree(start, goal, cancel, observer).map(Into::into),
        "bfs_graph" => bfs::bfs_graph(start, goal, cancel, observer).map(Into::into),
        "dfs_tree" => dfs::dfs_tree(start, goal, cancel, observer).map(Into::into),
        "dfs_graph" => dfs::dfs_graph(start, goal, cancel, observer).map(Into::into),
        "ucs" => ucs::ucs(start, goal, cancel, observer).map(Into::into),
        "astar" => {
            let h = heuristic.ok_or(SearchError::NoHeuristicProvided)?;
            astar::astar(start, goal, h, cancel, observer).map(Into::into)
        }
        "bidirectional" => {
            let graph = start.graph().clone();
            bidirectional::bidirectional_ucs(graph, start.node_id().clone(), goal.node_id().clone(), cancel, observer)
                .map(Into::into)
        }
        other => Err(SearchError::InternalInvariantViolated(format!(
            "unknown algorithm '{other}'"
        ))),
    }
}
