use crate::model::GraphError;

/// Errors raised by a search algorithm. The kernel never poisons the
/// process -- a failed
/// search returns one of these to its caller, who decides whether that
/// is a user-visible error or a normal "no solution" outcome.
#[derive(thiserror::Error, Debug, Clone)]
pub enum SearchError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("algorithm requires a heuristic but none was provided")]
    NoHeuristicProvided,
    #[error("start node '{0}' not found in graph")]
    UnknownStartNode(String),
    #[error("goal node '{0}' not found in graph")]
    UnknownGoalNode(String),
    #[error("search cancelled")]
    Cancelled,
    #[error("internal search invariant violated: {0}")]
    InternalInvariantViolated(String),
}
