use wayfare_core::algorithm::search::SearchError;
use wayfare_core::model::GraphManagerError;
use wayfare_core::registry::RegistryError;

/// Boundary-level errors: everything a kernel error can be, plus the
/// cases that only exist once there is a session table to look things up
/// in. A top-level error that composes the lower-level ones via
/// `#[from]`, so a `?` inside the session layer never needs a manual
/// `.map_err`.
#[derive(thiserror::Error, Debug, Clone)]
pub enum SessionError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphManagerError),
    #[error("search error: {0}")]
    Search(#[from] SearchError),
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("unresolvable node '{1}' in graph '{0}'")]
    UnresolvableNode(String, String),
    #[error("unknown session '{0}'")]
    UnknownSession(String),
    #[error("session '{0}' has no live stateful planner to apply an edge-cost update to")]
    NotStateful(String),
}
