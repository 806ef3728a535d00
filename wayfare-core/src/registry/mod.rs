//! Static manifests for the algorithms and heuristics a session can
//! select by name. No dynamic registration: the manifests are
//! fixed at compile time, and lookups fail closed with a typed error
//! rather than a panic, so an unknown name coming from a client request
//! becomes an ordinary error response instead of a crash.

pub mod algorithm_registry;
pub mod heuristic_registry;

pub use algorithm_registry::{AlgorithmDescriptor, AlgorithmKind, AlgorithmRegistry};
pub use heuristic_registry::{HeuristicDescriptor, HeuristicRegistry};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("unknown algorithm '{0}', known algorithms: {1}")]
    UnknownAlgorithm(String, String),
    #[error("unknown heuristic '{0}', known heuristics: {1}")]
    UnknownHeuristic(String, String),
    #[error("algorithm '{0}' requires a heuristic but none was given")]
    HeuristicRequired(String),
}
