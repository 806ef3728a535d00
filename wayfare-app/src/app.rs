//! The non-search facade: health, graph listing/retrieval, node
//! validation, reachability. Thin wrappers over [`GraphManager`] plus the
//! registries -- there is no state here beyond what `GraphManager` and
//! `SessionManager` already own, with a single `WayfareApp` value acting
//! as the one entry point a binary or server holds.

use crate::session::wire::HealthResponse;
use crate::session::{SearchRequest, SessionError, SessionManager, TerminationPolicy};
use std::sync::Arc;
use wayfare_core::model::{GraphManager, GraphManagerError, GraphMetadata, NodeValidation, SerializedGraph};
use wayfare_core::registry::{AlgorithmRegistry, HeuristicRegistry};

pub struct WayfareApp {
    sessions: SessionManager,
}

impl WayfareApp {
    pub fn new(graphs: GraphManager) -> Self {
        WayfareApp {
            sessions: SessionManager::new(Arc::new(graphs)),
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "ok",
            graphs_available: self.sessions.graphs().list().len(),
            algorithms_available: AlgorithmRegistry::list().len(),
            heuristics_available: HeuristicRegistry::list().len(),
        }
    }

    pub fn list_graphs(&self) -> Vec<(String, GraphMetadata)> {
        self.sessions
            .graphs()
            .list()
            .into_iter()
            .map(|(id, meta)| (id.to_string(), meta.clone()))
            .collect()
    }

    pub fn get_graph(&self, graph_id: &str) -> Result<SerializedGraph, GraphManagerError> {
        self.sessions.graphs().serialize(graph_id)
    }

    pub fn validate_node(&self, graph_id: &str, input: &str) -> Result<NodeValidation, GraphManagerError> {
        self.sessions.graphs().validate_node(graph_id, input)
    }

    pub fn check_reachability(&self, graph_id: &str, start: &str, goal: &str) -> Result<bool, SessionError> {
        let graphs = self.sessions.graphs();
        let start_id = graphs
            .find_node(graph_id, start)?
            .ok_or_else(|| SessionError::UnresolvableNode(graph_id.to_string(), start.to_string()))?;
        let goal_id = graphs
            .find_node(graph_id, goal)?
            .ok_or_else(|| SessionError::UnresolvableNode(graph_id.to_string(), goal.to_string()))?;
        Ok(graphs.reachable(graph_id, &start_id, &goal_id)?)
    }

    pub fn start_search(&self, request: SearchRequest, policy: TerminationPolicy) -> Result<String, SessionError> {
        self.sessions.create(request, policy)
    }

    /// Submits a later edge-cost change into a live `dstar_lite` session,
    /// replanning in place rather than starting a new session.
    pub fn update_edge_cost(&self, session_id: &str, a: &str, b: &str, new_cost: f64) -> Result<(), SessionError> {
        self.sessions.update_edge_cost(session_id, a, b, new_cost)
    }
}
