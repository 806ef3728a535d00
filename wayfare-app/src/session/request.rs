use serde::Deserialize;

/// A search request as it arrives at the boundary. `start_node`/
/// `goal_node` are caller-supplied strings, not yet resolved `NodeId`s --
/// resolution goes through [`wayfare_core::model::GraphManager::find_node`]
/// so callers can pass "42", "Downtown", or "downtown" interchangeably.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub graph_id: String,
    pub algorithm: String,
    #[serde(default)]
    pub heuristic: Option<String>,
    pub start_node: String,
    pub goal_node: String,
}
