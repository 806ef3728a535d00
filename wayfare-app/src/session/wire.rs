//! Response shapes for the session/app boundary. These are the
//! types a transport layer (not part of this crate) would serialize
//! directly; nothing here depends on any particular transport.

use chrono::{DateTime, Utc};
use serde::Serialize;
use wayfare_core::algorithm::search::TraceEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Pending,
    Running,
    Completed,
    Cancelled,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PollResponse {
    pub status: SessionStatus,
    pub completed: bool,
    pub steps: usize,
    pub total_steps: Option<usize>,
    pub offset: usize,
    pub events: Vec<TraceEvent>,
    pub solution_found: Option<bool>,
    pub solution_path: Option<Vec<String>>,
    pub solution_cost: Option<f64>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Wall-clock milliseconds since the session was created, not since
    /// it started running -- a `Pending` session queued behind a busy
    /// worker pool has a nonzero age before its first `Running` event.
    pub age_ms: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub graphs_available: usize,
    pub algorithms_available: usize,
    pub heuristics_available: usize,
}
