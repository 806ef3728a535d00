use super::wire::SessionStatus;
use chrono::{DateTime, Utc};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use wayfare_core::algorithm::search::dstar_lite::DStarLite;
use wayfare_core::algorithm::search::TraceEvent;

/// One in-flight or finished search. Lives inside the manager's session
/// table behind a single mutex; a worker thread mutates this record by
/// appending to `events` or flipping `status`, and a `Stateful` session
/// additionally holds a live planner that a later edge-cost update can
/// reach back into, long after `status` first became `Completed`.
pub struct Session {
    pub status: SessionStatus,
    pub events: Vec<TraceEvent>,
    pub expansions: usize,
    pub solution_path: Option<Vec<String>>,
    pub solution_cost: Option<f64>,
    pub error: Option<String>,
    pub cancel_flag: Arc<AtomicBool>,
    /// The live D*-Lite planner behind a `Stateful` session. `None` for
    /// every one-shot algorithm, and for a stateful session until its
    /// first plan finishes.
    pub dstar: Option<Arc<Mutex<DStarLite>>>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn pending(cancel_flag: Arc<AtomicBool>) -> Self {
        Session {
            status: SessionStatus::Pending,
            events: Vec::new(),
            expansions: 0,
            solution_path: None,
            solution_cost: None,
            error: None,
            cancel_flag,
            dstar: None,
            created_at: Utc::now(),
        }
    }
}
