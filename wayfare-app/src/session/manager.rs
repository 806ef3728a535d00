//! Hosts many concurrent searches on independent OS threads: `Arc`-shared
//! read-only state plus one worker thread per session. Sessions share
//! nothing but the sessions table itself (one mutex, short critical
//! sections) and the process-wide registries, which are lock-free after
//! initialization.

use super::error::SessionError;
use super::request::SearchRequest;
use super::session::Session;
use super::termination::{PolicyCancellation, TerminationPolicy};
use super::wire::{PollResponse, SessionStatus};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use wayfare_core::algorithm::search::{dstar_lite::DStarLite, run_named, GraphState, SearchObserver, TraceEvent};
use wayfare_core::heuristic::haversine::haversine_distance_meters;
use wayfare_core::heuristic::Heuristic;
use wayfare_core::model::{Graph, GraphManager, NodeId};
use wayfare_core::registry::{AlgorithmKind, AlgorithmRegistry, HeuristicRegistry, RegistryError};

type SessionTable = Arc<Mutex<HashMap<String, Session>>>;

pub struct SessionManager {
    graphs: Arc<GraphManager>,
    sessions: SessionTable,
    next_id: AtomicU64,
}

/// Appends events to a session's buffer under the sessions-table lock.
/// This is the hot path -- the critical section is exactly one
/// `Vec::push`.
struct SessionObserver {
    sessions: SessionTable,
    session_id: String,
}

impl SearchObserver for SessionObserver {
    fn on_event(&mut self, event: TraceEvent) {
        if let Ok(mut table) = self.sessions.lock() {
            if let Some(session) = table.get_mut(&self.session_id) {
                session.events.push(event);
            }
        }
    }
}

impl SessionManager {
    pub fn new(graphs: Arc<GraphManager>) -> Self {
        SessionManager {
            graphs,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn graphs(&self) -> &Arc<GraphManager> {
        &self.graphs
    }

    /// Validates the request synchronously (unknown graph, unresolvable
    /// node, unknown algorithm, missing required heuristic are all
    /// reported to the caller immediately rather than surfacing later as
    /// a failed session) and then spawns a worker thread to run it.
    pub fn create(&self, request: SearchRequest, policy: TerminationPolicy) -> Result<String, SessionError> {
        let graph = self.graphs.get(&request.graph_id)?;
        let start = self
            .graphs
            .find_node(&request.graph_id, &request.start_node)?
            .ok_or_else(|| SessionError::UnresolvableNode(request.graph_id.clone(), request.start_node.clone()))?;
        let goal = self
            .graphs
            .find_node(&request.graph_id, &request.goal_node)?
            .ok_or_else(|| SessionError::UnresolvableNode(request.graph_id.clone(), request.goal_node.clone()))?;
        let descriptor = AlgorithmRegistry::get(&request.algorithm)?;
        if descriptor.requires_heuristic && request.heuristic.is_none() {
            return Err(RegistryError::HeuristicRequired(descriptor.name.to_string()).into());
        }

        let cancel_flag = Arc::new(AtomicBool::new(false));
        let session_id = format!("sess-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        self.sessions
            .lock()
            .expect("sessions mutex poisoned")
            .insert(session_id.clone(), Session::pending(cancel_flag.clone()));

        let sessions = self.sessions.clone();
        let algorithm = descriptor.name;
        let kind = descriptor.kind;
        let heuristic_name = request.heuristic.clone();
        let worker_session_id = session_id.clone();
        std::thread::spawn(move || {
            run_worker(
                sessions,
                worker_session_id,
                graph,
                start,
                goal,
                algorithm,
                kind,
                heuristic_name,
                policy,
                cancel_flag,
            );
        });

        Ok(session_id)
    }

    pub fn cancel(&self, session_id: &str) -> Result<(), SessionError> {
        let table = self.sessions.lock().expect("sessions mutex poisoned");
        let session = table
            .get(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;
        session.cancel_flag.store(true, Ordering::Relaxed);
        Ok(())
    }

    /// Applies a later edge-cost update to a live `Stateful` session:
    /// moves the agent, folds the distance it traveled into `km`,
    /// applies the new cost, and repairs the route in place. Appends new
    /// trace events and a fresh `solution_path`/`solution_cost` to the
    /// same session rather than starting a new one.
    pub fn update_edge_cost(&self, session_id: &str, a: &str, b: &str, new_cost: f64) -> Result<(), SessionError> {
        let planner = {
            let table = self.sessions.lock().expect("sessions mutex poisoned");
            let session = table
                .get(session_id)
                .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;
            session
                .dstar
                .clone()
                .ok_or_else(|| SessionError::NotStateful(session_id.to_string()))?
        };

        let mut observer = SessionObserver {
            sessions: self.sessions.clone(),
            session_id: session_id.to_string(),
        };
        let (solution_path, solution_cost) = {
            let mut guard = planner.lock().expect("d*-lite planner mutex poisoned");
            guard.advance_and_update_edge_cost(&NodeId::from(a), &NodeId::from(b), new_cost, Some(&mut observer))?;
            let path = guard.extract_path().map(|p| p.iter().map(|id| id.as_str_form()).collect());
            let cost = Some(guard.start_distance()).filter(|c| c.is_finite());
            (path, cost)
        };

        if let Some(session) = self.sessions.lock().expect("sessions mutex poisoned").get_mut(session_id) {
            session.solution_path = solution_path;
            session.solution_cost = solution_cost;
        }
        Ok(())
    }

    pub fn poll(&self, session_id: &str, since_offset: usize) -> Result<PollResponse, SessionError> {
        let table = self.sessions.lock().expect("sessions mutex poisoned");
        let session = table
            .get(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;

        if since_offset > session.events.len() {
            log::warn!(
                "session {session_id}: polled at offset {since_offset}, past the current buffer length {}",
                session.events.len()
            );
        }
        let offset = since_offset.min(session.events.len());
        let events = session.events[offset..].to_vec();
        let completed = matches!(
            session.status,
            SessionStatus::Completed | SessionStatus::Cancelled | SessionStatus::Failed
        );
        Ok(PollResponse {
            status: session.status,
            completed,
            steps: session.events.len(),
            total_steps: completed.then_some(session.expansions),
            offset: session.events.len(),
            events,
            solution_found: completed.then_some(session.solution_path.is_some()),
            solution_path: session.solution_path.clone(),
            solution_cost: session.solution_cost,
            error: session.error.clone(),
            created_at: session.created_at,
            age_ms: (Utc::now() - session.created_at).num_milliseconds(),
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn run_worker(
    sessions: SessionTable,
    session_id: String,
    graph: Arc<Graph>,
    start: NodeId,
    goal: NodeId,
    algorithm: &'static str,
    kind: AlgorithmKind,
    heuristic_name: Option<String>,
    policy: TerminationPolicy,
    cancel_flag: Arc<AtomicBool>,
) {
    set_status(&sessions, &session_id, SessionStatus::Running);

    let mut observer = SessionObserver {
        sessions: sessions.clone(),
        session_id: session_id.clone(),
    };

    if kind == AlgorithmKind::Stateful {
        debug_assert_eq!(algorithm, "dstar_lite");
        // D*-Lite's key bias and its km drift term both need a
        // two-point distance estimate h(from, to), not the single-point
        // "distance to a fixed goal" the `Heuristic` trait gives the
        // one-shot algorithms -- built straight off the graph's
        // coordinates instead of going through that trait.
        let dstar_heuristic: Box<dyn Fn(&NodeId, &NodeId) -> f64 + Send + Sync> = match heuristic_name.as_deref() {
            Some(name) => match HeuristicRegistry::get(name) {
                Ok(_) => {
                    let h_graph = graph.clone();
                    Box::new(move |a: &NodeId, b: &NodeId| match (h_graph.coordinate_of(a), h_graph.coordinate_of(b)) {
                        (Some(ca), Some(cb)) => haversine_distance_meters(ca, cb),
                        _ => 0.0,
                    })
                }
                Err(e) => return finish_failed(&sessions, &session_id, e.to_string()),
            },
            None => Box::new(|_: &NodeId, _: &NodeId| 0.0),
        };
        match DStarLite::plan(graph, start, goal, dstar_heuristic, Some(&mut observer)) {
            Ok(planner) => {
                let path = planner.extract_path().map(|p| p.iter().map(|id| id.as_str_form()).collect());
                let cost = Some(planner.start_distance()).filter(|c| c.is_finite());
                let settled = planner.settled_count();
                if let Some(session) = sessions.lock().expect("sessions mutex poisoned").get_mut(&session_id) {
                    session.dstar = Some(Arc::new(Mutex::new(planner)));
                }
                finish_ok(&sessions, &session_id, settled, path, cost);
            }
            Err(e) => finish_failed(&sessions, &session_id, e.to_string()),
        }
        return;
    }

    let heuristic = heuristic_name
        .as_deref()
        .map(|name| HeuristicRegistry::build(name, graph.clone(), &goal))
        .transpose();
    let heuristic = match heuristic {
        Ok(h) => h,
        Err(e) => return finish_failed(&sessions, &session_id, e.to_string()),
    };

    let cancel = PolicyCancellation::new(policy, cancel_flag);

    let start_state = GraphState::forward(graph.clone(), start);
    let goal_state = GraphState::forward(graph, goal);
    let h_closure = heuristic.map(|h| move |s: &GraphState| h.estimate(s.node_id()));
    let h_ref: Option<&dyn Fn(&GraphState) -> f64> = h_closure.as_ref().map(|f| f as &dyn Fn(&GraphState) -> f64);

    match run_named(algorithm, start_state, &goal_state, h_ref, &cancel, Some(&mut observer)) {
        Ok(result) if result.cancelled => {
            set_status(&sessions, &session_id, SessionStatus::Cancelled);
        }
        Ok(result) => {
            finish_ok(&sessions, &session_id, result.expansions, result.solution_labels, result.path_cost);
        }
        Err(e) => finish_failed(&sessions, &session_id, e.to_string()),
    }
}

fn set_status(sessions: &SessionTable, session_id: &str, status: SessionStatus) {
    if let Some(session) = sessions.lock().expect("sessions mutex poisoned").get_mut(session_id) {
        session.status = status;
    }
}

fn finish_ok(
    sessions: &SessionTable,
    session_id: &str,
    expansions: usize,
    solution_path: Option<Vec<String>>,
    solution_cost: Option<f64>,
) {
    if let Some(session) = sessions.lock().expect("sessions mutex poisoned").get_mut(session_id) {
        session.expansions = expansions;
        session.solution_path = solution_path;
        session.solution_cost = solution_cost;
        session.status = SessionStatus::Completed;
    }
    log::debug!("session {session_id}: search completed, {expansions} expansions");
}

fn finish_failed(sessions: &SessionTable, session_id: &str, error: String) {
    if let Some(session) = sessions.lock().expect("sessions mutex poisoned").get_mut(session_id) {
        session.error = Some(error);
        session.status = SessionStatus::Failed;
    }
}
