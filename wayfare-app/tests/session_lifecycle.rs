//! End-to-end session lifecycle tests: create, poll to completion,
//! cancel, and the boundary error cases the session layer promises to surface
//! synchronously from `create` rather than as a later failed session.

use std::thread;
use std::time::Duration;
use wayfare_app::session::{SearchRequest, SessionError, SessionStatus, TerminationPolicy};
use wayfare_app::WayfareApp;
use wayfare_core::model::{GraphBuilder, GraphManager, Node};
use wayfare_core::registry::RegistryError;

fn triangle_app() -> WayfareApp {
    let mut b = GraphBuilder::new(false);
    b.add_node(Node::new("A", 0.0, 0.0)).unwrap();
    b.add_node(Node::new("B", 0.0, 1.0)).unwrap();
    b.add_node(Node::new("C", 1.0, 1.0)).unwrap();
    b.add_edge(&"A".into(), &"B".into(), 1.0).unwrap();
    b.add_edge(&"B".into(), &"C".into(), 1.0).unwrap();
    b.add_edge(&"A".into(), &"C".into(), 3.0).unwrap();
    let mut graphs = GraphManager::new();
    graphs.register("triangle", b.build().unwrap(), "Triangle", "basic triangle graph for lifecycle tests");
    WayfareApp::new(graphs)
}

fn request(algorithm: &str, heuristic: Option<&str>, start: &str, goal: &str) -> SearchRequest {
    SearchRequest {
        graph_id: "triangle".to_string(),
        algorithm: algorithm.to_string(),
        heuristic: heuristic.map(str::to_string),
        start_node: start.to_string(),
        goal_node: goal.to_string(),
    }
}

fn poll_to_completion(app: &WayfareApp, session_id: &str) -> wayfare_app::session::PollResponse {
    let mut offset = 0;
    loop {
        let poll = app.sessions().poll(session_id, offset).unwrap();
        offset = poll.offset;
        if poll.completed {
            return poll;
        }
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn ucs_session_completes_with_the_optimal_path() {
    let app = triangle_app();
    let session_id = app
        .start_search(request("ucs", None, "A", "C"), TerminationPolicy::Unbounded)
        .unwrap();
    let poll = poll_to_completion(&app, &session_id);
    assert_eq!(poll.status, SessionStatus::Completed);
    assert_eq!(poll.solution_cost, Some(2.0));
    assert_eq!(poll.solution_path.unwrap(), vec!["A".to_string(), "B".to_string(), "C".to_string()]);
    assert!(!poll.events.is_empty());
}

#[test]
fn astar_session_requires_a_heuristic() {
    let app = triangle_app();
    let err = app
        .start_search(request("astar", None, "A", "C"), TerminationPolicy::Unbounded)
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Registry(RegistryError::HeuristicRequired(_))
    ));
}

#[test]
fn astar_session_completes_when_heuristic_is_given() {
    let app = triangle_app();
    let session_id = app
        .start_search(request("astar", Some("euclidean"), "A", "C"), TerminationPolicy::Unbounded)
        .unwrap();
    let poll = poll_to_completion(&app, &session_id);
    assert_eq!(poll.status, SessionStatus::Completed);
    assert_eq!(poll.solution_cost, Some(2.0));
}

#[test]
fn dstar_lite_session_completes_its_first_plan() {
    let app = triangle_app();
    let session_id = app
        .start_search(request("dstar_lite", Some("euclidean"), "A", "C"), TerminationPolicy::Unbounded)
        .unwrap();
    let poll = poll_to_completion(&app, &session_id);
    assert_eq!(poll.status, SessionStatus::Completed);
    assert_eq!(poll.solution_cost, Some(2.0));
    assert_eq!(poll.solution_path.unwrap(), vec!["A".to_string(), "B".to_string(), "C".to_string()]);
}

#[test]
fn dstar_lite_session_stays_live_for_edge_cost_updates() {
    let app = triangle_app();
    let session_id = app
        .start_search(request("dstar_lite", Some("euclidean"), "A", "C"), TerminationPolicy::Unbounded)
        .unwrap();
    let first = poll_to_completion(&app, &session_id);
    assert_eq!(first.solution_cost, Some(2.0));

    // By the time this update lands the agent has already walked the
    // first leg of its route, A -> B; B-C is now pricier than detouring
    // back through A to the direct A-C edge, so the session should
    // replan around it in place rather than needing a new session.
    app.update_edge_cost(&session_id, "B", "C", 10.0).unwrap();
    let second = app.sessions().poll(&session_id, first.offset).unwrap();

    assert!(!second.events.is_empty());
    assert_eq!(second.solution_path.unwrap(), vec!["B".to_string(), "A".to_string(), "C".to_string()]);
    assert_eq!(second.solution_cost, Some(4.0));
}

#[test]
fn update_edge_cost_on_a_one_shot_session_is_rejected() {
    let app = triangle_app();
    let session_id = app
        .start_search(request("ucs", None, "A", "C"), TerminationPolicy::Unbounded)
        .unwrap();
    poll_to_completion(&app, &session_id);
    let err = app.update_edge_cost(&session_id, "A", "B", 10.0).unwrap_err();
    assert!(matches!(err, SessionError::NotStateful(_)));
}

#[test]
fn unknown_graph_is_rejected_synchronously() {
    let app = triangle_app();
    let err = app
        .start_search(request("ucs", None, "A", "C"), TerminationPolicy::Unbounded);
    assert!(err.is_ok());

    let mut bad = request("ucs", None, "A", "C");
    bad.graph_id = "nonexistent".to_string();
    let err = app.start_search(bad, TerminationPolicy::Unbounded).unwrap_err();
    assert!(matches!(err, SessionError::Graph(_)));
}

#[test]
fn unresolvable_node_is_rejected_synchronously() {
    let app = triangle_app();
    let err = app
        .start_search(request("ucs", None, "A", "nowhere"), TerminationPolicy::Unbounded)
        .unwrap_err();
    assert!(matches!(err, SessionError::UnresolvableNode(_, _)));
}

#[test]
fn unknown_algorithm_is_rejected_synchronously() {
    let app = triangle_app();
    let err = app
        .start_search(request("dijkstra", None, "A", "C"), TerminationPolicy::Unbounded)
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Registry(RegistryError::UnknownAlgorithm(_, _))
    ));
}

#[test]
fn cancel_transitions_a_running_session_to_cancelled() {
    let app = triangle_app();
    let session_id = app
        .start_search(
            request("ucs", None, "A", "C"),
            TerminationPolicy::WallClockLimit { limit: Duration::from_secs(60) },
        )
        .unwrap();
    app.sessions().cancel(&session_id).unwrap();
    let poll = poll_to_completion(&app, &session_id);
    assert!(matches!(poll.status, SessionStatus::Cancelled | SessionStatus::Completed));
}

#[test]
fn cancel_on_unknown_session_is_an_error() {
    let app = triangle_app();
    let err = app.sessions().cancel("sess-does-not-exist").unwrap_err();
    assert!(matches!(err, SessionError::UnknownSession(_)));
}

#[test]
fn poll_offset_only_returns_new_events_since_last_call() {
    let app = triangle_app();
    let session_id = app
        .start_search(request("ucs", None, "A", "C"), TerminationPolicy::Unbounded)
        .unwrap();
    let first = poll_to_completion(&app, &session_id);
    let second = app.sessions().poll(&session_id, first.offset).unwrap();
    assert!(second.events.is_empty());
    assert_eq!(second.offset, first.offset);
}

#[test]
fn check_reachability_agrees_with_a_completed_search() {
    let app = triangle_app();
    assert!(app.check_reachability("triangle", "A", "C").unwrap());
    let session_id = app
        .start_search(request("ucs", None, "A", "C"), TerminationPolicy::Unbounded)
        .unwrap();
    let poll = poll_to_completion(&app, &session_id);
    assert!(poll.solution_found.unwrap());
}

#[test]
fn health_reports_catalogue_sizes() {
    let app = triangle_app();
    let health = app.health();
    assert_eq!(health.graphs_available, 1);
    assert_eq!(health.algorithms_available, 8);
    assert_eq!(health.heuristics_available, 1);
}
