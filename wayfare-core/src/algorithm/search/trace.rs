//! The trace/observer protocol: every algorithm accepts an
//! optional observer capability and calls it synchronously at expansion
//! and at goal discovery. The observer is a pure sink -- it is never
//! given a way to mutate algorithm state, and its latency is the
//! algorithm's latency.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    NodeExpanded {
        current_node: String,
        frontier: Vec<String>,
        expanded: Vec<String>,
        path_cost: f64,
        depth: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        direction: Option<SearchDirection>,
    },
    GoalFound {
        current_node: String,
        frontier: Vec<String>,
        expanded: Vec<String>,
        path_cost: f64,
        depth: u32,
        solution_path: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        direction: Option<SearchDirection>,
    },
}

/// A pure sink for [`TraceEvent`]s. Algorithms accept `Option<&mut dyn
/// SearchObserver>` (or equivalent) and call `on_event` synchronously --
/// there is no buffering or async handoff inside the kernel. If absent,
/// algorithm behavior and return values are unaffected; only the trace is
/// lost.
pub trait SearchObserver {
    fn on_event(&mut self, event: TraceEvent);
}

/// The simplest observer: appends every event to a `Vec`, for algorithms
/// run outside a session (tests, the demo binary).
#[derive(Default)]
pub struct VecObserver {
    pub events: Vec<TraceEvent>,
}

impl SearchObserver for VecObserver {
    fn on_event(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

/// Adapts any `FnMut(TraceEvent)` closure into a [`SearchObserver`], so
/// callers (notably the session layer, which wants to append events to a
/// shared buffer under a lock) don't need to define a new type.
impl<F: FnMut(TraceEvent)> SearchObserver for F {
    fn on_event(&mut self, event: TraceEvent) {
        self(event)
    }
}
