//! D*-Lite: incremental replanning over a graph whose edge costs
//! change between planning calls. Specialized directly to [`Graph`]
//! rather than generic over `SearchState` -- there is no search tree
//! here, only a `g`/`rhs` value per vertex and a reprioritizable open
//! set, and edge costs must be mutable in a way the immutable `Graph`
//! model does not allow.
//!
//! Conceptually the search grows backward from the goal: `g`/`rhs` are
//! "distance to goal" values, and settling a vertex means visiting its
//! predecessors (the edges that point into it), not its successors.

use super::search_error::SearchError;
use super::trace::{SearchDirection, SearchObserver, TraceEvent};
use crate::model::{AdjacentEdge, Graph, Internal, NodeId};
use crate::util::priority_queue::InternalPriorityQueue;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::sync::Arc;

const EPS: f64 = 1e-9;

type Key = (f64, f64);

fn less(a: Key, b: Key) -> bool {
    a.0 < b.0 - EPS || (a.0 <= b.0 + EPS && a.1 < b.1 - EPS)
}

/// An incremental shortest-path planner over a fixed topology with
/// mutable edge costs. One instance serves one (start, goal) pair;
/// moving either requires a new instance.
pub struct DStarLite {
    graph: Arc<Graph>,
    costs: Vec<f64>,
    predecessors: Option<Vec<Vec<AdjacentEdge>>>,
    start: Internal,
    goal: Internal,
    /// Agent position as of the last `km` update -- the anchor `h` is
    /// measured from when deciding how much drift to fold into `km`.
    last_start: Internal,
    km: f64,
    g: Vec<f64>,
    rhs: Vec<f64>,
    open: InternalPriorityQueue<Internal, Reverse<(OrderedFloat<f64>, OrderedFloat<f64>)>>,
    /// Two-point distance estimate `h(from, to)`, used both as the key
    /// bias `h(v, start)` and to measure how far the agent has drifted
    /// between `km` updates.
    heuristic: Box<dyn Fn(&NodeId, &NodeId) -> f64 + Send + Sync>,
    settled: usize,
}

impl DStarLite {
    /// Builds the planner and runs the first full computation, leaving
    /// `g`/`rhs` consistent and a path extractable via
    /// [`DStarLite::extract_path`].
    pub fn plan(
        graph: Arc<Graph>,
        start: NodeId,
        goal: NodeId,
        heuristic: impl Fn(&NodeId, &NodeId) -> f64 + Send + Sync + 'static,
        observer: Option<&mut dyn SearchObserver>,
    ) -> Result<Self, SearchError> {
        let start_idx = graph
            .internal_index(&start)
            .ok_or_else(|| SearchError::UnknownStartNode(start.as_str_form()))?;
        let goal_idx = graph
            .internal_index(&goal)
            .ok_or_else(|| SearchError::UnknownGoalNode(goal.as_str_form()))?;

        let n = graph.node_count();
        let costs = graph.edges().map(|e| e.length).collect();
        let predecessors = if graph.is_directed() {
            Some(reverse_adjacency(&graph))
        } else {
            None
        };

        let mut planner = DStarLite {
            graph,
            costs,
            predecessors,
            start: start_idx,
            goal: goal_idx,
            last_start: start_idx,
            km: 0.0,
            g: vec![f64::INFINITY; n],
            rhs: vec![f64::INFINITY; n],
            open: InternalPriorityQueue::default(),
            heuristic: Box::new(heuristic),
            settled: 0,
        };

        planner.rhs[goal_idx.0] = 0.0;
        let key = planner.calculate_key(goal_idx);
        planner.open.push(goal_idx, Reverse((OrderedFloat(key.0), OrderedFloat(key.1))));

        let mut observer = observer;
        planner.compute_shortest_path(&mut observer);
        Ok(planner)
    }

    fn predecessors_of(&self, u: Internal) -> &[AdjacentEdge] {
        match &self.predecessors {
            Some(rev) => &rev[u.0],
            None => self.graph.outgoing(u), // undirected: neighbors are symmetric
        }
    }

    fn successors_of(&self, u: Internal) -> &[AdjacentEdge] {
        self.graph.outgoing(u)
    }

    fn heuristic_to_start(&self, u: Internal) -> f64 {
        (self.heuristic)(self.graph.external_id(u), self.graph.external_id(self.start))
    }

    /// The successor minimizing `cost + g(successor)` -- the edge the
    /// agent would actually walk next along the current best-known
    /// route. `None` if `from` has no outgoing edges.
    fn greedy_successor(&self, from: Internal) -> Option<Internal> {
        self.successors_of(from)
            .iter()
            .min_by(|a, b| {
                let ca = self.costs[a.edge_id.0] + self.g[a.to.0];
                let cb = self.costs[b.edge_id.0] + self.g[b.to.0];
                ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| e.to)
    }

    fn calculate_key(&self, u: Internal) -> Key {
        let m = self.g[u.0].min(self.rhs[u.0]);
        (m + self.heuristic_to_start(u) + self.km, m)
    }

    fn update_vertex(&mut self, u: Internal) {
        if u != self.goal {
            self.rhs[u.0] = self
                .successors_of(u)
                .iter()
                .map(|e| self.costs[e.edge_id.0] + self.g[e.to.0])
                .fold(f64::INFINITY, f64::min);
        }
        self.open.remove(&u);
        if (self.g[u.0] - self.rhs[u.0]).abs() > EPS {
            let key = self.calculate_key(u);
            self.open.push(u, Reverse((OrderedFloat(key.0), OrderedFloat(key.1))));
        }
    }

    fn compute_shortest_path(&mut self, observer: &mut Option<&mut dyn SearchObserver>) {
        loop {
            let Some((&u, &Reverse((k1, k2)))) = self.open.peek() else {
                break;
            };
            let top_key = (k1.0, k2.0);
            let start_key = self.calculate_key(self.start);
            let start_consistent = (self.rhs[self.start.0] - self.g[self.start.0]).abs() <= EPS;
            if !less(top_key, start_key) && start_consistent {
                break;
            }

            self.open.remove(&u);
            let k_new = self.calculate_key(u);
            if less(top_key, k_new) {
                // shouldn't happen (keys only increase when km grows), but
                // a non-monotone heuristic update could produce this.
                self.open.push(u, Reverse((OrderedFloat(k_new.0), OrderedFloat(k_new.1))));
                continue;
            }

            if self.g[u.0] > self.rhs[u.0] {
                self.g[u.0] = self.rhs[u.0];
                self.settled += 1;
                log::trace!("d*-lite settled {} at g={}", self.graph.external_id(u), self.g[u.0]);
                emit_settled(observer, &self.graph, u, self.g[u.0]);
                let preds: Vec<Internal> = self.predecessors_of(u).iter().map(|e| e.to).collect();
                for p in preds {
                    self.update_vertex(p);
                }
            } else {
                self.g[u.0] = f64::INFINITY;
                self.update_vertex(u);
                let preds: Vec<Internal> = self.predecessors_of(u).iter().map(|e| e.to).collect();
                for p in preds {
                    self.update_vertex(p);
                }
            }
        }
        log::debug!("d*-lite compute_shortest_path returned, {} vertices settled so far", self.settled);
    }

    /// Applies a new cost to the edge(s) between `a` and `b` and marks
    /// both endpoints for re-evaluation. Both endpoints, not just `a`:
    /// for an undirected graph the changed edge is an outgoing edge of
    /// both `a` and `b`, and `rhs` for each depends on its own outgoing
    /// edges, so skipping either leaves a stale `rhs` behind.
    pub fn update_edge_cost(&mut self, a: &NodeId, b: &NodeId, new_cost: f64) -> Result<(), SearchError> {
        let a_idx = self.graph.internal_index(a).ok_or_else(|| {
            log::warn!("d*-lite update_edge_cost: '{a}' is not a node in this graph");
            SearchError::InternalInvariantViolated(format!("unknown node '{a}'"))
        })?;
        let b_idx = self.graph.internal_index(b).ok_or_else(|| {
            log::warn!("d*-lite update_edge_cost: '{b}' is not a node in this graph");
            SearchError::InternalInvariantViolated(format!("unknown node '{b}'"))
        })?;

        let mut touched = false;
        for e in self.graph.outgoing(a_idx) {
            if e.to == b_idx {
                self.costs[e.edge_id.0] = new_cost;
                touched = true;
            }
        }
        if !self.graph.is_directed() {
            for e in self.graph.outgoing(b_idx) {
                if e.to == a_idx {
                    self.costs[e.edge_id.0] = new_cost;
                    touched = true;
                }
            }
        }
        if !touched {
            log::warn!("d*-lite update_edge_cost: no edge between '{a}' and '{b}'");
            return Err(SearchError::InternalInvariantViolated(format!(
                "no edge between '{a}' and '{b}'"
            )));
        }

        self.update_vertex(a_idx);
        self.update_vertex(b_idx);
        Ok(())
    }

    /// Repairs `g`/`rhs` after one or more [`DStarLite::update_edge_cost`]
    /// calls. Cheap relative to replanning from scratch: only vertices
    /// whose keys are now inconsistent are revisited.
    pub fn replan(&mut self, observer: Option<&mut dyn SearchObserver>) {
        let mut observer = observer;
        self.compute_shortest_path(&mut observer);
        if let Some(path) = self.extract_path() {
            if let Some(obs) = observer {
                obs.on_event(TraceEvent::GoalFound {
                    current_node: self.graph.external_id(self.start).as_str_form(),
                    frontier: self.open.iter().map(|(&n, _)| self.graph.external_id(n).as_str_form()).collect(),
                    expanded: Vec::new(),
                    path_cost: self.g[self.start.0],
                    depth: path.len().saturating_sub(1) as u32,
                    solution_path: path.iter().map(|id| id.as_str_form()).collect(),
                    direction: Some(SearchDirection::Backward),
                });
            }
        }
    }

    pub fn start_distance(&self) -> f64 {
        self.g[self.start.0]
    }

    pub fn settled_count(&self) -> usize {
        self.settled
    }

    /// Greedily follows, from `start`, the successor edge minimizing
    /// `cost + g(successor)` until `goal` is reached. `None` if `start`
    /// has no finite `g` (unreachable) or a cycle of equal-cost ties
    /// causes the walk to exceed the graph's vertex count.
    pub fn extract_path(&self) -> Option<Vec<NodeId>> {
        if !self.g[self.start.0].is_finite() {
            return None;
        }
        let mut path = vec![self.graph.external_id(self.start).clone()];
        let mut current = self.start;
        let limit = self.graph.node_count() + 1;
        for _ in 0..limit {
            if current == self.goal {
                return Some(path);
            }
            current = self.greedy_successor(current)?;
            path.push(self.graph.external_id(current).clone());
        }
        None
    }

    /// One iteration of the main loop: moves the agent one step toward
    /// the goal along the current best-known route, applies a reported
    /// edge-cost change, folds the distance traveled since the last
    /// tick into `km`, and repairs `g`/`rhs`. No-op on the move if the
    /// agent is already at the goal or the goal is unreachable from it,
    /// matching the main loop's halting condition.
    pub fn advance_and_update_edge_cost(
        &mut self,
        a: &NodeId,
        b: &NodeId,
        new_cost: f64,
        observer: Option<&mut dyn SearchObserver>,
    ) -> Result<(), SearchError> {
        if self.start != self.goal && self.g[self.start.0].is_finite() {
            if let Some(next) = self.greedy_successor(self.start) {
                self.start = next;
            }
        }
        self.km += self.heuristic_to_start(self.last_start);
        self.last_start = self.start;
        self.update_edge_cost(a, b, new_cost)?;
        self.replan(observer);
        Ok(())
    }

    pub fn at_goal(&self) -> bool {
        self.start == self.goal
    }

    pub fn current_position(&self) -> NodeId {
        self.graph.external_id(self.start).clone()
    }
}

fn reverse_adjacency(graph: &Graph) -> Vec<Vec<AdjacentEdge>> {
    let n = graph.node_count();
    let mut rev: Vec<Vec<AdjacentEdge>> = vec![Vec::new(); n];
    for e in graph.edges() {
        let src = graph.internal_index(graph.external_id(e.source)).expect("valid index");
        let dst = graph.internal_index(graph.external_id(e.target)).expect("valid index");
        rev[dst.0].push(AdjacentEdge {
            edge_id: e.edge_id,
            length: e.length,
            to: src,
        });
    }
    rev
}

fn emit_settled(observer: &mut Option<&mut dyn SearchObserver>, graph: &Graph, u: Internal, g: f64) {
    if let Some(obs) = observer.as_deref_mut() {
        obs.on_event(TraceEvent::NodeExpanded {
            current_node: graph.external_id(u).as_str_form(),
            frontier: Vec::new(),
            expanded: Vec::new(),
            path_cost: g,
            depth: 0,
            direction: Some(SearchDirection::Backward),
        });
    }
}
