//! The graph adapter: wraps a [`Graph`] plus an optional
//! precomputed reverse adjacency as a `SearchState` space. One `Action`
//! is produced per parallel edge; the first action to a given neighbor
//! (in the graph's stable adjacency order) is the edge used whenever a
//! single cost is needed for an ordered pair.

use super::state::{SearchAction, SearchState};
use crate::model::{AdjacentEdge, Graph, NodeId};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct GraphAction {
    pub target: NodeId,
    pub edge_cost: f64,
}

impl SearchAction for GraphAction {
    fn cost(&self) -> f64 {
        self.edge_cost
    }
}

/// A reverse adjacency table, computed once per search over a directed
/// graph and shared (via `Arc`) by every `GraphState` created during that
/// search. `None` means "use the graph's own forward adjacency" -- the
/// case for undirected graphs, where the reverse is the graph itself.
pub type ReverseAdjacency = Arc<Vec<Vec<AdjacentEdge>>>;

#[derive(Clone, Debug)]
pub struct GraphState {
    graph: Arc<Graph>,
    reverse_adj: Option<ReverseAdjacency>,
    node: NodeId,
}

impl GraphState {
    pub fn forward(graph: Arc<Graph>, node: NodeId) -> Self {
        GraphState {
            graph,
            reverse_adj: None,
            node,
        }
    }

    /// Builds a state space oriented against the reverse of `graph`,
    /// precomputing the reverse adjacency once (no-op clone for
    /// undirected graphs, where forward and backward coincide).
    pub fn backward(graph: Arc<Graph>, node: NodeId) -> Self {
        if !graph.is_directed() {
            return GraphState::forward(graph, node);
        }
        let reverse = reverse_adjacency(&graph);
        GraphState {
            graph,
            reverse_adj: Some(Arc::new(reverse)),
            node,
        }
    }

    /// Builds a sibling state in the same directional space, but at a
    /// different node -- used to seed a search's initial/goal states
    /// without recomputing the reverse adjacency.
    pub fn sibling(&self, node: NodeId) -> Self {
        GraphState {
            graph: self.graph.clone(),
            reverse_adj: self.reverse_adj.clone(),
            node,
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node
    }

    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
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

impl PartialEq for GraphState {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for GraphState {}

impl Hash for GraphState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl SearchState for GraphState {
    type Action = GraphAction;

    fn applicable_actions(&self) -> Vec<GraphAction> {
        let Some(idx) = self.graph.internal_index(&self.node) else {
            return Vec::new();
        };
        let adj: &[AdjacentEdge] = match &self.reverse_adj {
            Some(rev) => &rev[idx.0],
            None => self.graph.outgoing(idx),
        };
        adj.iter()
            .map(|e| GraphAction {
                target: self.graph.external_id(e.to).clone(),
                edge_cost: e.length,
            })
            .collect()
    }

    fn apply(&self, action: &GraphAction) -> Self {
        self.sibling(action.target.clone())
    }

    fn label(&self) -> String {
        self.node.as_str_form()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphBuilder, Node};

    #[test]
    fn backward_state_reverses_directed_edges() {
        let mut b = GraphBuilder::new(true);
        b.add_node(Node::new(1, 0.0, 0.0)).unwrap();
        b.add_node(Node::new(2, 0.0, 0.0)).unwrap();
        b.add_edge(&1.into(), &2.into(), 3.0).unwrap();
        let graph = Arc::new(b.build().unwrap());

        let fwd = GraphState::forward(graph.clone(), 1.into());
        assert_eq!(fwd.applicable_actions().len(), 1);
        let fwd_at_2 = GraphState::forward(graph.clone(), 2.into());
        assert_eq!(fwd_at_2.applicable_actions().len(), 0);

        let bwd_at_2 = GraphState::backward(graph, 2.into());
        let actions = bwd_at_2.applicable_actions();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].target, 1.into());
    }
}
