//! Search-tree nodes (distinct from graph nodes). Stored in an arena
//! keyed by integer index rather than linked by pointer/`Rc`: arena
//! allocation with integer indices for parents avoids cyclic reference
//! issues and makes the entire search-tree deallocation O(1) at session
//! end.

use super::state::{SearchAction, SearchState};

/// Index of a [`Node`] in a [`SearchTree`] arena.
pub type NodeRef = usize;

#[derive(Debug, Clone)]
pub struct Node<S: SearchState> {
    pub parent: Option<NodeRef>,
    pub action: Option<S::Action>,
    pub state: S,
    pub depth: u32,
    pub path_cost: f64,
    /// The frontier-ordering key assigned at insertion time. `None`
    /// until a frontier's `add` sets it exactly once.
    pub value: Option<f64>,
}

/// Owns every `Node` ever created during one search. Nodes are never
/// removed -- a finished search simply drops the whole arena.
pub struct SearchTree<S: SearchState> {
    nodes: Vec<Node<S>>,
}

impl<S: SearchState> Default for SearchTree<S> {
    fn default() -> Self {
        SearchTree { nodes: Vec::new() }
    }
}

impl<S: SearchState> SearchTree<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&mut self, state: S) -> NodeRef {
        self.nodes.push(Node {
            parent: None,
            action: None,
            state,
            depth: 0,
            path_cost: 0.0,
            value: None,
        });
        self.nodes.len() - 1
    }

    pub fn child(&mut self, parent: NodeRef, action: S::Action, state: S) -> NodeRef {
        let (depth, path_cost) = {
            let p = &self.nodes[parent];
            (p.depth + 1, p.path_cost + action.cost())
        };
        self.nodes.push(Node {
            parent: Some(parent),
            action: Some(action),
            state,
            depth,
            path_cost,
            value: None,
        });
        self.nodes.len() - 1
    }

    pub fn get(&self, r: NodeRef) -> &Node<S> {
        &self.nodes[r]
    }

    /// Sets `value` on a node that has not yet been given one. Panics if
    /// called twice on the same node -- the invariant is that a
    /// frontier's `add` is the only writer, and it writes exactly once.
    pub fn set_value(&mut self, r: NodeRef, value: f64) {
        let slot = &mut self.nodes[r].value;
        debug_assert!(slot.is_none(), "node value set more than once");
        *slot = Some(value);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The path from the root to `r`, inclusive, in root-to-leaf order.
    pub fn path_states(&self, r: NodeRef) -> Vec<S> {
        let mut chain = Vec::new();
        let mut cur = Some(r);
        while let Some(idx) = cur {
            chain.push(self.nodes[idx].state.clone());
            cur = self.nodes[idx].parent;
        }
        chain.reverse();
        chain
    }
}
