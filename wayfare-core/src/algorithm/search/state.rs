//! The generic state-space search contract. Every
//! algorithm in this crate is written against `SearchState`, not against
//! [`crate::model::Graph`] directly -- [`super::graph_state::GraphState`]
//! is simply the one domain this crate ships an adapter for.
//!
//! Follows the familiar design note: "use a capability
//! interface ... combined with a tagged variant for the frontier." Here
//! the capability interface is this trait; the tagged variant is
//! [`super::frontier::Frontier`].

use std::fmt::Debug;
use std::hash::Hash;

/// An action applicable from some state: a target and its non-negative
/// cost. Actions are produced on demand by `applicable_actions` and are
/// otherwise ephemeral -- nothing in the kernel stores an `Action` beyond
/// the `Node` it produced.
pub trait SearchAction: Clone + Debug {
    fn cost(&self) -> f64;
}

/// A point in the state space. Equality and hashing must agree with
/// state identity (for [`super::graph_state::GraphState`] this means
/// "by node id only" -- the graph reference is context, not identity).
pub trait SearchState: Clone + Eq + Hash + Debug {
    type Action: SearchAction;

    /// A finite, possibly empty, sequence of actions applicable from this
    /// state. Order must be stable and deterministic across invocations
    /// within one process.
    fn applicable_actions(&self) -> Vec<Self::Action>;

    /// The state reached by taking `action` from this state.
    fn apply(&self, action: &Self::Action) -> Self;

    /// A string form of this state usable as a trace/trace-event node id.
    fn label(&self) -> String;
}
