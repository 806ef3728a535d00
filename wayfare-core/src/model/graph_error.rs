use super::graph::NodeId;

/// Errors raised while building or querying a [`super::graph::Graph`].
/// Each variant is a distinct, user-displayable failure rather than a
/// generic string.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("node id {0} already present in graph")]
    DuplicateNode(NodeId),
    #[error("edge references unknown node id {0}")]
    UnknownNode(NodeId),
    #[error("edge length must be non-negative, got {0}")]
    NegativeEdgeLength(f64),
    #[error("graph has no nodes")]
    EmptyGraph,
}
