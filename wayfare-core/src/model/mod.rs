pub mod graph;
pub mod graph_error;
pub mod graph_manager;

pub use graph::{AdjacentEdge, Edge, EdgeId, Graph, GraphBuilder, GraphView, Internal, Node, NodeId};
pub use graph_error::GraphError;
pub use graph_manager::{
    BoundingBox, GraphManager, GraphManagerError, GraphMetadata, NodeValidation, SerializedEdge,
    SerializedGraph, SerializedNode,
};
