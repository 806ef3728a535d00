//! Holds a small, fixed set of named graphs for the life of the process,
//! normalizes caller-supplied node identifiers, and answers connectivity
//! queries. This is the one piece of the kernel that looks like a
//! conventional "repository" type, keeping multiple named graphs
//! addressable by id rather than assuming a single process-wide graph.

use super::graph::{Graph, NodeId};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GraphManagerError {
    #[error("unknown graph id '{0}'")]
    UnknownGraph(String),
    #[error("node '{1}' not found in graph '{0}'")]
    UnresolvableNode(String, String),
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    fn from_graph(graph: &Graph) -> Self {
        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        let mut min_lon = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;
        for n in graph.nodes() {
            min_lat = min_lat.min(n.lat());
            max_lat = max_lat.max(n.lat());
            min_lon = min_lon.min(n.lon());
            max_lon = max_lon.max(n.lon());
        }
        BoundingBox {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct GraphMetadata {
    pub display_name: String,
    pub description: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct NodeValidation {
    pub valid: bool,
    pub node_id: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub label: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct SerializedNode {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, serde::Serialize)]
pub struct SerializedEdge {
    pub source: String,
    pub target: String,
    pub length: f64,
}

#[derive(Debug, serde::Serialize)]
pub struct SerializedGraph {
    pub graph_id: String,
    pub metadata: GraphMetadata,
    pub nodes: Vec<SerializedNode>,
    pub edges: Vec<SerializedEdge>,
}

struct Entry {
    graph: Arc<Graph>,
    metadata: GraphMetadata,
    /// undirected weakly-connected component id per internal node index,
    /// precomputed at registration time so `reachable` is O(1).
    component_of: Vec<usize>,
}

#[derive(Default)]
pub struct GraphManager {
    graphs: HashMap<String, Entry>,
}

impl GraphManager {
    pub fn new() -> Self {
        GraphManager {
            graphs: HashMap::new(),
        }
    }

    pub fn register(
        &mut self,
        graph_id: impl Into<String>,
        graph: Graph,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) {
        let component_of = weakly_connected_components(&graph);
        let metadata = GraphMetadata {
            display_name: display_name.into(),
            description: description.into(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            bounding_box: BoundingBox::from_graph(&graph),
        };
        self.graphs.insert(
            graph_id.into(),
            Entry {
                graph: Arc::new(graph),
                metadata,
                component_of,
            },
        );
    }

    pub fn get(&self, graph_id: &str) -> Result<Arc<Graph>, GraphManagerError> {
        self.graphs
            .get(graph_id)
            .map(|e| e.graph.clone())
            .ok_or_else(|| GraphManagerError::UnknownGraph(graph_id.to_string()))
    }

    pub fn metadata(&self, graph_id: &str) -> Result<&GraphMetadata, GraphManagerError> {
        self.graphs
            .get(graph_id)
            .map(|e| &e.metadata)
            .ok_or_else(|| GraphManagerError::UnknownGraph(graph_id.to_string()))
    }

    pub fn list(&self) -> Vec<(&str, &GraphMetadata)> {
        self.graphs
            .iter()
            .map(|(id, e)| (id.as_str(), &e.metadata))
            .collect()
    }

    /// Resolves a caller-supplied node identifier string against a graph's
    /// actual node ids, trying in order:
    /// 1. direct string match against a `NodeId::Str`,
    /// 2. integer parse then match against a `NodeId::Int`,
    /// 3. case-insensitive string match against the string form of every
    ///    node id.
    ///
    /// Returns the original in-graph id, preserving its actual type.
    pub fn find_node(&self, graph_id: &str, input: &str) -> Result<Option<NodeId>, GraphManagerError> {
        let entry = self
            .graphs
            .get(graph_id)
            .ok_or_else(|| GraphManagerError::UnknownGraph(graph_id.to_string()))?;
        let graph = &entry.graph;

        let direct = NodeId::Str(input.to_string());
        if graph.internal_index(&direct).is_some() {
            return Ok(Some(direct));
        }

        if let Ok(i) = input.parse::<i64>() {
            let as_int = NodeId::Int(i);
            if graph.internal_index(&as_int).is_some() {
                return Ok(Some(as_int));
            }
        }

        let lowered = input.to_lowercase();
        for id in graph.node_ids() {
            if id.as_str_form().to_lowercase() == lowered {
                return Ok(Some(id.clone()));
            }
        }

        Ok(None)
    }

    pub fn validate_node(
        &self,
        graph_id: &str,
        input: &str,
    ) -> Result<NodeValidation, GraphManagerError> {
        let entry = self
            .graphs
            .get(graph_id)
            .ok_or_else(|| GraphManagerError::UnknownGraph(graph_id.to_string()))?;
        match self.find_node(graph_id, input)? {
            None => Ok(NodeValidation {
                valid: false,
                node_id: input.to_string(),
                lat: None,
                lon: None,
                label: None,
            }),
            Some(id) => {
                let idx = entry.graph.internal_index(&id).expect("just resolved");
                let node = entry.graph.node_at(idx);
                Ok(NodeValidation {
                    valid: true,
                    node_id: id.as_str_form(),
                    lat: Some(node.lat()),
                    lon: Some(node.lon()),
                    label: Some(id.as_str_form()),
                })
            }
        }
    }

    /// True iff `start` and `goal` lie in the same weakly-connected
    /// component of the graph's undirected projection.
    pub fn reachable(
        &self,
        graph_id: &str,
        start: &NodeId,
        goal: &NodeId,
    ) -> Result<bool, GraphManagerError> {
        let entry = self
            .graphs
            .get(graph_id)
            .ok_or_else(|| GraphManagerError::UnknownGraph(graph_id.to_string()))?;
        let start_idx = entry
            .graph
            .internal_index(start)
            .ok_or_else(|| GraphManagerError::UnresolvableNode(graph_id.to_string(), start.to_string()))?;
        let goal_idx = entry
            .graph
            .internal_index(goal)
            .ok_or_else(|| GraphManagerError::UnresolvableNode(graph_id.to_string(), goal.to_string()))?;
        Ok(entry.component_of[start_idx.0] == entry.component_of[goal_idx.0])
    }

    /// Full node/edge serialization for the boundary. Node ids are
    /// coerced to strings; parallel edges are collapsed to one edge per
    /// unordered pair.
    pub fn serialize(&self, graph_id: &str) -> Result<SerializedGraph, GraphManagerError> {
        let entry = self
            .graphs
            .get(graph_id)
            .ok_or_else(|| GraphManagerError::UnknownGraph(graph_id.to_string()))?;
        let graph = &entry.graph;

        let nodes = graph
            .nodes()
            .map(|n| SerializedNode {
                id: n.id.as_str_form(),
                lat: n.lat(),
                lon: n.lon(),
            })
            .collect();

        let mut seen_pairs: std::collections::HashSet<(usize, usize)> = std::collections::HashSet::new();
        let mut edges = Vec::new();
        for e in graph.edges() {
            let key = if e.source.0 <= e.target.0 {
                (e.source.0, e.target.0)
            } else {
                (e.target.0, e.source.0)
            };
            if !seen_pairs.insert(key) {
                continue;
            }
            edges.push(SerializedEdge {
                source: graph.external_id(e.source).as_str_form(),
                target: graph.external_id(e.target).as_str_form(),
                length: e.length,
            });
        }

        Ok(SerializedGraph {
            graph_id: graph_id.to_string(),
            metadata: entry.metadata.clone(),
            nodes,
            edges,
        })
    }
}

/// Union-find over the graph's undirected projection (every edge treated
/// as bidirectional regardless of `Graph::is_directed`), producing a
/// component id per internal node index.
fn weakly_connected_components(graph: &Graph) -> Vec<usize> {
    let n = graph.node_count();
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut [usize], x: usize) -> usize {
        if parent[x] != x {
            parent[x] = find(parent, parent[x]);
        }
        parent[x]
    }

    fn union(parent: &mut [usize], a: usize, b: usize) {
        let ra = find(parent, a);
        let rb = find(parent, b);
        if ra != rb {
            parent[ra] = rb;
        }
    }

    for e in graph.edges() {
        union(&mut parent, e.source.0, e.target.0);
    }

    (0..n).map(|i| find(&mut parent, i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::{GraphBuilder, Node};

    fn disconnected() -> Graph {
        // two disconnected components: {A,B}, {C,D}.
        let mut b = GraphBuilder::new(false);
        b.add_node(Node::new("A", 0.0, 0.0)).unwrap();
        b.add_node(Node::new("B", 0.0, 1.0)).unwrap();
        b.add_node(Node::new("C", 10.0, 10.0)).unwrap();
        b.add_node(Node::new("D", 10.0, 11.0)).unwrap();
        b.add_edge(&"A".into(), &"B".into(), 1.0).unwrap();
        b.add_edge(&"C".into(), &"D".into(), 1.0).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn reachability_false_across_components() {
        let mut mgr = GraphManager::new();
        mgr.register("g3", disconnected(), "G3", "two disjoint components");
        let reachable = mgr.reachable("g3", &"A".into(), &"C".into()).unwrap();
        assert!(!reachable);
        let reachable_same = mgr.reachable("g3", &"A".into(), &"B".into()).unwrap();
        assert!(reachable_same);
    }

    #[test]
    fn find_node_normalizes_case_and_numeric_strings() {
        let mut b = GraphBuilder::new(false);
        b.add_node(Node::new(42, 1.0, 2.0)).unwrap();
        b.add_node(Node::new("Downtown", 3.0, 4.0)).unwrap();
        let graph = b.build().unwrap();
        let mut mgr = GraphManager::new();
        mgr.register("city", graph, "City", "");

        assert_eq!(mgr.find_node("city", "42").unwrap(), Some(NodeId::Int(42)));
        assert_eq!(
            mgr.find_node("city", "downtown").unwrap(),
            Some(NodeId::Str("Downtown".to_string()))
        );
        assert_eq!(mgr.find_node("city", "nowhere").unwrap(), None);
    }

    #[test]
    fn serialize_collapses_parallel_edges() {
        let mut b = GraphBuilder::new(true);
        b.add_node(Node::new(1, 0.0, 0.0)).unwrap();
        b.add_node(Node::new(2, 0.0, 0.0)).unwrap();
        b.add_edge(&1.into(), &2.into(), 5.0).unwrap();
        b.add_edge(&1.into(), &2.into(), 7.0).unwrap();
        let graph = b.build().unwrap();
        let mut mgr = GraphManager::new();
        mgr.register("g", graph, "G", "");
        let serialized = mgr.serialize("g").unwrap();
        assert_eq!(serialized.edges.len(), 1);
    }
}
