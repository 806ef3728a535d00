//! Road network topology represented as an adjacency list.
//!
//! `NodeId` values are the caller-facing identifiers (numeric, OSM-style, or
//! case-sensitive strings for city-level graphs); internally, a `Graph`
//! assigns each a dense `usize` index so that adjacency lookups are O(1)
//! array accesses rather than hash lookups. The mapping between the two is
//! the `index` map, built once at construction time and never mutated.

use super::graph_error::GraphError;
use geo::Coord;
use indexmap::IndexMap;

/// A caller-facing node identifier. Graphs built from OSM extracts use
/// integer ids; city-level graphs built by hand use strings. Equality and
/// hashing are exact and do not cross types -- `NodeId::Int(5)` is not
/// `NodeId::Str("5".into())`. Cross-type lookup is the job of
/// [`super::graph_manager::GraphManager::find_node`], not of this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display, derive_more::From)]
pub enum NodeId {
    #[display("{_0}")]
    Int(i64),
    #[display("{_0}")]
    Str(String),
}

impl NodeId {
    pub fn as_str_form(&self) -> String {
        match self {
            NodeId::Int(i) => i.to_string(),
            NodeId::Str(s) => s.clone(),
        }
    }
}

impl From<&str> for NodeId {
    fn from(v: &str) -> Self {
        NodeId::Str(v.to_string())
    }
}

impl serde::Serialize for NodeId {
    /// Transport coercion: every `NodeId` is emitted as a string,
    /// per the graph manager's serialization contract.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.as_str_form())
    }
}

/// An internal, dense index into `Graph::nodes` / `Graph::adj`. Never
/// exposed across the graph manager boundary -- callers only ever see
/// `NodeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Internal(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, derive_more::Display)]
pub struct EdgeId(pub usize);

/// A graph node: a caller-facing id plus its geographic coordinate.
/// Coordinate convention follows `geo`: `x` is longitude, `y` is latitude.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub coordinate: Coord<f64>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, lat: f64, lon: f64) -> Self {
        Node {
            id: id.into(),
            coordinate: Coord { x: lon, y: lat },
        }
    }

    pub fn lat(&self) -> f64 {
        self.coordinate.y
    }

    pub fn lon(&self) -> f64 {
        self.coordinate.x
    }
}

/// A graph edge. `source`/`target` are internal dense indices, not
/// `NodeId`s -- `Graph` is the only thing that should construct one.
#[derive(Debug, Clone)]
pub struct Edge {
    pub edge_id: EdgeId,
    pub source: Internal,
    pub target: Internal,
    pub length: f64,
}

/// One entry in a node's adjacency list: the edge taken and the node
/// reached by taking it. For undirected graphs this entry may represent
/// traversing an edge against its stored `source -> target` orientation.
#[derive(Debug, Clone, Copy)]
pub struct AdjacentEdge {
    pub edge_id: EdgeId,
    pub length: f64,
    pub to: Internal,
}

#[derive(Debug)]
pub struct Graph {
    directed: bool,
    nodes: Vec<Node>,
    index: IndexMap<NodeId, usize>,
    edges: Vec<Edge>,
    /// Outgoing adjacency, one entry per internal node index. Order is the
    /// order edges were added to the builder -- stable and shared across
    /// invocations within one process, per the graph adapter's ordering
    /// contract.
    adj: Vec<Vec<AdjacentEdge>>,
}

impl Graph {
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter().map(|n| &n.id)
    }

    pub fn internal_index(&self, id: &NodeId) -> Option<Internal> {
        self.index.get(id).map(|i| Internal(*i))
    }

    pub fn node_at(&self, idx: Internal) -> &Node {
        &self.nodes[idx.0]
    }

    pub fn external_id(&self, idx: Internal) -> &NodeId {
        &self.nodes[idx.0].id
    }

    pub fn coordinate_of(&self, id: &NodeId) -> Option<Coord<f64>> {
        self.internal_index(id).map(|i| self.node_at(i).coordinate)
    }

    /// Outgoing edges for a node, in the graph's stable adjacency order.
    /// One `AdjacentEdge` per parallel edge -- callers that need a single
    /// cost for an ordered pair should take `.next()`, which is the first
    /// in this deterministic order.
    pub fn outgoing(&self, idx: Internal) -> &[AdjacentEdge] {
        &self.adj[idx.0]
    }
}

pub struct GraphBuilder {
    directed: bool,
    nodes: Vec<Node>,
    index: IndexMap<NodeId, usize>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    pub fn new(directed: bool) -> Self {
        GraphBuilder {
            directed,
            nodes: Vec::new(),
            index: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    pub fn add_node(&mut self, node: Node) -> Result<&mut Self, GraphError> {
        if self.index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(self)
    }

    pub fn add_edge(
        &mut self,
        source: &NodeId,
        target: &NodeId,
        length: f64,
    ) -> Result<&mut Self, GraphError> {
        if length < 0.0 {
            return Err(GraphError::NegativeEdgeLength(length));
        }
        let src = *self
            .index
            .get(source)
            .ok_or_else(|| GraphError::UnknownNode(source.clone()))?;
        let dst = *self
            .index
            .get(target)
            .ok_or_else(|| GraphError::UnknownNode(target.clone()))?;
        let edge_id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            edge_id,
            source: Internal(src),
            target: Internal(dst),
            length,
        });
        Ok(self)
    }

    pub fn build(self) -> Result<Graph, GraphError> {
        if self.nodes.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        let mut adj: Vec<Vec<AdjacentEdge>> = vec![Vec::new(); self.nodes.len()];
        for e in &self.edges {
            adj[e.source.0].push(AdjacentEdge {
                edge_id: e.edge_id,
                length: e.length,
                to: e.target,
            });
            if !self.directed && e.source != e.target {
                adj[e.target.0].push(AdjacentEdge {
                    edge_id: e.edge_id,
                    length: e.length,
                    to: e.source,
                });
            }
        }
        Ok(Graph {
            directed: self.directed,
            nodes: self.nodes,
            index: self.index,
            edges: self.edges,
            adj,
        })
    }
}

/// A direction-aware view over a graph's adjacency, used by bidirectional
/// search. For undirected graphs the backward view is the forward graph
/// itself -- no copy. For directed graphs the reverse adjacency is
/// computed once per search and owned by the view; the original graph is
/// never mutated.
pub enum GraphView<'g> {
    Forward(&'g Graph),
    Reversed {
        graph: &'g Graph,
        rev_adj: Vec<Vec<AdjacentEdge>>,
    },
}

impl<'g> GraphView<'g> {
    pub fn forward(graph: &'g Graph) -> Self {
        GraphView::Forward(graph)
    }

    pub fn backward(graph: &'g Graph) -> Self {
        if !graph.is_directed() {
            return GraphView::Forward(graph);
        }
        let mut rev_adj: Vec<Vec<AdjacentEdge>> = vec![Vec::new(); graph.nodes.len()];
        for e in &graph.edges {
            rev_adj[e.target.0].push(AdjacentEdge {
                edge_id: e.edge_id,
                length: e.length,
                to: e.source,
            });
        }
        GraphView::Reversed { graph, rev_adj }
    }

    pub fn graph(&self) -> &'g Graph {
        match self {
            GraphView::Forward(g) => g,
            GraphView::Reversed { graph, .. } => graph,
        }
    }

    pub fn outgoing(&self, idx: Internal) -> &[AdjacentEdge] {
        match self {
            GraphView::Forward(g) => g.outgoing(idx),
            GraphView::Reversed { rev_adj, .. } => &rev_adj[idx.0],
        }
    }
}
