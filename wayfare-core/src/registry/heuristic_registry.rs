//! The heuristic registry: built-in heuristics a session can ask
//! for by name when starting an A* or D*-Lite search. The only built-in
//! is the great-circle estimator; the registry exists as a seam for a
//! future second heuristic, not because one is needed today.

use itertools::Itertools;
use std::sync::{Arc, OnceLock};

use super::RegistryError;
use crate::heuristic::haversine::GreatCircleHeuristic;
use crate::heuristic::Heuristic;
use crate::model::{Graph, NodeId};

pub struct HeuristicDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub build: fn(Arc<Graph>, &NodeId) -> Arc<dyn Heuristic>,
}

fn descriptors() -> &'static [HeuristicDescriptor] {
    static DESCRIPTORS: OnceLock<Vec<HeuristicDescriptor>> = OnceLock::new();
    DESCRIPTORS.get_or_init(|| {
        vec![HeuristicDescriptor {
            name: "euclidean",
            display_name: "Great-circle distance",
            description: "Haversine distance to the goal, in meters. Admissible when edge length is also meters.",
            build: |graph, goal| Arc::new(GreatCircleHeuristic::build(graph, goal)),
        }]
    })
}

pub struct HeuristicRegistry;

impl HeuristicRegistry {
    pub fn get(name: &str) -> Result<&'static HeuristicDescriptor, RegistryError> {
        descriptors().iter().find(|d| d.name == name).ok_or_else(|| {
            let known = descriptors().iter().map(|d| d.name).join(", ");
            RegistryError::UnknownHeuristic(name.to_string(), known)
        })
    }

    pub fn list() -> &'static [HeuristicDescriptor] {
        descriptors()
    }

    /// Looks up `name` and builds it closed over `graph`/`goal` in one
    /// call -- the shape the session layer actually wants when honoring
    /// a request's `heuristic` field.
    pub fn build(name: &str, graph: Arc<Graph>, goal: &NodeId) -> Result<Arc<dyn Heuristic>, RegistryError> {
        let descriptor = Self::get(name)?;
        Ok((descriptor.build)(graph, goal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphBuilder, Node};

    #[test]
    fn euclidean_is_registered() {
        assert!(HeuristicRegistry::get("euclidean").is_ok());
    }

    #[test]
    fn build_produces_a_working_heuristic() {
        let mut b = GraphBuilder::new(false);
        b.add_node(Node::new("A", 0.0, 0.0)).unwrap();
        b.add_node(Node::new("B", 0.0, 1.0)).unwrap();
        let graph = Arc::new(b.build().unwrap());
        let h = HeuristicRegistry::build("euclidean", graph, &"B".into()).unwrap();
        assert_eq!(h.estimate(&"B".into()), 0.0);
        assert!(h.estimate(&"A".into()) > 0.0);
    }

    #[test]
    fn unknown_heuristic_name_is_an_error() {
        assert!(matches!(
            HeuristicRegistry::get("manhattan"),
            Err(RegistryError::UnknownHeuristic(_, _))
        ));
    }
}
