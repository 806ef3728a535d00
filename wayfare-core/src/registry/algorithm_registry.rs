//! The algorithm registry: a static manifest of the algorithms a
//! session can ask for by name, implemented as a plain lookup table
//! rather than the `inventory` crate -- the set of algorithms is fixed
//! at compile time and known in full, so a linker-collected registry
//! buys nothing a static manifest doesn't already give us.

use itertools::Itertools;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::RegistryError;

/// Whether an algorithm is a one-shot `run_named` call or a stateful
/// planner the session layer must hold across calls (only D*-Lite, so
/// far).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    OneShot,
    Stateful,
}

#[derive(Debug, Clone)]
pub struct AlgorithmDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub requires_heuristic: bool,
    pub kind: AlgorithmKind,
}

fn descriptors() -> &'static [AlgorithmDescriptor] {
    static DESCRIPTORS: OnceLock<Vec<AlgorithmDescriptor>> = OnceLock::new();
    DESCRIPTORS.get_or_init(|| {
        vec![
            AlgorithmDescriptor {
                name: "bfs_tree",
                display_name: "Breadth-First Search (tree)",
                description: "Explores level by level with no reached set; may revisit states.",
                requires_heuristic: false,
                kind: AlgorithmKind::OneShot,
            },
            AlgorithmDescriptor {
                name: "bfs_graph",
                display_name: "Breadth-First Search (graph)",
                description: "Breadth-first with a reached set; minimizes hop count, not cost.",
                requires_heuristic: false,
                kind: AlgorithmKind::OneShot,
            },
            AlgorithmDescriptor {
                name: "dfs_tree",
                display_name: "Depth-First Search (tree)",
                description: "Depth-first with no reached set; completeness only, no optimality.",
                requires_heuristic: false,
                kind: AlgorithmKind::OneShot,
            },
            AlgorithmDescriptor {
                name: "dfs_graph",
                display_name: "Depth-First Search (graph)",
                description: "Depth-first with an expanded set to guarantee termination on cycles.",
                requires_heuristic: false,
                kind: AlgorithmKind::OneShot,
            },
            AlgorithmDescriptor {
                name: "ucs",
                display_name: "Uniform-Cost Search",
                description: "Best-first by path cost; optimal for non-negative edge weights.",
                requires_heuristic: false,
                kind: AlgorithmKind::OneShot,
            },
            AlgorithmDescriptor {
                name: "astar",
                display_name: "A*",
                description: "Best-first by path cost plus a heuristic estimate to the goal.",
                requires_heuristic: true,
                kind: AlgorithmKind::OneShot,
            },
            AlgorithmDescriptor {
                name: "bidirectional",
                display_name: "Bidirectional UCS",
                description: "Two uniform-cost frontiers grown from start and goal, meeting in the middle.",
                requires_heuristic: false,
                kind: AlgorithmKind::OneShot,
            },
            AlgorithmDescriptor {
                name: "dstar_lite",
                display_name: "D*-Lite",
                description: "Incremental replanner; holds state across edge-cost updates within a session.",
                requires_heuristic: true,
                kind: AlgorithmKind::Stateful,
            },
        ]
    })
}

/// A read-only view over the built-in algorithms. There is no
/// registration API by design: the manifest is fixed at compile
/// time, so "lookup" is the only operation a session needs.
pub struct AlgorithmRegistry;

impl AlgorithmRegistry {
    pub fn get(name: &str) -> Result<&'static AlgorithmDescriptor, RegistryError> {
        descriptors().iter().find(|d| d.name == name).ok_or_else(|| {
            let known = descriptors().iter().map(|d| d.name).join(", ");
            RegistryError::UnknownAlgorithm(name.to_string(), known)
        })
    }

    pub fn list() -> &'static [AlgorithmDescriptor] {
        descriptors()
    }

    pub fn as_map() -> HashMap<&'static str, &'static AlgorithmDescriptor> {
        descriptors().iter().map(|d| (d.name, d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_all_eight_builtin_algorithms() {
        assert_eq!(AlgorithmRegistry::list().len(), 8);
    }

    #[test]
    fn astar_and_dstar_lite_require_a_heuristic() {
        assert!(AlgorithmRegistry::get("astar").unwrap().requires_heuristic);
        assert!(AlgorithmRegistry::get("dstar_lite").unwrap().requires_heuristic);
        assert!(!AlgorithmRegistry::get("ucs").unwrap().requires_heuristic);
    }

    #[test]
    fn unknown_algorithm_name_is_an_error() {
        assert!(matches!(
            AlgorithmRegistry::get("dijkstra"),
            Err(RegistryError::UnknownAlgorithm(_, _))
        ));
    }
}
