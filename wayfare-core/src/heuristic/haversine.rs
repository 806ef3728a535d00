//! Great-circle distance heuristic, generalized from a pair of
//! coordinates into a [`super::Heuristic`] closed over a graph and a
//! goal node (`builder(graph, goal_node_id) -> h`).

use super::Heuristic;
use crate::model::{Graph, NodeId};
use geo::Coord;
use std::sync::Arc;

/// Mean earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance between two WGS84 coordinates, in meters.
pub fn haversine_distance_meters(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.x - a.x).to_radians();

    let sin_lat = (d_lat / 2.0).sin();
    let sin_lon = (d_lon / 2.0).sin();
    let h = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lon * sin_lon;
    let c = 2.0 * h.sqrt().asin();
    EARTH_RADIUS_METERS * c
}

pub struct GreatCircleHeuristic {
    graph: Arc<Graph>,
    goal_coord: Coord<f64>,
}

impl GreatCircleHeuristic {
    /// Builds an estimator for `graph` closed over `goal`. Building
    /// never fails on an unresolvable node -- an unknown goal
    /// simply yields a heuristic that returns `0.0` everywhere (never
    /// worse than UCS), since the registry/session layer is responsible
    /// for having already resolved the node before construction.
    pub fn build(graph: Arc<Graph>, goal: &NodeId) -> Self {
        let goal_coord = graph.coordinate_of(goal).unwrap_or(Coord { x: 0.0, y: 0.0 });
        GreatCircleHeuristic { graph, goal_coord }
    }
}

impl Heuristic for GreatCircleHeuristic {
    fn estimate(&self, from: &NodeId) -> f64 {
        match self.graph.coordinate_of(from) {
            Some(coord) => haversine_distance_meters(coord, self.goal_coord),
            None => 0.0,
        }
    }
}
