//! A small built-in road-like graph so the CLI binary has something to
//! search without requiring a loader this crate doesn't have -- graph
//! ingestion is out of scope; only [`wayfare_core::model::GraphBuilder`]
//! exists for constructing one in process.

use wayfare_core::model::{Graph, GraphBuilder, Node};

/// Eight intersections loosely arranged around downtown Denver, with a
/// direct freeway edge and a slower surface-street detour, so `astar`
/// and `ucs` disagree about which frontier to expand first but agree on
/// the optimal route.
pub fn denver_sample() -> Graph {
    let mut b = GraphBuilder::new(false);
    let nodes = [
        ("union_station", 39.7539, -105.0020),
        ("ballpark", 39.7559, -104.9942),
        ("capitol_hill", 39.7348, -104.9775),
        ("cherry_creek", 39.7167, -104.9542),
        ("five_points", 39.7594, -104.9739),
        ("highlands", 39.7647, -105.0309),
        ("sloans_lake", 39.7423, -105.0456),
        ("dia", 39.8561, -104.6737),
    ];
    for (id, lat, lon) in nodes {
        b.add_node(Node::new(id, lat, lon)).unwrap();
    }

    b.add_edge(&"union_station".into(), &"ballpark".into(), 1.2).unwrap();
    b.add_edge(&"union_station".into(), &"highlands".into(), 2.6).unwrap();
    b.add_edge(&"union_station".into(), &"five_points".into(), 1.8).unwrap();
    b.add_edge(&"ballpark".into(), &"five_points".into(), 1.1).unwrap();
    b.add_edge(&"ballpark".into(), &"capitol_hill".into(), 2.4).unwrap();
    b.add_edge(&"five_points".into(), &"capitol_hill".into(), 2.0).unwrap();
    b.add_edge(&"capitol_hill".into(), &"cherry_creek".into(), 2.2).unwrap();
    b.add_edge(&"highlands".into(), &"sloans_lake".into(), 1.9).unwrap();
    b.add_edge(&"sloans_lake".into(), &"union_station".into(), 3.1).unwrap();
    b.add_edge(&"cherry_creek".into(), &"dia".into(), 21.0).unwrap();
    b.add_edge(&"five_points".into(), &"dia".into(), 23.5).unwrap();

    b.build().expect("demo graph is internally consistent")
}
