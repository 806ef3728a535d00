//! Search primitives, algorithms, and graph model for the wayfare
//! pathfinding engine. This crate has no notion of sessions, HTTP, or
//! concurrency beyond the [`algorithm::search::Cancellation`] polling
//! hook -- that scaffolding lives in `wayfare-app`, which embeds this
//! crate as its kernel.

pub mod algorithm;
pub mod heuristic;
pub mod model;
pub mod registry;
pub mod util;
