//! The session layer: in-process, transport-free. A caller creates
//! a session for a `(graph, algorithm, heuristic, start, goal)` request,
//! polls it by offset for trace events and eventual outcome, and may
//! cancel it. No HTTP, no serialization to a wire format beyond what
//! [`wire`] already expresses as plain Rust types.

pub mod error;
pub mod manager;
pub mod request;
pub mod session;
pub mod termination;
pub mod wire;

pub use error::SessionError;
pub use manager::SessionManager;
pub use request::SearchRequest;
pub use termination::TerminationPolicy;
pub use wire::{CreateSessionResponse, HealthResponse, PollResponse, SessionStatus};
