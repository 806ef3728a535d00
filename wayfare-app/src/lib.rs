//! Session layer and graph catalogue built on top of `wayfare-core`. No
//! HTTP transport lives here -- `app::WayfareApp` is the boundary a
//! transport would wrap, not a transport itself.

pub mod app;
pub mod demo_graph;
pub mod session;

pub use app::WayfareApp;
