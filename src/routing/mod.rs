pub mod coordinator;
pub mod engine;

pub use coordinator::{RouteCoordinator, RouteState};
pub use engine::{engine_from_config, RoutingEngine};
