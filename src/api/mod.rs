//! HTTP API layer

pub mod grafana;
pub mod health;
pub mod middleware;
pub mod router;
pub mod state;
pub mod types;

pub use router::create_router_with_state;
