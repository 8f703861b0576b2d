//! Infrastructure layer - External service implementations

pub mod authz;
pub mod cache;
pub mod grafana;
pub mod logging;
pub mod provision;
