//! Delegated account authorization

mod service;

pub use service::{AccountAuthorizer, VERDICT_TTL};
