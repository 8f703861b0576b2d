//! Provision authority integration

mod client;

pub use client::{ProvisionAuthority, ProvisionClient, ProvisionClientConfig};
