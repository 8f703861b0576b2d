//! Grafana integration: transport, provisioning workflow, passwords

pub mod password;
mod provisioner;
mod transport;

pub use provisioner::GrafanaProvisioner;
pub use transport::{CommandResponse, GrafanaClient, GrafanaClientConfig, GrafanaTransport, ORG_ID_HEADER};
