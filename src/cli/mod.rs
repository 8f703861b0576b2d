//! CLI for the provisioning gateway

pub mod serve;

use clap::{Parser, Subcommand};

/// Grafana Provisioner - tenant provisioning gateway for Grafana
#[derive(Parser)]
#[command(name = "grafana-provisioner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the provisioning API server
    Serve,
}
