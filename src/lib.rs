//! Grafana Provisioner
//!
//! A tenant provisioning gateway for Grafana:
//! - creates per-tenant organizations with a default user
//! - enables plugins and creates datasources under an org's scope
//! - sets an organization's home dashboard
//!
//! Every tenant-scoped operation is gated on a delegated-authorization
//! check of the caller's access key against the target account's parent,
//! memoized in a TTL cache to bound load on the provision authority.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use infrastructure::authz::AccountAuthorizer;
use infrastructure::cache::{InMemoryCache, InMemoryCacheConfig};
use infrastructure::grafana::{GrafanaClient, GrafanaClientConfig, GrafanaProvisioner};
use infrastructure::provision::{ProvisionClient, ProvisionClientConfig};

/// Create the application state with all services initialized
pub fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default())
}

/// Create the application state with custom configuration
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let cache = Arc::new(InMemoryCache::with_config(
        InMemoryCacheConfig::default()
            .with_max_capacity(config.authz_cache.max_capacity)
            .with_purge_after(Duration::from_secs(config.authz_cache.purge_after_secs)),
    ));

    let authority = ProvisionClient::new(&ProvisionClientConfig {
        location: config.provision.location.clone(),
        timeout: Duration::from_secs(config.provision.timeout_secs),
    })?;

    let authorizer = AccountAuthorizer::with_verdict_ttl(
        authority,
        cache,
        Duration::from_secs(config.authz_cache.verdict_ttl_secs),
    );

    let transport = GrafanaClient::new(&GrafanaClientConfig {
        location: config.grafana.location.clone(),
        admin_user: config.grafana.admin_user.clone(),
        admin_password: config.grafana.admin_password.clone(),
        timeout: Duration::from_secs(config.grafana.timeout_secs),
    })?;

    let provisioner = GrafanaProvisioner::new(transport);

    Ok(AppState::new(Arc::new(authorizer), Arc::new(provisioner)))
}
