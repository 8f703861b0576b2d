//! Tenant-scoped Grafana provisioning endpoints

pub mod datasources;
pub mod orgs;
pub mod plugins;
pub mod preferences;

use axum::{
    Router,
    routing::{post, put},
};

use super::state::AppState;

/// Create the Grafana provisioning router. Every route is gated on a
/// delegated-authorization check for its `org_name`.
pub fn create_grafana_router() -> Router<AppState> {
    Router::new()
        .route("/orgs/{org_name}", post(orgs::create_org))
        .route(
            "/orgs/{org_name}/plugins/{plugin}",
            post(plugins::enable_plugin),
        )
        .route(
            "/orgs/{org_name}/datasources",
            post(datasources::create_datasource),
        )
        .route(
            "/orgs/{org_name}/home-dashboard/{uid}",
            put(preferences::set_home_dashboard),
        )
}
