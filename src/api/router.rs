use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::grafana;
use super::health;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints (no auth)
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        // Tenant provisioning API (access-key gated per org)
        .nest("/grafana", grafana::create_grafana_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
