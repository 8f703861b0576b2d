//! Plugin enablement endpoint

use axum::Json;
use axum::extract::{Path, State};
use serde_json::Value;
use tracing::info;

use crate::api::middleware::RequireOrgAccess;
use crate::api::state::AppState;
use crate::api::types::ApiError;

/// Enables a plugin for an organization. The settings body is passed
/// through to Grafana unchanged.
pub async fn enable_plugin(
    _access: RequireOrgAccess,
    State(state): State<AppState>,
    Path((org_name, plugin)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    info!(%org_name, %plugin, "enabling plugin");

    let result = state.grafana.enable_plugin(&org_name, &plugin, &body).await?;
    Ok(Json(result))
}
