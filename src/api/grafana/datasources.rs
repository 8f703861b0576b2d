//! Datasource creation endpoint

use axum::Json;
use axum::extract::{Path, State};
use serde_json::Value;
use tracing::info;

use crate::api::middleware::RequireOrgAccess;
use crate::api::state::AppState;
use crate::api::types::ApiError;

/// Creates a datasource under an organization. The datasource definition
/// is passed through to Grafana unchanged.
pub async fn create_datasource(
    _access: RequireOrgAccess,
    State(state): State<AppState>,
    Path(org_name): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    info!(%org_name, "creating datasource");

    let result = state.grafana.create_datasource(&org_name, &body).await?;
    Ok(Json(result))
}
