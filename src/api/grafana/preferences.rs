//! Home dashboard preference endpoint

use axum::Json;
use axum::extract::{Path, State};
use tracing::info;

use crate::api::middleware::RequireOrgAccess;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::MessageResponse;

/// Points an organization's home dashboard at the dashboard with the
/// given UID.
pub async fn set_home_dashboard(
    _access: RequireOrgAccess,
    State(state): State<AppState>,
    Path((org_name, uid)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    info!(%org_name, %uid, "setting home dashboard");

    let result = state.grafana.set_home_dashboard(&org_name, &uid).await?;
    Ok(Json(result))
}
