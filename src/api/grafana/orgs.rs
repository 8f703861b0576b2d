//! Organization provisioning endpoint

use axum::Json;
use axum::extract::{Path, State};
use tracing::info;

use crate::api::middleware::RequireOrgAccess;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::ProvisioningResult;

/// Creates a Grafana organization and its default user.
///
/// The response echoes the generated bootstrap password; partially
/// completed workflows leave their remote resources in place and report
/// the failing step's status.
pub async fn create_org(
    _access: RequireOrgAccess,
    State(state): State<AppState>,
    Path(org_name): Path<String>,
) -> Result<Json<ProvisioningResult>, ApiError> {
    info!(%org_name, "provisioning organization");

    let result = state.grafana.create_organization(&org_name).await?;
    Ok(Json(result))
}
