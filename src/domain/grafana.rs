//! Grafana wire types used by the provisioning workflow

use serde::{Deserialize, Serialize};

/// Structured organization address. Grafana accepts and returns this on
/// org records; the default provisioning flow leaves it empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrgAddress {
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub zip_code: String,
    pub state: String,
    pub country: String,
}

/// Payload for creating an organization.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrg {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<OrgAddress>,
}

impl NewOrg {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
        }
    }
}

/// Organization record as returned by Grafana lookups. The id is assigned
/// by Grafana and scopes subsequent org-bound commands.
#[derive(Debug, Clone, Deserialize)]
pub struct Org {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<OrgAddress>,
}

/// Global Grafana user. The default flow sets name and login to the
/// organization name; the password is machine-generated and echoed back
/// to the caller as a bootstrap credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub login: String,
    pub password: String,
}

/// Privilege level of an org membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrgRole {
    Admin,
    Editor,
    Viewer,
}

/// Membership payload for binding (and unbinding) a user to an org.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgUserRole {
    pub login_or_email: String,
    pub role: OrgRole,
}

/// Org preferences payload. Timezone is pinned to "browser" by the
/// home-dashboard flow.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgPreferences {
    pub theme: String,
    pub home_dashboard_id: i64,
    pub timezone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardDetails {
    pub id: i64,
    pub uid: String,
    pub title: String,
    pub tags: Vec<String>,
    pub timezone: String,
    pub schema_version: i64,
    pub version: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardMeta {
    pub is_starred: bool,
    pub url: String,
    pub slug: String,
}

/// Dashboard lookup result: the dashboard body plus Grafana's metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Dashboard {
    pub dashboard: DashboardDetails,
    #[serde(default)]
    pub meta: DashboardMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrgResponse {
    pub message: String,
    pub org_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Caller-visible record of a successful org-creation workflow.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisioningResult {
    pub org: CreateOrgResponse,
    pub user: User,
}

/// Steps of the org provisioning workflow, in execution order. A failing
/// step tags the resulting error; later steps are never attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStep {
    OrgCreate,
    UserCreate,
    UserUnbind,
    UserBind,
}

impl ProvisionStep {
    /// Short machine-readable tag used in API error codes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OrgCreate => "org_create_failed",
            Self::UserCreate => "user_create_failed",
            Self::UserUnbind => "user_unbind_failed",
            Self::UserBind => "user_bind_failed",
        }
    }
}

impl std::fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrgCreate => write!(f, "org create"),
            Self::UserCreate => write!(f, "user create"),
            Self::UserUnbind => write!(f, "user unbind"),
            Self::UserBind => write!(f, "user bind"),
        }
    }
}
