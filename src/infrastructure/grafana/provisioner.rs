//! Org provisioning workflow and single-shot Grafana operations

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use super::password;
use super::transport::{CommandResponse, GrafanaTransport};
use crate::domain::{
    CreateOrgResponse, CreateUserResponse, Dashboard, DomainError, MessageResponse, NewOrg, Org,
    OrgPreferences, OrgRole, OrgUserRole, ProvisionStep, ProvisioningResult, User,
};

/// Grafana's built-in default organization. Newly created global users
/// are implicitly members of it and must be unbound before they are
/// bound to their tenant org.
const DEFAULT_ORG_ID: i64 = 1;

/// Composes the transport into the tenant provisioning operations.
///
/// The org-creation workflow is ordered and non-atomic: a failing step
/// aborts the rest and leaves earlier remote resources in place. There
/// is deliberately no compensation; the authoritative lifecycle of orgs
/// and users lives in Grafana.
#[derive(Debug)]
pub struct GrafanaProvisioner<T: GrafanaTransport> {
    transport: T,
}

impl<T: GrafanaTransport> GrafanaProvisioner<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Creates an organization and its default user.
    ///
    /// Steps, in fixed order, each depending on the previous response:
    /// 1. create the organization;
    /// 2. create a global user named and logged-in as the org, with a
    ///    generated password;
    /// 3. remove that user from the default organization;
    /// 4. add the user to the new organization as Viewer.
    pub async fn create_organization(
        &self,
        org_name: &str,
    ) -> Result<ProvisioningResult, DomainError> {
        let org = NewOrg::named(org_name);
        let response = self
            .command_json(Method::POST, "/api/orgs", None, &org)
            .await?;
        let created_org: CreateOrgResponse =
            decode_step(ProvisionStep::OrgCreate, &response)?;

        let user = User {
            name: org_name.to_string(),
            email: String::new(),
            login: org_name.to_string(),
            password: password::generate(),
        };
        let response = self
            .command_json(Method::POST, "/api/admin/users", None, &user)
            .await?;
        let created_user: CreateUserResponse =
            decode_step(ProvisionStep::UserCreate, &response)?;

        // Viewer is required by the delete contract's payload shape; the
        // role value carries no meaning for a removal.
        let role = OrgUserRole {
            login_or_email: org_name.to_string(),
            role: OrgRole::Viewer,
        };

        let response = self
            .command_json(
                Method::DELETE,
                &format!("/api/orgs/{}/users/{}", DEFAULT_ORG_ID, created_user.id),
                None,
                &role,
            )
            .await?;
        let _: MessageResponse = decode_step(ProvisionStep::UserUnbind, &response)?;

        let response = self
            .command_json(
                Method::POST,
                &format!("/api/orgs/{}/users", created_org.org_id),
                None,
                &role,
            )
            .await?;
        let _: MessageResponse = decode_step(ProvisionStep::UserBind, &response)?;

        info!(org_name, org_id = created_org.org_id, "organization provisioned");

        Ok(ProvisioningResult {
            org: created_org,
            user,
        })
    }

    /// Enables a plugin for an organization, passing the settings body
    /// through to Grafana.
    pub async fn enable_plugin(
        &self,
        org_name: &str,
        plugin: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let org = self.org_by_name(org_name).await?;

        let response = self
            .command_json(
                Method::POST,
                &format!("/api/plugins/{}/settings", plugin),
                Some(org.id),
                body,
            )
            .await?;

        decode_operation("plugin_enable", &response)
    }

    /// Creates a datasource under an organization, passing the datasource
    /// definition through to Grafana.
    pub async fn create_datasource(
        &self,
        org_name: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let org = self.org_by_name(org_name).await?;

        let response = self
            .command_json(Method::POST, "/api/datasources", Some(org.id), body)
            .await?;

        decode_operation("datasource_create", &response)
    }

    /// Points an organization's home dashboard at the dashboard with the
    /// given UID, leaving the theme untouched and the timezone on the
    /// browser's.
    pub async fn set_home_dashboard(
        &self,
        org_name: &str,
        uid: &str,
    ) -> Result<MessageResponse, DomainError> {
        let org = self.org_by_name(org_name).await?;

        let response = self
            .transport
            .execute(
                Method::GET,
                &format!("/api/dashboards/uid/{}", uid),
                Some(org.id),
                None,
            )
            .await?;
        let dashboard: Dashboard = decode_operation("dashboard_lookup", &response)?;

        let preferences = OrgPreferences {
            theme: String::new(),
            home_dashboard_id: dashboard.dashboard.id,
            timezone: "browser".to_string(),
        };

        let response = self
            .command_json(
                Method::PUT,
                "/api/org/preferences",
                Some(org.id),
                &preferences,
            )
            .await?;

        decode_operation("preferences_update", &response)
    }

    /// Resolves an organization record from its tenant-facing name.
    async fn org_by_name(&self, org_name: &str) -> Result<Org, DomainError> {
        let response = self
            .transport
            .execute(
                Method::GET,
                &format!("/api/orgs/name/{}", org_name),
                None,
                None,
            )
            .await?;

        decode_operation("org_lookup", &response)
    }

    async fn command_json<P: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        org_id: Option<i64>,
        payload: &P,
    ) -> Result<CommandResponse, DomainError> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| DomainError::decode(e.to_string(), String::new()))?;

        self.transport.execute(method, path, org_id, Some(body)).await
    }
}

/// Decodes a workflow step's response, tagging non-success and
/// undecodable responses with the failing step.
fn decode_step<R: DeserializeOwned>(
    step: ProvisionStep,
    response: &CommandResponse,
) -> Result<R, DomainError> {
    if !response.is_success() {
        return Err(DomainError::provision(
            step,
            response.status,
            response.body_string(),
        ));
    }

    serde_json::from_slice(&response.body)
        .map_err(|e| DomainError::decode(e.to_string(), response.body_string()))
}

/// Decodes a single-shot operation's response, preserving the remote
/// status and body on non-success.
fn decode_operation<R: DeserializeOwned>(
    operation: &str,
    response: &CommandResponse,
) -> Result<R, DomainError> {
    if !response.is_success() {
        return Err(DomainError::status(
            operation,
            response.status,
            response.body_string(),
        ));
    }

    serde_json::from_slice(&response.body)
        .map_err(|e| DomainError::decode(e.to_string(), response.body_string()))
}
