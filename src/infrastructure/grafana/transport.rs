//! Authenticated verb/path transport for the Grafana API

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::domain::DomainError;

/// Header instructing Grafana which organization a call applies to.
pub const ORG_ID_HEADER: &str = "X-Grafana-Org-Id";

/// Status code and raw body of an executed command.
///
/// Non-success statuses are values, not errors: callers decide what a
/// 409 from org creation means. Only transport failures are `Err`.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    pub status: u16,
    pub body: Bytes,
}

impl CommandResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Single capability every Grafana call goes through: execute a verb at
/// a path with an optional org scope and payload.
#[async_trait]
pub trait GrafanaTransport: Send + Sync + std::fmt::Debug {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        org_id: Option<i64>,
        payload: Option<Vec<u8>>,
    ) -> Result<CommandResponse, DomainError>;
}

/// Configuration for the Grafana client
#[derive(Debug, Clone)]
pub struct GrafanaClientConfig {
    /// Base URL of the Grafana instance, e.g. `http://localhost:3000`
    pub location: String,
    /// Administrative basic-auth identity
    pub admin_user: String,
    pub admin_password: String,
    /// Per-request timeout
    pub timeout: Duration,
}

/// reqwest-backed Grafana client authenticating as the admin identity
#[derive(Debug, Clone)]
pub struct GrafanaClient {
    client: reqwest::Client,
    base_url: String,
    admin_user: String,
    admin_password: String,
}

impl GrafanaClient {
    pub fn new(config: &GrafanaClientConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("failed to build Grafana client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.location.trim_end_matches('/').to_string(),
            admin_user: config.admin_user.clone(),
            admin_password: config.admin_password.clone(),
        })
    }
}

#[async_trait]
impl GrafanaTransport for GrafanaClient {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        org_id: Option<i64>,
        payload: Option<Vec<u8>>,
    ) -> Result<CommandResponse, DomainError> {
        debug!(%method, path, ?org_id, "grafana command");

        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(CONTENT_TYPE, "application/json")
            .basic_auth(&self.admin_user, Some(&self.admin_password));

        if let Some(org_id) = org_id.filter(|id| *id > 0) {
            request = request.header(ORG_ID_HEADER, org_id.to_string());
        }

        if let Some(payload) = payload {
            request = request.body(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("grafana request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::transport(format!("grafana response read failed: {}", e)))?;

        Ok(CommandResponse { status, body })
    }
}
