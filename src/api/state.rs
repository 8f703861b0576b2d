//! Application state for shared services

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{AccessKey, DomainError, MessageResponse, ProvisioningResult};
use crate::infrastructure::authz::AccountAuthorizer;
use crate::infrastructure::grafana::{GrafanaProvisioner, GrafanaTransport};
use crate::infrastructure::provision::ProvisionAuthority;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub authorizer: Arc<dyn AuthorizerService>,
    pub grafana: Arc<dyn TenantProvisioningService>,
}

impl AppState {
    pub fn new(
        authorizer: Arc<dyn AuthorizerService>,
        grafana: Arc<dyn TenantProvisioningService>,
    ) -> Self {
        Self {
            authorizer,
            grafana,
        }
    }
}

/// Trait for the delegated-authorization gate
#[async_trait::async_trait]
pub trait AuthorizerService: Send + Sync {
    async fn authorize(
        &self,
        child_account_id: &str,
        key: &AccessKey,
    ) -> Result<bool, DomainError>;
}

/// Trait for tenant-facing Grafana operations
#[async_trait::async_trait]
pub trait TenantProvisioningService: Send + Sync {
    async fn create_organization(&self, org_name: &str)
    -> Result<ProvisioningResult, DomainError>;

    async fn enable_plugin(
        &self,
        org_name: &str,
        plugin: &str,
        body: &Value,
    ) -> Result<Value, DomainError>;

    async fn create_datasource(&self, org_name: &str, body: &Value)
    -> Result<Value, DomainError>;

    async fn set_home_dashboard(
        &self,
        org_name: &str,
        uid: &str,
    ) -> Result<MessageResponse, DomainError>;
}

#[async_trait::async_trait]
impl<P: ProvisionAuthority + 'static> AuthorizerService for AccountAuthorizer<P> {
    async fn authorize(
        &self,
        child_account_id: &str,
        key: &AccessKey,
    ) -> Result<bool, DomainError> {
        AccountAuthorizer::authorize(self, child_account_id, key).await
    }
}

#[async_trait::async_trait]
impl<T: GrafanaTransport + 'static> TenantProvisioningService for GrafanaProvisioner<T> {
    async fn create_organization(
        &self,
        org_name: &str,
    ) -> Result<ProvisioningResult, DomainError> {
        GrafanaProvisioner::create_organization(self, org_name).await
    }

    async fn enable_plugin(
        &self,
        org_name: &str,
        plugin: &str,
        body: &Value,
    ) -> Result<Value, DomainError> {
        GrafanaProvisioner::enable_plugin(self, org_name, plugin, body).await
    }

    async fn create_datasource(
        &self,
        org_name: &str,
        body: &Value,
    ) -> Result<Value, DomainError> {
        GrafanaProvisioner::create_datasource(self, org_name, body).await
    }

    async fn set_home_dashboard(
        &self,
        org_name: &str,
        uid: &str,
    ) -> Result<MessageResponse, DomainError> {
        GrafanaProvisioner::set_home_dashboard(self, org_name, uid).await
    }
}
