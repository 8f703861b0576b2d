//! HTTP client for the provision authority

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{AccessKey, AccountEnvelope, DomainError, KeyCheckOutcome};

/// Operations this service needs from the account provisioning authority.
///
/// Both calls are blocking from the request's point of view; transport
/// failures surface as errors distinct from the authority's verdicts.
#[async_trait]
pub trait ProvisionAuthority: Send + Sync + std::fmt::Debug {
    /// Resolves the parent of an account. `Ok(None)` means the account
    /// exists but sits at the top of the hierarchy.
    async fn parent_of(&self, account_id: &str) -> Result<Option<String>, DomainError>;

    /// Submits an access key for validation against a parent account.
    async fn check_key(
        &self,
        parent_account_id: &str,
        key: &AccessKey,
    ) -> Result<KeyCheckOutcome, DomainError>;
}

/// Configuration for the authority client
#[derive(Debug, Clone)]
pub struct ProvisionClientConfig {
    /// Base URL of the authority, e.g. `http://api-provision:8070`
    pub location: String,
    /// Per-request timeout
    pub timeout: Duration,
}

/// reqwest-backed authority client
#[derive(Debug, Clone)]
pub struct ProvisionClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProvisionClient {
    pub fn new(config: &ProvisionClientConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("failed to build authority client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.location.trim_end_matches('/').to_string(),
        })
    }

    fn account_url(&self, account_id: &str) -> String {
        format!("{}/account/{}", self.base_url, account_id)
    }

    fn key_check_url(&self, parent_account_id: &str) -> String {
        format!("{}/keyCheck/{}", self.base_url, parent_account_id)
    }
}

#[async_trait]
impl ProvisionAuthority for ProvisionClient {
    async fn parent_of(&self, account_id: &str) -> Result<Option<String>, DomainError> {
        let url = self.account_url(account_id);
        debug!(account_id, "looking up child account");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("account lookup failed: {}", e)))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::status("account_lookup", status, body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::transport(format!("account lookup read failed: {}", e)))?;

        let envelope: AccountEnvelope = serde_json::from_str(&body)
            .map_err(|e| DomainError::decode(e.to_string(), body.clone()))?;

        Ok(envelope.parent().map(str::to_string))
    }

    async fn check_key(
        &self,
        parent_account_id: &str,
        key: &AccessKey,
    ) -> Result<KeyCheckOutcome, DomainError> {
        let url = self.key_check_url(parent_account_id);
        debug!(parent_account_id, key_name = %key.name, "checking access key");

        let response = self
            .client
            .post(&url)
            .json(key)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("key check failed: {}", e)))?;

        match response.status().as_u16() {
            200 => Ok(KeyCheckOutcome::Valid),
            404 => Ok(KeyCheckOutcome::NotFound),
            status => Ok(KeyCheckOutcome::Rejected(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ProvisionClient {
        ProvisionClient::new(&ProvisionClientConfig {
            location: server.uri(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_parent_of_resolves_parent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/account/acct-42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "payload": {"source": {"parent": "acct-1"}}
            })))
            .mount(&server)
            .await;

        let parent = client_for(&server).parent_of("acct-42").await.unwrap();
        assert_eq!(parent.as_deref(), Some("acct-1"));
    }

    #[tokio::test]
    async fn test_parent_of_empty_parent_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/account/acct-top"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "payload": {"source": {"parent": ""}}
            })))
            .mount(&server)
            .await;

        let parent = client_for(&server).parent_of("acct-top").await.unwrap();
        assert_eq!(parent, None);
    }

    #[tokio::test]
    async fn test_parent_of_non_200_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/account/acct-missing"))
            .respond_with(ResponseTemplate::new(500).set_body_string("lookup blew up"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .parent_of("acct-missing")
            .await
            .unwrap_err();
        match err {
            DomainError::Status {
                operation, status, ..
            } => {
                assert_eq!(operation, "account_lookup");
                assert_eq!(status, 500);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_parent_of_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/account/acct-42"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).parent_of("acct-42").await.unwrap_err();
        assert!(err.is_transport());
        match err {
            DomainError::Decode { body, .. } => assert_eq!(body, "not json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_key_posts_serialized_key() {
        let server = MockServer::start().await;
        let key = AccessKey::new("k1", "secret");

        Mock::given(method("POST"))
            .and(path("/keyCheck/acct-1"))
            .and(body_json(serde_json::json!({"name": "k1", "key": "secret"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server).check_key("acct-1", &key).await.unwrap();
        assert_eq!(outcome, KeyCheckOutcome::Valid);
    }

    #[tokio::test]
    async fn test_check_key_404_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/keyCheck/acct-1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .check_key("acct-1", &AccessKey::new("k1", "secret"))
            .await
            .unwrap();
        assert_eq!(outcome, KeyCheckOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_check_key_other_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/keyCheck/acct-1"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .check_key("acct-1", &AccessKey::new("k1", "secret"))
            .await
            .unwrap();
        assert_eq!(outcome, KeyCheckOutcome::Rejected(503));
    }
}
