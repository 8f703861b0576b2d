//! Account hierarchy types exchanged with the provision authority

use serde::{Deserialize, Serialize};

/// Access key presented by a caller via basic auth to prove delegated
/// authority over an account. Never persisted by this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKey {
    pub name: String,
    pub key: String,
}

impl AccessKey {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }

    /// Cache key representing permission for this access key to manage
    /// the given account.
    pub fn cache_key(&self, account_id: &str) -> String {
        format!("{}{}{}", account_id, self.name, self.key)
    }
}

/// Envelope returned by the authority's account lookup endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountEnvelope {
    #[serde(default)]
    pub payload: AccountPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountPayload {
    #[serde(default)]
    pub source: AccountSource,
}

/// The account record itself. An empty parent means the account sits at
/// the top of the hierarchy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountSource {
    #[serde(default)]
    pub parent: String,
}

impl AccountEnvelope {
    /// Parent account id, if the account has one.
    pub fn parent(&self) -> Option<&str> {
        let parent = self.payload.source.parent.as_str();
        if parent.is_empty() { None } else { Some(parent) }
    }
}

/// Outcome of submitting an access key to the authority's key-check
/// endpoint, scoped to a parent account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCheckOutcome {
    /// The key is valid for the parent account (200).
    Valid,
    /// The parent account was not found (404).
    NotFound,
    /// The authority answered with an unexpected status.
    Rejected(u16),
}
