use thiserror::Error;

use crate::domain::grafana::ProvisionStep;

/// Core domain errors
///
/// Transport failures are kept distinct from HTTP-level non-success so
/// callers can tell "could not reach the service" from "the service said
/// no". Authorization failures resolve to denial at the API boundary.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("{operation} returned status {status}")]
    Status {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response: {message}")]
    Decode { message: String, body: String },

    #[error("{step} failed with status {status}")]
    Provision {
        step: ProvisionStep,
        status: u16,
        body: String,
    },

    #[error("account {account_id} has no parent")]
    NoParentAccount { account_id: String },

    #[error("parent account {account_id} not found")]
    ParentAccountNotFound { account_id: String },

    #[error("access key check returned status {status}")]
    KeyCheckFailed { status: u16 },

    #[error("cache error: {message}")]
    Cache { message: String },

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status(operation: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            operation: operation.into(),
            status,
            body: body.into(),
        }
    }

    pub fn decode(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            body: body.into(),
        }
    }

    pub fn provision(step: ProvisionStep, status: u16, body: impl Into<String>) -> Self {
        Self::Provision {
            step,
            status,
            body: body.into(),
        }
    }

    pub fn no_parent_account(account_id: impl Into<String>) -> Self {
        Self::NoParentAccount {
            account_id: account_id.into(),
        }
    }

    pub fn parent_account_not_found(account_id: impl Into<String>) -> Self {
        Self::ParentAccountNotFound {
            account_id: account_id.into(),
        }
    }

    pub fn key_check_failed(status: u16) -> Self {
        Self::KeyCheckFailed { status }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for errors raised by the transport layer rather than a remote
    /// verdict. The authorization cache must never store these.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Decode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        let error = DomainError::transport("connection refused");
        assert_eq!(error.to_string(), "transport error: connection refused");
        assert!(error.is_transport());
    }

    #[test]
    fn test_status_error_display() {
        let error = DomainError::status("org_lookup", 404, "org not found");
        assert_eq!(error.to_string(), "org_lookup returned status 404");
        assert!(!error.is_transport());
    }

    #[test]
    fn test_provision_error_display() {
        let error = DomainError::provision(ProvisionStep::UserCreate, 500, "boom");
        assert_eq!(error.to_string(), "user create failed with status 500");
    }

    #[test]
    fn test_no_parent_account_display() {
        let error = DomainError::no_parent_account("acct-42");
        assert_eq!(error.to_string(), "account acct-42 has no parent");
    }

    #[test]
    fn test_decode_is_transport() {
        let error = DomainError::decode("expected struct", "<html>");
        assert!(error.is_transport());
    }
}
