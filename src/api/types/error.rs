//! Wire-level error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    AuthenticationError,
    NotFoundError,
    UpstreamError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::AuthenticationError => write!(f, "authentication_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::UpstreamError => write!(f, "upstream_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    code: None,
                },
            },
        }
    }

    /// Add a short machine-readable error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiErrorType::InvalidRequestError,
            message,
        )
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ApiErrorType::AuthenticationError,
            message,
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorType::ServerError,
            message,
        )
    }

    /// Error relaying a remote service's non-success status. The remote
    /// status is passed through to the caller where it is representable.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
        Self::new(status, ApiErrorType::UpstreamError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Transport { message } => {
                Self::internal(message).with_code("transport_error")
            }
            DomainError::Status {
                operation,
                status,
                body,
            } => Self::upstream(status, body).with_code(operation),
            DomainError::Decode { message, body } => Self::new(
                StatusCode::BAD_GATEWAY,
                ApiErrorType::UpstreamError,
                format!("{}: {}", message, body),
            )
            .with_code("decode_error"),
            DomainError::Provision { step, status, body } => {
                Self::upstream(status, body).with_code(step.code())
            }
            err @ (DomainError::NoParentAccount { .. }
            | DomainError::ParentAccountNotFound { .. }
            | DomainError::KeyCheckFailed { .. }) => {
                Self::unauthorized(err.to_string()).with_code("access_denied")
            }
            DomainError::Cache { message } | DomainError::Configuration { message } => {
                Self::internal(message)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grafana::ProvisionStep;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::unauthorized("access key rejected");
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            err.response.error.error_type,
            ApiErrorType::AuthenticationError
        );
    }

    #[test]
    fn test_provision_failure_passes_status_through() {
        let err: ApiError = DomainError::provision(ProvisionStep::UserCreate, 500, "boom").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.response.error.code.as_deref(),
            Some("user_create_failed")
        );
        assert_eq!(err.response.error.message, "boom");
    }

    #[test]
    fn test_upstream_status_passthrough() {
        let err: ApiError = DomainError::status("org_lookup", 404, "org not found").into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.response.error.code.as_deref(), Some("org_lookup"));
    }

    #[test]
    fn test_transport_maps_to_500() {
        let err: ApiError = DomainError::transport("connection refused").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_authorization_failures_map_to_401() {
        for err in [
            DomainError::no_parent_account("acct-42"),
            DomainError::parent_account_not_found("acct-1"),
            DomainError::key_check_failed(503),
        ] {
            let api: ApiError = err.into();
            assert_eq!(api.status, StatusCode::UNAUTHORIZED);
            assert_eq!(api.response.error.code.as_deref(), Some("access_denied"));
        }
    }

    #[test]
    fn test_unrepresentable_status_becomes_bad_gateway() {
        let err: ApiError = DomainError::status("org_lookup", 0, "").into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::unauthorized("invalid access key").with_code("access_denied");
        let json = serde_json::to_string(&err.response).unwrap();
        assert!(json.contains("authentication_error"));
        assert!(json.contains("access_denied"));
    }
}
