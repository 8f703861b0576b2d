//! Access-key authorization extractor

use std::collections::HashMap;

use axum::{
    RequestPartsExt,
    extract::{FromRequestParts, Path},
    http::{HeaderMap, header, request::Parts},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::AccessKey;

/// Extractor that gates a tenant-scoped route on a successful delegated
/// authorization check.
///
/// The caller presents an access key via `Authorization: Basic` where the
/// username is the key name and the password the key secret; the target
/// account is the route's `org_name` parameter. Any missing credential,
/// transport failure or negative verdict resolves to 401 — the gate
/// fails closed.
#[derive(Debug, Clone)]
pub struct RequireOrgAccess {
    pub org_name: String,
}

impl FromRequestParts<AppState> for RequireOrgAccess {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(params) = parts
            .extract::<Path<HashMap<String, String>>>()
            .await
            .map_err(|_| ApiError::internal("route has no path parameters"))?;

        let org_name = params
            .get("org_name")
            .cloned()
            .ok_or_else(|| ApiError::internal("route has no org_name parameter"))?;

        let access_key = basic_access_key(&parts.headers)?;

        debug!(%org_name, key_name = %access_key.name, "checking account access");

        match state.authorizer.authorize(&org_name, &access_key).await {
            Ok(true) => Ok(Self { org_name }),
            Ok(false) => Err(denied("invalid access key")),
            Err(e) => {
                warn!(%org_name, error = %e, "account authorization failed");
                Err(denied(e.to_string()))
            }
        }
    }
}

fn denied(message: impl Into<String>) -> ApiError {
    ApiError::unauthorized(message).with_code("access_denied")
}

/// Decodes the basic-auth header into an access key.
fn basic_access_key(headers: &HeaderMap) -> Result<AccessKey, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| denied("access key required via basic auth"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::bad_request("invalid Authorization header encoding"))?;

    let encoded = auth_str
        .strip_prefix("Basic ")
        .ok_or_else(|| denied("access key required via basic auth"))?;

    let decoded = BASE64
        .decode(encoded.trim())
        .map_err(|_| ApiError::bad_request("malformed basic auth credentials"))?;

    let decoded = String::from_utf8(decoded)
        .map_err(|_| ApiError::bad_request("malformed basic auth credentials"))?;

    let (name, key) = decoded
        .split_once(':')
        .ok_or_else(|| ApiError::bad_request("malformed basic auth credentials"))?;

    Ok(AccessKey::new(name, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn basic_header(name: &str, key: &str) -> String {
        format!("Basic {}", BASE64.encode(format!("{name}:{key}")))
    }

    #[test]
    fn test_decodes_basic_credentials() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            basic_header("k1", "secret").parse().unwrap(),
        );

        let access_key = basic_access_key(&headers).unwrap();
        assert_eq!(access_key, AccessKey::new("k1", "secret"));
    }

    #[test]
    fn test_secret_may_contain_colons() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            basic_header("k1", "se:cr:et").parse().unwrap(),
        );

        let access_key = basic_access_key(&headers).unwrap();
        assert_eq!(access_key.key, "se:cr:et");
    }

    #[test]
    fn test_missing_header_is_denied() {
        let err = basic_access_key(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_bearer_scheme_is_denied() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer token".parse().unwrap());

        let err = basic_access_key(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_garbage_base64_is_bad_request() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic !!!".parse().unwrap());

        let err = basic_access_key(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_credentials_without_separator_are_bad_request() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Basic {}", BASE64.encode("no-separator"))
                .parse()
                .unwrap(),
        );

        let err = basic_access_key(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
