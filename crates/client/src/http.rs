use std::time::Duration;

use linkquote_core::config::{ApiConfig, AuthConfig};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::warn;

/// Failures at the collaborator boundary. Validation never surfaces here;
/// these are transport, status, and decode problems only.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {endpoint}")]
    Status { status: StatusCode, endpoint: String },
    #[error("could not decode response from {endpoint}: {source}")]
    Decode { endpoint: String, source: reqwest::Error },
    #[error("invalid client configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: StatusCode::UNAUTHORIZED, .. })
    }
}

/// Shared HTTP client for all collaborator services: one timeout, and the
/// session's bearer token (when configured) attached to every request.
pub fn build_client(api: &ApiConfig, auth: &AuthConfig) -> Result<Client, ClientError> {
    let mut headers = HeaderMap::new();
    if let Some(token) = &auth.bearer_token {
        let value = format!("Bearer {}", token.expose_secret());
        let mut value = HeaderValue::from_str(&value)
            .map_err(|_| ClientError::Configuration("bearer token is not valid ASCII".to_string()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Client::builder()
        .timeout(Duration::from_secs(api.timeout_secs))
        .default_headers(headers)
        .build()
        .map_err(ClientError::Transport)
}

/// Read-only lookups treat an expired session as "nothing found" rather
/// than disrupting the flow: a 401 becomes the default value with a
/// warning, every other failure propagates.
pub fn unauthorized_to_default<T: Default>(
    result: Result<T, ClientError>,
    context: &'static str,
) -> Result<T, ClientError> {
    match result {
        Err(error) if error.is_unauthorized() => {
            warn!(context, "authorization failure suppressed, returning empty result");
            Ok(T::default())
        }
        other => other,
    }
}

pub(crate) async fn decode_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status { status, endpoint: endpoint.to_string() });
    }
    response
        .json()
        .await
        .map_err(|source| ClientError::Decode { endpoint: endpoint.to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_swallowed_to_default() {
        let result: Result<Vec<u8>, ClientError> = Err(ClientError::Status {
            status: StatusCode::UNAUTHORIZED,
            endpoint: "/geographicSite".to_string(),
        });
        let swallowed = unauthorized_to_default(result, "site search").expect("swallowed");
        assert!(swallowed.is_empty());
    }

    #[test]
    fn other_statuses_propagate() {
        let result: Result<Vec<u8>, ClientError> = Err(ClientError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            endpoint: "/geographicSite".to_string(),
        });
        assert!(unauthorized_to_default(result, "site search").is_err());
    }

    #[test]
    fn builds_client_without_token() {
        let api = linkquote_core::AppConfig::default().api;
        let auth = AuthConfig { bearer_token: None };
        assert!(build_client(&api, &auth).is_ok());
    }

    #[test]
    fn builds_client_with_token() {
        let api = linkquote_core::AppConfig::default().api;
        let auth = AuthConfig { bearer_token: Some("session-token".to_string().into()) };
        assert!(build_client(&api, &auth).is_ok());
    }
}
