//! Identity broker error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported identity provider variants.
///
/// A closed set: adding a provider means adding a variant here plus a builder
/// in the registry. Never inferred — always explicit in configuration and
/// request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    Google,
    MicrosoftTenant,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::Google => write!(f, "google"),
            ProviderType::MicrosoftTenant => write!(f, "microsoft_tenant"),
        }
    }
}

impl std::str::FromStr for ProviderType {
    type Err = BrokerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(ProviderType::Google),
            "microsoft_tenant" => Ok(ProviderType::MicrosoftTenant),
            _ => Err(BrokerError::InvalidProvider {
                provider: s.to_string(),
            }),
        }
    }
}

/// Identity broker errors.
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("Invalid request: {reason}")]
    Validation { reason: String },

    #[error("Invalid provider: {provider}")]
    InvalidProvider { provider: String },

    #[error("No active identity provider for this context")]
    NoActiveProvider,

    #[error("No builder registered for provider type '{provider}'")]
    UnknownProviderType { provider: ProviderType },

    #[error("Token exchange failed with provider {provider}: HTTP {status}")]
    UpstreamExchange { provider: ProviderType, status: u16 },

    #[error("Token response from {provider} did not contain an id_token")]
    MissingIdentityToken { provider: ProviderType },

    #[error("Identity token payload could not be decoded")]
    MalformedIdentityToken,

    #[error("Identity token is missing the '{claim}' claim")]
    MissingClaim { claim: &'static str },

    #[error("No local user is associated with this identity")]
    NoAssociatedUser,

    #[error("User account is not active")]
    UserNotActive,

    #[error("Provider configuration error: {message}")]
    Configuration { message: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error response structure for API responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl BrokerError {
    /// Get the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            BrokerError::Validation { .. } => "validation_error",
            BrokerError::InvalidProvider { .. } => "invalid_provider",
            BrokerError::NoActiveProvider => "no_active_provider",
            BrokerError::UnknownProviderType { .. } => "unknown_provider_type",
            BrokerError::UpstreamExchange { .. } => "upstream_exchange_failed",
            BrokerError::MissingIdentityToken { .. } => "missing_identity_token",
            BrokerError::MalformedIdentityToken => "malformed_identity_token",
            BrokerError::MissingClaim { .. } => "missing_claim",
            BrokerError::NoAssociatedUser => "no_associated_user",
            BrokerError::UserNotActive => "user_not_active",
            BrokerError::Configuration { .. } => "configuration_error",
            BrokerError::Http(_) => "http_error",
            BrokerError::Json(_) => "json_error",
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            BrokerError::Validation { .. } => StatusCode::BAD_REQUEST,
            BrokerError::InvalidProvider { .. } => StatusCode::BAD_REQUEST,
            BrokerError::NoActiveProvider => StatusCode::NOT_FOUND,
            BrokerError::UnknownProviderType { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            BrokerError::UpstreamExchange { .. } => StatusCode::BAD_GATEWAY,
            BrokerError::MissingIdentityToken { .. } => StatusCode::BAD_GATEWAY,
            BrokerError::MalformedIdentityToken => StatusCode::BAD_GATEWAY,
            BrokerError::MissingClaim { .. } => StatusCode::BAD_GATEWAY,
            BrokerError::NoAssociatedUser => StatusCode::NOT_FOUND,
            BrokerError::UserNotActive => StatusCode::BAD_REQUEST,
            BrokerError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            BrokerError::Http(_) => StatusCode::BAD_GATEWAY,
            BrokerError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BrokerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Upstream and internal details are logged, not returned to the caller.
        let message = match &self {
            BrokerError::Http(e) => {
                tracing::error!("Broker HTTP client error: {:?}", e);
                "An upstream HTTP error occurred".to_string()
            }
            BrokerError::Json(e) => {
                tracing::error!("Broker JSON error: {:?}", e);
                "A data processing error occurred".to_string()
            }
            BrokerError::Configuration { message } => {
                tracing::error!("Broker configuration error: {}", message);
                "A provider configuration error occurred".to_string()
            }
            BrokerError::UnknownProviderType { provider } => {
                tracing::error!(provider = %provider, "Provider type has no registered builder");
                "A provider configuration error occurred".to_string()
            }
            BrokerError::UpstreamExchange { provider, status } => {
                tracing::warn!(provider = %provider, status = %status, "Token exchange failed");
                format!("Token exchange failed with {provider}")
            }
            _ => self.to_string(),
        };
        let body = ErrorResponse {
            error: self.error_code().to_string(),
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Result type alias for broker operations.
pub type BrokerResult<T> = Result<T, BrokerError>;
