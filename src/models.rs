//! Request and response models for the broker surface.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{BrokerError, BrokerResult, ProviderType};

/// Body of the code-exchange request.
///
/// The authorization code is one-time redeemable upstream; a failed exchange
/// is never retried with the same code.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ExchangeRequest {
    /// Authorization code returned by the provider's redirect.
    pub code: String,
    /// PKCE code verifier matching the challenge sent at authorization time.
    pub code_verifier: String,
    /// Redirect URI used in the authorization request.
    pub redirect_uri: String,
}

impl ExchangeRequest {
    /// All fields must be non-blank.
    pub fn validate(&self) -> BrokerResult<()> {
        let fields = [
            ("code", &self.code),
            ("code_verifier", &self.code_verifier),
            ("redirect_uri", &self.redirect_uri),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(BrokerError::Validation {
                    reason: format!("'{name}' must not be blank"),
                });
            }
        }
        Ok(())
    }
}

/// Decoded identity-token payload.
///
/// The signature is NOT verified by the broker; the only claim the flow relies
/// on is `email`, and the exchange fails closed when it is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityClaims {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
}

/// Session credential pair minted by the external issuer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Local user record surfaced by the user directory.
#[derive(Debug, Clone)]
pub struct LocalUser {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
}

/// One entry in the providers listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProviderEntry {
    pub provider_type: ProviderType,
    pub auth_url: String,
}

/// Response for the providers listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderEntry>,
}
