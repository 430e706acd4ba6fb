//! Google OAuth2/OIDC provider.

use super::async_trait;

use super::IdentityProvider;
use crate::error::ProviderType;

/// Google `OAuth2` endpoints.
const AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Google `OAuth2` provider. Endpoints are fixed and public.
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    client_id: String,
    client_secret: String,
}

impl GoogleProvider {
    /// Create a new Google provider.
    #[must_use]
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::Google
    }

    fn authorization_endpoint(&self) -> String {
        AUTHORIZATION_ENDPOINT.to_string()
    }

    fn token_endpoint(&self) -> String {
        TOKEN_ENDPOINT.to_string()
    }

    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn client_secret(&self) -> &str {
        &self.client_secret
    }
}
