//! Identity provider implementations.
//!
//! Each variant owns its endpoint-construction rules; the building and
//! exchange logic is shared through the trait's provided methods.

pub mod google;
pub mod microsoft;
pub mod registry;

pub use async_trait::async_trait;

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::form_urlencoded;

use crate::error::{BrokerError, BrokerResult, ProviderType};

/// Bounded timeout for token-endpoint calls.
const EXCHANGE_TIMEOUT_SECS: u64 = 10;

/// Process-global HTTP client shared by all provider instances.
///
/// Holds no per-tenant state; credentials travel with each request.
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

fn shared_http_client() -> &'static Client {
    HTTP_CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(EXCHANGE_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Credential fields for constructing a provider.
///
/// Scoped to one (tenant, provider type, request) resolution; constructed
/// fresh by the configuration resolver and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// Wire shape of a token endpoint response. Only `id_token` is consumed.
#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
    id_token: Option<String>,
}

/// Trait for OAuth2/OIDC identity provider variants.
///
/// Required methods supply the provider-specific endpoint templates, scope,
/// and credentials; the two flow operations are provided on top of them.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug {
    /// Get the provider type.
    fn provider_type(&self) -> ProviderType;

    /// Authorization endpoint for the redirect-based flow.
    fn authorization_endpoint(&self) -> String;

    /// Token endpoint for the code exchange.
    fn token_endpoint(&self) -> String;

    /// Default scope requested at authorization time.
    fn scope(&self) -> &str {
        "openid email"
    }

    /// OAuth2 client ID for this provider.
    fn client_id(&self) -> &str;

    /// OAuth2 client secret for this provider.
    fn client_secret(&self) -> &str;

    /// HTTP client used for the token exchange.
    fn http_client(&self) -> &Client {
        shared_http_client()
    }

    /// Build the authorization URL.
    ///
    /// Pure function of provider fields and inputs; identical inputs yield
    /// identical URLs. When `redirect_uri` is `None` the parameter is omitted
    /// and the provider-side registered default applies.
    fn build_authorization_url(&self, redirect_uri: Option<&str>, state: Option<&str>) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("client_id", self.client_id());
        if let Some(redirect_uri) = redirect_uri {
            query.append_pair("redirect_uri", redirect_uri);
        }
        query.append_pair("response_type", "code");
        query.append_pair("scope", self.scope());
        if let Some(state) = state {
            query.append_pair("state", state);
        }
        format!("{}?{}", self.authorization_endpoint(), query.finish())
    }

    /// Exchange an authorization code for an identity token.
    ///
    /// One form-encoded POST to the token endpoint, bounded by the client
    /// timeout. Never retried: the code and verifier are single-use, so a
    /// second attempt is guaranteed to fail upstream.
    async fn fetch_identity_token(
        &self,
        authorization_code: &str,
        code_verifier: &str,
        redirect_uri: &str,
    ) -> BrokerResult<String> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", authorization_code),
            ("redirect_uri", redirect_uri),
            ("client_id", self.client_id()),
            ("client_secret", self.client_secret()),
            ("code_verifier", code_verifier),
        ];

        let response = self
            .http_client()
            .post(self.token_endpoint())
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrokerError::UpstreamExchange {
                provider: self.provider_type(),
                status: status.as_u16(),
            });
        }

        let body: TokenEndpointResponse = response.json().await?;
        body.id_token.ok_or(BrokerError::MissingIdentityToken {
            provider: self.provider_type(),
        })
    }
}

// Re-export providers
pub use google::GoogleProvider;
pub use microsoft::MicrosoftTenantProvider;
pub use registry::{ProviderBuilder, ProviderRegistry};
