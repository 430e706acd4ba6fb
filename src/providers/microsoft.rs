//! Microsoft Entra ID (tenant-scoped) OAuth2/OIDC provider.

use super::async_trait;

use super::IdentityProvider;
use crate::error::{BrokerError, BrokerResult, ProviderType};

/// Microsoft Entra ID tenant-scoped `OAuth2` provider.
///
/// Endpoints are parameterized by the Entra tenant; a missing `tenant_id` is
/// a configuration-time failure, never discovered at request time.
#[derive(Debug, Clone)]
pub struct MicrosoftTenantProvider {
    client_id: String,
    client_secret: String,
    tenant_id: String,
}

impl MicrosoftTenantProvider {
    /// Create a new Microsoft Entra tenant provider.
    pub fn new(
        client_id: String,
        client_secret: String,
        tenant_id: Option<String>,
    ) -> BrokerResult<Self> {
        let tenant_id = tenant_id
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| BrokerError::Configuration {
                message: "tenant_id is required for microsoft_tenant".to_string(),
            })?;

        Ok(Self {
            client_id,
            client_secret,
            tenant_id,
        })
    }
}

#[async_trait]
impl IdentityProvider for MicrosoftTenantProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::MicrosoftTenant
    }

    fn authorization_endpoint(&self) -> String {
        format!(
            "https://login.microsoftonline.com/{}/oauth2/v2.0/authorize",
            self.tenant_id
        )
    }

    fn token_endpoint(&self) -> String {
        format!(
            "https://login.microsoftonline.com/{}/oauth2/v2.0/token",
            self.tenant_id
        )
    }

    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn client_secret(&self) -> &str {
        &self.client_secret
    }
}
