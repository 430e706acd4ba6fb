//! Common test utilities and fixtures for broker integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::json;
use uuid::Uuid;

use oauth_broker::models::{LocalUser, TokenPair};
use oauth_broker::providers::{IdentityProvider, ProviderConfig, ProviderRegistry};
use oauth_broker::services::{CredentialIssuer, ExchangeService, UserDirectory};
use oauth_broker::settings::{BrokerSettings, ProviderMap};
use oauth_broker::{BrokerResult, ProviderType};

pub const TEST_AUTH_CODE: &str = "test_authorization_code";
pub const TEST_CODE_VERIFIER: &str = "test_code_verifier_0123456789abcdef";
pub const TEST_REDIRECT_URI: &str = "https://app.example.com/callback";

pub const ACTIVE_EMAIL: &str = "active@example.com";
pub const DISABLED_EMAIL: &str = "disabled@example.com";

/// Provider whose endpoints point at a wiremock server.
///
/// Stands in for a real variant so the trait's provided exchange logic can be
/// exercised against configurable token-endpoint responses.
#[derive(Debug)]
pub struct TestProvider {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
}

#[async_trait]
impl IdentityProvider for TestProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::Google
    }

    fn authorization_endpoint(&self) -> String {
        format!("{}/auth", self.base_url)
    }

    fn token_endpoint(&self) -> String {
        format!("{}/token", self.base_url)
    }

    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

/// Registry whose `google` builder produces a `TestProvider` bound to the
/// given mock-server base URL. Credentials still flow from the per-request
/// config.
pub fn test_registry(base_url: &str) -> ProviderRegistry {
    let mut registry = ProviderRegistry::with_defaults();
    let base = base_url.to_string();
    registry.register(
        ProviderType::Google,
        Arc::new(move |config: &ProviderConfig| {
            Ok(Box::new(TestProvider {
                base_url: base.clone(),
                client_id: config.client_id.clone(),
                client_secret: config.client_secret.clone(),
            }) as Box<dyn IdentityProvider>)
        }),
    );
    registry
}

/// In-memory user directory keyed by email.
pub struct InMemoryDirectory {
    users: HashMap<String, LocalUser>,
}

impl InMemoryDirectory {
    /// Directory seeded with one active and one deactivated user.
    pub fn seeded() -> Self {
        let mut users = HashMap::new();
        users.insert(
            ACTIVE_EMAIL.to_string(),
            LocalUser {
                id: Uuid::new_v4(),
                email: ACTIVE_EMAIL.to_string(),
                is_active: true,
            },
        );
        users.insert(
            DISABLED_EMAIL.to_string(),
            LocalUser {
                id: Uuid::new_v4(),
                email: DISABLED_EMAIL.to_string(),
                is_active: false,
            },
        );
        Self { users }
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn find_by_email(&self, email: &str) -> BrokerResult<Option<LocalUser>> {
        Ok(self.users.get(email).cloned())
    }
}

/// Issuer returning a fixed credential pair.
pub struct StaticIssuer;

#[async_trait]
impl CredentialIssuer for StaticIssuer {
    async fn issue(&self, _user: &LocalUser) -> BrokerResult<TokenPair> {
        Ok(TokenPair {
            access: "test-access-token".to_string(),
            refresh: "test-refresh-token".to_string(),
        })
    }
}

/// Assemble an exchange service over the seeded directory and static issuer.
pub fn broker_service(settings: BrokerSettings, registry: ProviderRegistry) -> ExchangeService {
    ExchangeService::new(
        settings,
        Arc::new(registry),
        Arc::new(InMemoryDirectory::seeded()),
        Arc::new(StaticIssuer),
    )
}

/// Static settings with a single google provider.
pub fn google_settings() -> BrokerSettings {
    let mut map = ProviderMap::new();
    map.insert(
        ProviderType::Google,
        ProviderConfig {
            client_id: "test_id".to_string(),
            client_secret: "test_secret".to_string(),
            tenant_id: None,
        },
    );
    BrokerSettings::from_static(map)
}

/// Unsigned JWT whose payload carries the given email claim.
pub fn unsigned_id_token(email: Option<&str>) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = match email {
        Some(email) => json!({ "sub": "117730572023847612345", "email": email }),
        None => json!({ "sub": "117730572023847612345" }),
    };
    let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
    format!("{header}.{body}.")
}
