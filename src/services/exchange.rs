//! End-to-end authorization-code exchange orchestration.

use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{BrokerError, BrokerResult, ProviderType};
use crate::models::{ExchangeRequest, IdentityClaims, LocalUser, TokenPair};
use crate::providers::ProviderRegistry;
use crate::settings::{BrokerSettings, RequestContext};

/// Capacity of the authentication-notification channel.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Lookup seam into the host's user store.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a local user by the identity token's subject email.
    async fn find_by_email(&self, email: &str) -> BrokerResult<Option<LocalUser>>;
}

/// Seam to the host's session-credential issuer.
#[async_trait]
pub trait CredentialIssuer: Send + Sync {
    /// Mint a session credential pair for an authenticated user.
    async fn issue(&self, user: &LocalUser) -> BrokerResult<TokenPair>;
}

/// Notification emitted after a successful exchange.
#[derive(Debug, Clone)]
pub struct UserAuthenticated {
    pub user_id: Uuid,
    pub email: String,
    pub provider: ProviderType,
}

/// Orchestrates the exchange flow:
/// validate → resolve provider → fetch token → decode claims → resolve user →
/// issue credentials and notify observers.
pub struct ExchangeService {
    settings: BrokerSettings,
    registry: Arc<ProviderRegistry>,
    users: Arc<dyn UserDirectory>,
    issuer: Arc<dyn CredentialIssuer>,
    events: broadcast::Sender<UserAuthenticated>,
}

impl ExchangeService {
    /// Create a new exchange service.
    pub fn new(
        settings: BrokerSettings,
        registry: Arc<ProviderRegistry>,
        users: Arc<dyn UserDirectory>,
        issuer: Arc<dyn CredentialIssuer>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            settings,
            registry,
            users,
            issuer,
            events,
        }
    }

    /// Subscribe to authentication notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<UserAuthenticated> {
        self.events.subscribe()
    }

    /// Exchange an authorization code for a session credential pair.
    ///
    /// Provider-layer and configuration-layer failures propagate unchanged.
    /// Nothing is retried: the code and PKCE verifier are single-use.
    pub async fn exchange(
        &self,
        context: &RequestContext,
        provider_type: ProviderType,
        request: &ExchangeRequest,
    ) -> BrokerResult<TokenPair> {
        request.validate()?;

        let config = self.settings.get_provider_config(provider_type, context)?;
        let provider = self.registry.resolve(provider_type, &config)?;

        let id_token = provider
            .fetch_identity_token(&request.code, &request.code_verifier, &request.redirect_uri)
            .await?;

        // The signature is intentionally not verified here: trust is delegated
        // to the credential issuer and the TLS channel to the token endpoint.
        let claims = decode_claims_unverified(&id_token)?;
        let email = claims
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or(BrokerError::MissingClaim { claim: "email" })?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(BrokerError::NoAssociatedUser)?;
        if !user.is_active {
            return Err(BrokerError::UserNotActive);
        }

        let tokens = self.issuer.issue(&user).await?;

        info!(
            user_id = %user.id,
            provider = %provider_type,
            "User authenticated via identity provider"
        );
        // Fire-and-forget: a missing or lagging observer never fails the flow.
        let _ = self.events.send(UserAuthenticated {
            user_id: user.id,
            email,
            provider: provider_type,
        });

        Ok(tokens)
    }

    /// Build one authorization URL per configured provider, in configuration
    /// order.
    ///
    /// A provider whose construction fails is skipped with a warning rather
    /// than aborting the whole listing; only an entirely empty result is an
    /// error.
    pub fn authorization_urls(
        &self,
        context: &RequestContext,
    ) -> BrokerResult<Vec<(ProviderType, String)>> {
        let resolved = self.settings.resolve_providers(context);
        if resolved.is_empty() {
            return Err(BrokerError::NoActiveProvider);
        }

        let mut entries = Vec::with_capacity(resolved.len());
        for (provider_type, config) in &resolved {
            match self.registry.resolve(*provider_type, config) {
                Ok(provider) => {
                    entries.push((*provider_type, provider.build_authorization_url(None, None)));
                }
                Err(err) => {
                    warn!(
                        provider = %provider_type,
                        error = %err,
                        "Skipping provider that could not be constructed"
                    );
                }
            }
        }

        if entries.is_empty() {
            return Err(BrokerError::NoActiveProvider);
        }
        Ok(entries)
    }
}

/// Decode the ID-token payload without verifying the signature.
fn decode_claims_unverified(id_token: &str) -> BrokerResult<IdentityClaims> {
    let payload = id_token
        .split('.')
        .nth(1)
        .ok_or(BrokerError::MalformedIdentityToken)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| BrokerError::MalformedIdentityToken)?;
    serde_json::from_slice(&bytes).map_err(|_| BrokerError::MalformedIdentityToken)
}
