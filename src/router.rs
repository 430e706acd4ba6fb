//! Router and shared state for the broker surface.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::providers::ProviderRegistry;
use crate::services::{CredentialIssuer, ExchangeService, UserDirectory};
use crate::settings::BrokerSettings;

/// Shared state for broker handlers.
#[derive(Clone)]
pub struct BrokerState {
    /// Exchange orchestrator.
    pub exchange: Arc<ExchangeService>,
}

impl BrokerState {
    /// Assemble the broker state from its collaborators.
    ///
    /// The registry is fixed at this point; per-request variation flows
    /// entirely through the settings resolution.
    pub fn new(
        settings: BrokerSettings,
        registry: ProviderRegistry,
        users: Arc<dyn UserDirectory>,
        issuer: Arc<dyn CredentialIssuer>,
    ) -> Self {
        Self {
            exchange: Arc::new(ExchangeService::new(
                settings,
                Arc::new(registry),
                users,
                issuer,
            )),
        }
    }
}

/// Create the broker router.
///
/// Typically mounted at the host's API root; tenant context arrives via the
/// `X-Tenant-ID` header.
pub fn broker_router() -> Router<BrokerState> {
    Router::new()
        .route("/oauth/providers", get(handlers::list_providers))
        .route(
            "/oauth/:provider_type/exchange",
            post(handlers::exchange_code),
        )
}
