//! Providers listing handler.

use axum::{extract::State, Json};

use crate::error::BrokerResult;
use crate::extractors::Tenant;
use crate::models::{ProviderEntry, ProvidersResponse};
use crate::router::BrokerState;

/// List configured providers with their authorization URLs.
///
/// Entries preserve configuration order; a provider that fails to construct
/// is excluded from the listing rather than failing it.
#[utoipa::path(
    get,
    path = "/oauth/providers",
    params(
        ("X-Tenant-ID" = Option<String>, Header, description = "Tenant key for multi-tenant hosts"),
    ),
    responses(
        (status = 200, description = "Configured providers with authorization URLs", body = ProvidersResponse),
        (status = 404, description = "No provider configured for this context"),
    ),
    tag = "OAuth Broker"
)]
pub async fn list_providers(
    State(state): State<BrokerState>,
    Tenant(context): Tenant,
) -> BrokerResult<Json<ProvidersResponse>> {
    let entries = state.exchange.authorization_urls(&context)?;

    let providers = entries
        .into_iter()
        .map(|(provider_type, auth_url)| ProviderEntry {
            provider_type,
            auth_url,
        })
        .collect();

    Ok(Json(ProvidersResponse { providers }))
}
