//! Authorization-code exchange handler.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::error::{BrokerResult, ProviderType};
use crate::extractors::Tenant;
use crate::models::{ExchangeRequest, TokenPair};
use crate::router::BrokerState;

/// Exchange an authorization code for a session credential pair.
#[utoipa::path(
    post,
    path = "/oauth/{provider_type}/exchange",
    params(
        ("provider_type" = String, Path, description = "Identity provider type"),
        ("X-Tenant-ID" = Option<String>, Header, description = "Tenant key for multi-tenant hosts"),
    ),
    request_body = ExchangeRequest,
    responses(
        (status = 200, description = "Session credential pair", body = TokenPair),
        (status = 400, description = "Invalid input or inactive user"),
        (status = 404, description = "No provider configured or no matching user"),
        (status = 502, description = "Upstream token exchange failed"),
    ),
    tag = "OAuth Broker"
)]
pub async fn exchange_code(
    State(state): State<BrokerState>,
    Tenant(context): Tenant,
    Path(provider_type): Path<String>,
    Json(request): Json<ExchangeRequest>,
) -> BrokerResult<Json<TokenPair>> {
    let provider_type: ProviderType = provider_type.parse()?;

    info!(
        provider = %provider_type,
        tenant = ?context.tenant,
        "Processing authorization-code exchange"
    );

    let tokens = state
        .exchange
        .exchange(&context, provider_type, &request)
        .await?;

    Ok(Json(tokens))
}
