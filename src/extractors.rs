//! Axum extractors for broker handlers.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::BrokerError;
use crate::settings::RequestContext;

/// Request context extracted from the optional `X-Tenant-ID` header.
///
/// Single-tenant hosts omit the header and run on the static configuration;
/// multi-tenant hosts key their provider table by this value.
#[derive(Debug, Clone)]
pub struct Tenant(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for Tenant
where
    S: Send + Sync,
{
    type Rejection = BrokerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tenant = match parts.headers.get("X-Tenant-ID") {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| BrokerError::Validation {
                        reason: "Invalid X-Tenant-ID header".to_string(),
                    })?
                    .to_string(),
            ),
            None => None,
        };

        Ok(Tenant(RequestContext { tenant }))
    }
}
