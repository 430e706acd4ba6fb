//! Multi-tenant OAuth2/OIDC identity broker.
//!
//! Given a request naming an identity provider (and, in multi-tenant
//! deployments, a tenant context), this crate resolves provider configuration,
//! builds an authorization URL, exchanges an authorization code for an
//! identity token, and maps the token's subject email to a local user session
//! credential.
//!
//! # Design
//!
//! - **Providers** ([`providers::IdentityProvider`]): one variant per upstream
//!   identity source (Google, Microsoft Entra tenant), owning its endpoint
//!   templates and scope.
//! - **Registry** ([`providers::ProviderRegistry`]): startup-time builder
//!   table keyed by [`ProviderType`]; every tenant-varying field is passed at
//!   resolve time, never captured by a builder.
//! - **Configuration resolution** ([`settings::BrokerSettings`]): the provider
//!   table is re-derived on every request, either from static configuration or
//!   through a dynamic per-tenant handler. Nothing is cached across requests —
//!   the central multi-tenant isolation invariant.
//! - **Exchange orchestration** ([`services::ExchangeService`]): validates the
//!   request, exchanges the code, decodes the identity token WITHOUT signature
//!   verification (trust is delegated to the credential issuer and transport
//!   security), resolves the local user, and delegates credential issuance to
//!   the host.
//!
//! User lookup and credential issuance are trait seams
//! ([`services::UserDirectory`], [`services::CredentialIssuer`]) implemented by
//! the hosting application.
//!
//! # Example
//!
//! ```rust,ignore
//! use oauth_broker::{broker_router, BrokerSettings, BrokerState, ProviderRegistry};
//!
//! let state = BrokerState::new(
//!     BrokerSettings::from_static(providers),
//!     ProviderRegistry::with_defaults(),
//!     users,
//!     issuer,
//! );
//! let app = broker_router().with_state(state);
//! ```

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod providers;
pub mod router;
pub mod services;
pub mod settings;

pub use error::{BrokerError, BrokerResult, ProviderType};
pub use providers::{IdentityProvider, ProviderConfig, ProviderRegistry};
pub use router::{broker_router, BrokerState};
pub use services::{CredentialIssuer, ExchangeService, UserAuthenticated, UserDirectory};
pub use settings::{BrokerSettings, ProviderMap, RequestContext, TenantProviderTable};
