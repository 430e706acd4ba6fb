//! Per-request provider configuration resolution.
//!
//! The central invariant of this module: the backing configuration source is
//! consulted on EVERY resolution, and resolved maps are never retained between
//! calls. In multi-tenant deployments a cached resolution would serve the
//! first tenant's credentials to every subsequent tenant.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{BrokerError, BrokerResult, ProviderType};
use crate::providers::ProviderConfig;

/// Ordered provider-type → credential mapping, valid for one call only.
pub type ProviderMap = IndexMap<ProviderType, ProviderConfig>;

/// Nested tenant → provider table for multi-tenant hosts.
pub type TenantProviderTable = IndexMap<String, ProviderMap>;

/// Handler returning the provider map for a request context.
///
/// Invoked fresh on every resolution; any memoization inside the handler must
/// be keyed by tenant, never global.
pub type ProvidersHandler = Arc<dyn Fn(&RequestContext) -> Option<ProviderMap> + Send + Sync>;

/// Per-request context. `tenant` carries the tenant key in multi-tenant hosts.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub tenant: Option<String>,
}

impl RequestContext {
    /// Context with no tenant scope (single-tenant hosts).
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context scoped to one tenant.
    pub fn for_tenant(tenant: impl Into<String>) -> Self {
        Self {
            tenant: Some(tenant.into()),
        }
    }
}

/// Broker settings: a static provider table plus an optional dynamic handler.
#[derive(Clone)]
pub struct BrokerSettings {
    static_providers: ProviderMap,
    handler: Option<ProvidersHandler>,
}

impl BrokerSettings {
    /// Settings backed by a fixed provider map.
    ///
    /// The default handler simply echoes the static map for every context.
    #[must_use]
    pub fn from_static(providers: ProviderMap) -> Self {
        Self {
            static_providers: providers,
            handler: None,
        }
    }

    /// Settings backed by a dynamic handler (per-tenant lookup).
    #[must_use]
    pub fn with_handler(handler: ProvidersHandler) -> Self {
        Self {
            static_providers: ProviderMap::new(),
            handler: Some(handler),
        }
    }

    /// Settings for multi-tenant hosts holding a tenant → provider table.
    ///
    /// Installs a handler that indexes the table by the context's tenant key;
    /// a request without a tenant, or with an unknown one, resolves to no
    /// providers.
    #[must_use]
    pub fn multi_tenant(table: TenantProviderTable) -> Self {
        let handler: ProvidersHandler = Arc::new(move |context| {
            context
                .tenant
                .as_deref()
                .and_then(|tenant| table.get(tenant).cloned())
        });
        Self::with_handler(handler)
    }

    /// Resolve the provider map for this call only.
    ///
    /// Re-reads the backing source on every invocation; the returned map must
    /// not outlive the request that resolved it.
    #[must_use]
    pub fn resolve_providers(&self, context: &RequestContext) -> ProviderMap {
        match &self.handler {
            Some(handler) => handler(context).unwrap_or_default(),
            None => self.static_providers.clone(),
        }
    }

    /// Get the configuration for one provider type in this context.
    pub fn get_provider_config(
        &self,
        provider_type: ProviderType,
        context: &RequestContext,
    ) -> BrokerResult<ProviderConfig> {
        let mut resolved = self.resolve_providers(context);
        resolved
            .swap_remove(&provider_type)
            .ok_or(BrokerError::NoActiveProvider)
    }

    /// Enumerate configured provider types for this context, in
    /// configuration order.
    #[must_use]
    pub fn list_provider_types(&self, context: &RequestContext) -> Vec<ProviderType> {
        self.resolve_providers(context).keys().copied().collect()
    }
}
