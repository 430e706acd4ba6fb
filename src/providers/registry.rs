//! Builder registry mapping provider types to construction functions.

use std::collections::HashMap;
use std::sync::Arc;

use super::{GoogleProvider, IdentityProvider, MicrosoftTenantProvider, ProviderConfig};
use crate::error::{BrokerError, BrokerResult, ProviderType};

/// Construction function invoked with the per-request configuration.
///
/// Every tenant-varying field arrives through the config argument; a builder
/// must never capture one, otherwise the first tenant to resolve poisons all
/// subsequent lookups.
pub type ProviderBuilder =
    Arc<dyn Fn(&ProviderConfig) -> BrokerResult<Box<dyn IdentityProvider>> + Send + Sync>;

/// Registry of provider builders, populated at startup.
///
/// The builder map is immutable after registration and may be read
/// concurrently without synchronization.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    builders: HashMap<ProviderType, ProviderBuilder>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in provider builders.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(
            ProviderType::Google,
            Arc::new(|config| {
                Ok(Box::new(GoogleProvider::new(
                    config.client_id.clone(),
                    config.client_secret.clone(),
                )) as Box<dyn IdentityProvider>)
            }),
        );

        registry.register(
            ProviderType::MicrosoftTenant,
            Arc::new(|config| {
                let provider = MicrosoftTenantProvider::new(
                    config.client_id.clone(),
                    config.client_secret.clone(),
                    config.tenant_id.clone(),
                )?;
                Ok(Box::new(provider) as Box<dyn IdentityProvider>)
            }),
        );

        registry
    }

    /// Insert or overwrite a builder. Last write wins; startup-time only.
    pub fn register(&mut self, provider_type: ProviderType, builder: ProviderBuilder) {
        self.builders.insert(provider_type, builder);
    }

    /// Build a provider for the given type from a per-request configuration.
    pub fn resolve(
        &self,
        provider_type: ProviderType,
        config: &ProviderConfig,
    ) -> BrokerResult<Box<dyn IdentityProvider>> {
        let builder = self
            .builders
            .get(&provider_type)
            .ok_or(BrokerError::UnknownProviderType {
                provider: provider_type,
            })?;
        builder(config)
    }

    /// Whether a builder is registered for the given type.
    #[must_use]
    pub fn is_registered(&self, provider_type: ProviderType) -> bool {
        self.builders.contains_key(&provider_type)
    }
}
