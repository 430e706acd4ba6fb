//! Provider-listing tests: ordering, tenant isolation, partial failure.

use oauth_broker::providers::{ProviderConfig, ProviderRegistry};
use oauth_broker::settings::{
    BrokerSettings, ProviderMap, RequestContext, TenantProviderTable,
};
use oauth_broker::{BrokerError, ProviderType};

use super::common::broker_service;

fn config(client_id: &str, tenant_id: Option<&str>) -> ProviderConfig {
    ProviderConfig {
        client_id: client_id.to_string(),
        client_secret: format!("{client_id}-secret"),
        tenant_id: tenant_id.map(str::to_string),
    }
}

#[tokio::test]
async fn test_listing_preserves_configuration_order() {
    let mut map = ProviderMap::new();
    map.insert(ProviderType::MicrosoftTenant, config("ms-id", Some("t1")));
    map.insert(ProviderType::Google, config("g-id", None));

    let service = broker_service(
        BrokerSettings::from_static(map),
        ProviderRegistry::with_defaults(),
    );

    let entries = service
        .authorization_urls(&RequestContext::anonymous())
        .unwrap();

    let types: Vec<ProviderType> = entries.iter().map(|(t, _)| *t).collect();
    assert_eq!(
        types,
        vec![ProviderType::MicrosoftTenant, ProviderType::Google]
    );

    assert!(entries[0].1.contains("login.microsoftonline.com/t1/"));
    assert!(entries[1]
        .1
        .starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
    assert!(entries[1].1.contains("client_id=g-id"));
}

#[tokio::test]
async fn test_listing_with_no_providers_is_not_an_empty_success() {
    let service = broker_service(
        BrokerSettings::from_static(ProviderMap::new()),
        ProviderRegistry::with_defaults(),
    );

    let err = service
        .authorization_urls(&RequestContext::anonymous())
        .unwrap_err();
    assert!(matches!(err, BrokerError::NoActiveProvider));
}

#[tokio::test]
async fn test_listing_skips_provider_that_fails_to_construct() {
    // microsoft_tenant without a tenant_id fails at construction; the listing
    // continues with the remaining providers.
    let mut map = ProviderMap::new();
    map.insert(ProviderType::MicrosoftTenant, config("ms-id", None));
    map.insert(ProviderType::Google, config("g-id", None));

    let service = broker_service(
        BrokerSettings::from_static(map),
        ProviderRegistry::with_defaults(),
    );

    let entries = service
        .authorization_urls(&RequestContext::anonymous())
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, ProviderType::Google);
}

#[tokio::test]
async fn test_listing_where_every_provider_fails_is_no_active_provider() {
    let mut map = ProviderMap::new();
    map.insert(ProviderType::MicrosoftTenant, config("ms-id", None));

    let service = broker_service(
        BrokerSettings::from_static(map),
        ProviderRegistry::with_defaults(),
    );

    let err = service
        .authorization_urls(&RequestContext::anonymous())
        .unwrap_err();
    assert!(matches!(err, BrokerError::NoActiveProvider));
}

#[tokio::test]
async fn test_sequential_tenant_listings_never_leak_credentials() {
    // Regression test for the cached-settings defect: the second tenant's
    // listing must carry its own client_id and Entra tenant, never the first
    // tenant's.
    let mut table = TenantProviderTable::new();

    let mut panevo = ProviderMap::new();
    panevo.insert(
        ProviderType::MicrosoftTenant,
        config("panevo-client-id-12345678", Some("panevo-tenant-id")),
    );
    table.insert("panevo".to_string(), panevo);

    let mut panevo2 = ProviderMap::new();
    panevo2.insert(
        ProviderType::MicrosoftTenant,
        config("panevo2-client-id-87654321", Some("panevo2-tenant-id")),
    );
    table.insert("panevo2".to_string(), panevo2);

    let service = broker_service(
        BrokerSettings::multi_tenant(table),
        ProviderRegistry::with_defaults(),
    );

    let first = service
        .authorization_urls(&RequestContext::for_tenant("panevo"))
        .unwrap();
    let second = service
        .authorization_urls(&RequestContext::for_tenant("panevo2"))
        .unwrap();

    assert!(first[0].1.contains("panevo-tenant-id"));
    assert!(first[0].1.contains("client_id=panevo-client-id-12345678"));

    assert!(second[0].1.contains("panevo2-tenant-id"));
    assert!(second[0].1.contains("client_id=panevo2-client-id-87654321"));

    assert_ne!(first[0].1, second[0].1);
}
