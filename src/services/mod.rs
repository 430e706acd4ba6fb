//! Broker services.

pub mod exchange;

pub use exchange::{CredentialIssuer, ExchangeService, UserAuthenticated, UserDirectory};
