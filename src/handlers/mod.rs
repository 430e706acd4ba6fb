//! HTTP handlers for the broker surface.

pub mod exchange;
pub mod providers;

pub use exchange::exchange_code;
pub use providers::list_providers;
