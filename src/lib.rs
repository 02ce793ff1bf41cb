//! Alert Bridge - webhook-to-order translation service
//!
//! Receives trading-alert notifications over HTTP and translates each one
//! into a single order-placement request against the Dhan trading API:
//! validation, instrument resolution (catalog with a live option-chain
//! fallback), categorical field normalization, submission.

pub mod alert;
pub mod api;
pub mod broker;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod services;

// Re-export commonly used types
pub use alert::Alert;
pub use broker::types::OrderIntent;
pub use catalog::{InstrumentCatalog, InstrumentRecord};
pub use config::AppConfig;

#[cfg(test)]
mod catalog_tests;
