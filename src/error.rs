//! Custom error types for the alert-to-order pipeline
//!
//! Provides structured, typed errors instead of generic Box<dyn Error>

use thiserror::Error;

/// Errors surfaced by the alert translator.
///
/// These are the only error kinds that reach the HTTP boundary; both map
/// to a 400 since the caller sent something we cannot turn into an order.
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("could not resolve instrument: {symbol}")]
    UnresolvedInstrument { symbol: String },
}

/// Instrument resolution failure.
///
/// A catalog miss alone is not an error, only the exhaustion of every
/// applicable strategy is.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("no security id found for {symbol}")]
    NotFound { symbol: String },
}

/// Broker-specific errors
#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("order rejected: {reason}")]
    Rejected { reason: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Catalog load/refresh errors. Never fatal: the catalog keeps its prior
/// contents and the failure is logged.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog missing required column: {0}")]
    MissingColumn(&'static str),
}

impl From<ResolutionError> for TranslationError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::NotFound { symbol } => {
                TranslationError::UnresolvedInstrument { symbol }
            }
        }
    }
}
