//! Instrument resolution: alert descriptor → broker security id.
//!
//! Strict precedence: explicit `security_id` (trusted, no catalog check) →
//! catalog lookup by symbol → live option-chain scan. Only exhausting all
//! applicable strategies is an error; every failure mode inside a strategy
//! degrades to "no match" so resolution fails uniformly.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::alert::Alert;
use crate::broker::traits::BrokerApi;
use crate::broker::types::OptionType;
use crate::catalog::InstrumentCatalog;
use crate::error::ResolutionError;

pub struct InstrumentResolver {
    catalog: InstrumentCatalog,
    broker: Arc<dyn BrokerApi>,
}

impl InstrumentResolver {
    pub fn new(catalog: InstrumentCatalog, broker: Arc<dyn BrokerApi>) -> Self {
        Self { catalog, broker }
    }

    pub async fn resolve(&self, alert: &Alert) -> Result<String, ResolutionError> {
        // The caller already named the canonical identifier.
        if let Some(id) = alert.security_id.as_deref() {
            let id = id.trim();
            if !id.is_empty() {
                return Ok(id.to_string());
            }
        }

        if let Some(symbol) = alert.symbol.as_deref() {
            if let Some(id) = self.catalog.lookup(symbol) {
                debug!("resolved {} via catalog: {}", symbol.trim(), id);
                return Ok(id);
            }
        }

        if let (Some(symbol), Some(expiry), Some(strike), Some(option_type)) = (
            alert.symbol.as_deref(),
            alert.expiry.as_deref(),
            alert.strike,
            alert.option_type.as_deref(),
        ) {
            if let Some(id) = self
                .resolve_via_option_chain(symbol, expiry, strike, option_type)
                .await
            {
                return Ok(id);
            }
        }

        Err(ResolutionError::NotFound {
            symbol: alert.display_symbol().to_string(),
        })
    }

    /// Network-bound fallback for contracts the catalog does not carry yet,
    /// typically short-dated options. Transport failures are logged and
    /// treated as "no match".
    async fn resolve_via_option_chain(
        &self,
        symbol: &str,
        expiry: &str,
        strike: f64,
        option_type: &str,
    ) -> Option<String> {
        let Some(want_type) = OptionType::parse(option_type) else {
            warn!("unrecognized option type '{}' for {}", option_type, symbol);
            return None;
        };
        let Some(want_strike) = Decimal::try_from(strike).ok().map(|d| d.normalize()) else {
            warn!("unusable strike {} for {}", strike, symbol);
            return None;
        };
        let expiry = match NaiveDate::parse_from_str(expiry.trim(), "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                warn!("unparseable expiry '{}' for {}: {}", expiry, symbol, e);
                return None;
            }
        };

        let underlying = symbol.trim().to_uppercase();
        let entries = match self
            .broker
            .option_chain(&underlying, &expiry.to_string())
            .await
        {
            Ok(entries) => entries,
            Err(e) => {
                warn!("option chain lookup failed for {}: {}", underlying, e);
                return None;
            }
        };

        let mut matches = entries
            .iter()
            .filter(|e| e.option_type == want_type && e.strike_price.normalize() == want_strike);
        let first = matches.next()?;
        if matches.next().is_some() {
            // Upstream data-quality condition; first in response order wins.
            warn!(
                "multiple option chain entries match {} {} {:?} {}, taking first",
                underlying, expiry, want_type, want_strike
            );
        }
        debug!(
            "resolved {} via option chain: {}",
            underlying, first.security_id
        );
        Some(first.security_id.clone())
    }
}
