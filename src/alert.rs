//! Inbound webhook payload.

use serde::Deserialize;

/// One trading alert as posted to `/webhook`.
///
/// Everything is optional at the wire level; the translator decides what is
/// actually required. The instrument is named either directly via
/// `security_id` or indirectly via `{symbol, expiry, strike, option_type}`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Alert {
    pub action: Option<String>,
    pub quantity: Option<i64>,

    pub security_id: Option<String>,
    pub symbol: Option<String>,
    pub expiry: Option<String>,
    pub strike: Option<f64>,
    pub option_type: Option<String>,

    pub exchange_segment: Option<String>,
    pub product_type: Option<String>,
    pub order_type: Option<String>,
    pub price: Option<f64>,
}

impl Alert {
    /// True when the alert names an instrument at all, directly or
    /// symbolically.
    pub fn has_instrument_reference(&self) -> bool {
        self.security_id.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self.symbol.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// Best instrument name available, for diagnostics.
    pub fn display_symbol(&self) -> &str {
        self.symbol
            .as_deref()
            .or(self.security_id.as_deref())
            .unwrap_or("<unspecified>")
    }
}
