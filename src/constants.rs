//! Application-wide constants and magic values
//!
//! This module centralizes all hardcoded values to improve maintainability
//! and make the codebase easier to tune.

/// Normalization defaults for categorical order fields.
///
/// Unrecognized or missing values fall back to these; they are never an
/// error at the normalization layer.
pub mod normalize {
    use crate::broker::types::{ExchangeSegment, OrderType, ProductType};

    /// Derivatives-first deployment: alerts without an exchange segment
    /// route to the NSE futures & options segment.
    pub const DEFAULT_EXCHANGE_SEGMENT: ExchangeSegment = ExchangeSegment::NseFno;

    pub const DEFAULT_PRODUCT_TYPE: ProductType = ProductType::Intra;

    pub const DEFAULT_ORDER_TYPE: OrderType = OrderType::Market;

    /// Only meaningful for LIMIT orders; a LIMIT order at price 0 is passed
    /// through, the broker owns that validation.
    pub const DEFAULT_PRICE: f64 = 0.0;
}

/// Column names of the broker's scrip-master CSV.
pub mod catalog {
    /// Preferred display-name column.
    pub const DISPLAY_NAME: &str = "DISPLAY_NAME";

    /// Fallback display-name column on older dumps.
    pub const SYMBOL_NAME: &str = "SYMBOL_NAME";

    pub const SECURITY_ID: &str = "SECURITY_ID";
    pub const UNDERLYING_SYMBOL: &str = "UNDERLYING_SYMBOL";
    pub const EXPIRY_DATE: &str = "SM_EXPIRY_DATE";
    pub const OPTION_TYPE: &str = "OPTION_TYPE";
    pub const STRIKE_PRICE: &str = "STRIKE_PRICE";
}

/// Broker client constants
pub mod broker {
    /// Order validity sent with every order; the bridge places intraday
    /// instructions only.
    pub const ORDER_VALIDITY: &str = "DAY";

    /// Underlying segment used for index option-chain queries.
    pub const OPTION_CHAIN_SEGMENT: &str = "IDX_I";
}
