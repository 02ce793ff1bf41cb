//! Broker-facing order vocabulary and response types.
//!
//! Every categorical order field is a tagged enum whose serialized form is
//! exactly the broker's accepted constant. Raw user strings never reach the
//! wire.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    /// Case-insensitive parse. There is no default: action is required
    /// upstream and anything unrecognized is a validation error there.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Some(Self::Buy),
            "SELL" => Some(Self::Sell),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExchangeSegment {
    Nse,
    NseFno,
    BseFno,
    Mcx,
}

impl ExchangeSegment {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NSE" => Some(Self::Nse),
            "NSE_FNO" => Some(Self::NseFno),
            "BSE_FNO" => Some(Self::BseFno),
            "MCX" => Some(Self::Mcx),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Intra,
    Cnc,
    Margin,
    Co,
    Bo,
}

impl ProductType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INTRA" => Some(Self::Intra),
            "CNC" => Some(Self::Cnc),
            "MARGIN" => Some(Self::Margin),
            "CO" => Some(Self::Co),
            "BO" => Some(Self::Bo),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MARKET" => Some(Self::Market),
            "LIMIT" => Some(Self::Limit),
            _ => None,
        }
    }
}

/// Option leg. Instruments without one (equities, futures) carry
/// `Option<OptionType>::None` in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Accepts both the exchange short form (CE/PE) and the long form.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CE" | "CALL" => Some(Self::Call),
            "PE" | "PUT" => Some(Self::Put),
            _ => None,
        }
    }
}

/// The validated, fully-resolved order. Built exactly once per alert,
/// immutable afterwards, submitted at most once.
#[derive(Clone, Debug, Serialize)]
pub struct OrderIntent {
    pub transaction_type: TransactionType,
    pub security_id: String,
    pub quantity: u32,
    pub exchange_segment: ExchangeSegment,
    pub product_type: ProductType,
    pub order_type: OrderType,
    pub price: f64,
}

/// Broker acknowledgement for a placed order. `raw` keeps the untouched
/// response body for the HTTP reply envelope.
#[derive(Clone, Debug)]
pub struct OrderAck {
    pub order_id: String,
    pub status: String,
    pub raw: Value,
}

/// One flattened option-chain row used by the resolution fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionChainEntry {
    pub strike_price: Decimal,
    pub option_type: OptionType,
    pub security_id: String,
}
