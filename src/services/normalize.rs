//! Categorical field normalization.
//!
//! Pure function, no failure path: unrecognized values fall back to the
//! documented defaults in [`crate::constants::normalize`]. The one required
//! categorical field, `action`, is validated by the translator instead.

use crate::alert::Alert;
use crate::broker::types::{ExchangeSegment, OrderType, ProductType};
use crate::constants::normalize as defaults;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedFields {
    pub exchange_segment: ExchangeSegment,
    pub product_type: ProductType,
    pub order_type: OrderType,
    pub price: f64,
}

pub fn normalize(alert: &Alert) -> NormalizedFields {
    NormalizedFields {
        exchange_segment: alert
            .exchange_segment
            .as_deref()
            .and_then(ExchangeSegment::parse)
            .unwrap_or(defaults::DEFAULT_EXCHANGE_SEGMENT),
        product_type: alert
            .product_type
            .as_deref()
            .and_then(ProductType::parse)
            .unwrap_or(defaults::DEFAULT_PRODUCT_TYPE),
        order_type: alert
            .order_type
            .as_deref()
            .and_then(OrderType::parse)
            .unwrap_or(defaults::DEFAULT_ORDER_TYPE),
        price: alert.price.unwrap_or(defaults::DEFAULT_PRICE),
    }
}
