//! Dhan v2 REST client.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::DhanConfig;
use crate::constants::broker as broker_constants;
use crate::error::BrokerError;

use super::traits::{BrokerApi, BrokerResult};
use super::types::{
    ExchangeSegment, OptionChainEntry, OptionType, OrderAck, OrderIntent, OrderType, ProductType,
    TransactionType,
};

#[derive(Clone)]
pub struct DhanClient {
    client: Client,
    base_url: String,
    client_id: String,
    access_token: String,
}

/// Wire shape of the Dhan v2 order endpoint.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct DhanOrderRequest<'a> {
    dhan_client_id: &'a str,
    transaction_type: TransactionType,
    exchange_segment: ExchangeSegment,
    product_type: ProductType,
    order_type: OrderType,
    validity: &'a str,
    security_id: &'a str,
    quantity: u32,
    price: f64,
}

impl DhanClient {
    /// Build the client from config, with env overrides for credentials
    /// (`DHAN_CLIENT_ID`, `DHAN_ACCESS_TOKEN`).
    pub fn new(config: &DhanConfig) -> Self {
        let client_id = env::var("DHAN_CLIENT_ID").unwrap_or_else(|_| config.client_id.clone());
        let access_token = env::var("DHAN_ACCESS_TOKEN")
            .ok()
            .or_else(|| config.access_token.clone())
            .unwrap_or_default();

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .expect("Failed to create HTTP client for Dhan"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id,
            access_token,
        }
    }

    async fn post_json(&self, path: &str, body: &Value) -> BrokerResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .header("access-token", &self.access_token)
            .header("client-id", &self.client_id)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BrokerError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl BrokerApi for DhanClient {
    fn name(&self) -> &'static str {
        "dhan"
    }

    async fn place_order(&self, intent: &OrderIntent) -> BrokerResult<OrderAck> {
        let wire = DhanOrderRequest {
            dhan_client_id: &self.client_id,
            transaction_type: intent.transaction_type,
            exchange_segment: intent.exchange_segment,
            product_type: intent.product_type,
            order_type: intent.order_type,
            validity: broker_constants::ORDER_VALIDITY,
            security_id: &intent.security_id,
            quantity: intent.quantity,
            price: intent.price,
        };
        let body = serde_json::to_value(&wire)?;
        let raw = self.post_json("/v2/orders", &body).await?;

        // No order id in a 2xx body means the broker rejected it anyway.
        let Some(order_id) = raw
            .get("orderId")
            .and_then(|v| v.as_str().map(str::to_string).or_else(|| v.as_i64().map(|n| n.to_string())))
        else {
            return Err(BrokerError::Rejected {
                reason: raw.to_string(),
            });
        };
        let status = raw
            .get("orderStatus")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(OrderAck {
            order_id,
            status,
            raw,
        })
    }

    async fn option_chain(
        &self,
        underlying: &str,
        expiry: &str,
    ) -> BrokerResult<Vec<OptionChainEntry>> {
        let body = json!({
            "UnderlyingScrip": underlying,
            "UnderlyingSeg": broker_constants::OPTION_CHAIN_SEGMENT,
            "Expiry": expiry,
        });
        let raw = self.post_json("/v2/optionchain", &body).await?;

        // Response nests strikes as {"data":{"oc":{"25000.0":{"ce":{...},"pe":{...}}}}}.
        let mut entries = Vec::new();
        let Some(chain) = raw
            .get("data")
            .and_then(|d| d.get("oc"))
            .and_then(|v| v.as_object())
        else {
            debug!("option chain for {} {} returned no strikes", underlying, expiry);
            return Ok(entries);
        };

        for (strike_str, node) in chain {
            let Ok(strike) = strike_str.trim().parse::<rust_decimal::Decimal>() else {
                continue;
            };
            let strike = strike.normalize();
            for (leg, option_type) in [("ce", OptionType::Call), ("pe", OptionType::Put)] {
                let id = node.get(leg).and_then(|n| {
                    n.get("security_id")
                        .or_else(|| n.get("securityId"))
                        .and_then(|v| {
                            v.as_str()
                                .map(str::to_string)
                                .or_else(|| v.as_i64().map(|n| n.to_string()))
                        })
                });
                if let Some(security_id) = id {
                    entries.push(OptionChainEntry {
                        strike_price: strike,
                        option_type,
                        security_id,
                    });
                }
            }
        }
        Ok(entries)
    }
}
