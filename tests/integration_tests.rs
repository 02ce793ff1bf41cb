//! Integration tests for the alert-to-order pipeline.
//! These tests verify that components work together correctly.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use alert_bridge::broker::traits::{BrokerApi, BrokerResult};
use alert_bridge::broker::types::{
    ExchangeSegment, OptionChainEntry, OptionType, OrderAck, OrderIntent, OrderType, ProductType,
    TransactionType,
};
use alert_bridge::catalog::InstrumentCatalog;
use alert_bridge::error::TranslationError;
use alert_bridge::services::resolver::InstrumentResolver;
use alert_bridge::services::translator::AlertTranslator;
use alert_bridge::Alert;

/// Broker stub: records every submitted intent, serves a canned option chain.
struct StubBroker {
    chain: Vec<OptionChainEntry>,
    placed: Mutex<Vec<OrderIntent>>,
}

impl StubBroker {
    fn new(chain: Vec<OptionChainEntry>) -> Arc<Self> {
        Arc::new(Self {
            chain,
            placed: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl BrokerApi for StubBroker {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn place_order(&self, intent: &OrderIntent) -> BrokerResult<OrderAck> {
        self.placed.lock().unwrap().push(intent.clone());
        Ok(OrderAck {
            order_id: "112111182198".to_string(),
            status: "TRANSIT".to_string(),
            raw: json!({"orderId": "112111182198", "orderStatus": "TRANSIT"}),
        })
    }

    async fn option_chain(
        &self,
        _underlying: &str,
        _expiry: &str,
    ) -> BrokerResult<Vec<OptionChainEntry>> {
        Ok(self.chain.clone())
    }
}

fn pipeline(catalog: InstrumentCatalog, broker: Arc<StubBroker>) -> AlertTranslator {
    AlertTranslator::new(InstrumentResolver::new(catalog, broker))
}

const SCRIP_CSV: &str = "\
DISPLAY_NAME,UNDERLYING_SYMBOL,SM_EXPIRY_DATE,OPTION_TYPE,STRIKE_PRICE,SECURITY_ID
NIFTY24OCT22000CE,NIFTY,2024-10-31,CE,22000.00,49081
";

/// The worked scenario: catalog-backed alert with every default applied,
/// then submitted once.
#[tokio::test]
async fn test_webhook_alert_to_submitted_order() {
    let catalog = InstrumentCatalog::new();
    catalog.load_from_csv(SCRIP_CSV).unwrap();
    let broker = StubBroker::new(Vec::new());
    let translator = pipeline(catalog, broker.clone());

    // Decoded the same way the webhook handler does it.
    let body = json!({"action": "BUY", "quantity": 50, "symbol": "NIFTY24OCT22000CE"});
    let alert: Alert = serde_json::from_value(body).unwrap();

    let intent = translator.translate(&alert).await.unwrap();
    assert_eq!(intent.transaction_type, TransactionType::Buy);
    assert_eq!(intent.security_id, "49081");
    assert_eq!(intent.quantity, 50);
    assert_eq!(intent.exchange_segment, ExchangeSegment::NseFno);
    assert_eq!(intent.product_type, ProductType::Intra);
    assert_eq!(intent.order_type, OrderType::Market);
    assert_eq!(intent.price, 0.0);

    // Submission is the caller's responsibility and happens exactly once.
    let ack = broker.place_order(&intent).await.unwrap();
    assert_eq!(ack.order_id, "112111182198");
    assert_eq!(broker.placed.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_option_chain_fallback_end_to_end() {
    // Short-dated contract absent from the catalog, present in the chain.
    let broker = StubBroker::new(vec![
        OptionChainEntry {
            strike_price: "21500".parse().unwrap(),
            option_type: OptionType::Call,
            security_id: "48001".to_string(),
        },
        OptionChainEntry {
            strike_price: "22000.00".parse().unwrap(),
            option_type: OptionType::Call,
            security_id: "48002".to_string(),
        },
    ]);
    let translator = pipeline(InstrumentCatalog::new(), broker);

    let body = json!({
        "action": "SELL",
        "quantity": 25,
        "symbol": "NIFTY",
        "expiry": "2024-10-31",
        "strike": 22000.0,
        "option_type": "CE",
        "product_type": "MARGIN"
    });
    let alert: Alert = serde_json::from_value(body).unwrap();

    let intent = translator.translate(&alert).await.unwrap();
    assert_eq!(intent.transaction_type, TransactionType::Sell);
    assert_eq!(intent.security_id, "48002");
    assert_eq!(intent.product_type, ProductType::Margin);
}

#[tokio::test]
async fn test_empty_catalog_and_no_chain_match_is_unresolved() {
    let broker = StubBroker::new(Vec::new());
    let translator = pipeline(InstrumentCatalog::new(), broker.clone());

    let alert: Alert = serde_json::from_value(json!({
        "action": "BUY",
        "quantity": 50,
        "symbol": "NIFTY24OCT22000CE"
    }))
    .unwrap();

    let err = translator.translate(&alert).await.unwrap_err();
    assert!(matches!(err, TranslationError::UnresolvedInstrument { .. }));
    assert!(broker.placed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_catalog_reload_is_visible_to_next_translation() {
    let catalog = InstrumentCatalog::new();
    let broker = StubBroker::new(Vec::new());
    let translator = pipeline(catalog.clone(), broker);

    let alert: Alert = serde_json::from_value(json!({
        "action": "BUY",
        "quantity": 50,
        "symbol": "NIFTY24OCT22000CE"
    }))
    .unwrap();

    assert!(translator.translate(&alert).await.is_err());

    // Out-of-band refresh swaps the mapping; the same translator sees it.
    catalog.load_from_csv(SCRIP_CSV).unwrap();
    let intent = translator.translate(&alert).await.unwrap();
    assert_eq!(intent.security_id, "49081");
}

#[tokio::test]
async fn test_malformed_alert_body_fails_decoding() {
    // Shape mismatch the webhook handler converts into a 400.
    let body = json!({"action": "BUY", "quantity": "fifty"});
    let decoded: Result<Alert, _> = serde_json::from_value(body);
    assert!(decoded.is_err());
}
