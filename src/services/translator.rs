//! Alert translation: one linear pass from inbound alert to order intent.
//!
//! All-or-nothing: no partial intent is ever returned, and the translator
//! never submits the order itself. Submission stays with the caller so
//! translation is side-effect-free and independently testable.

use tracing::debug;

use crate::alert::Alert;
use crate::broker::types::{OrderIntent, TransactionType};
use crate::error::TranslationError;

use super::normalize::normalize;
use super::resolver::InstrumentResolver;

pub struct AlertTranslator {
    resolver: InstrumentResolver,
}

impl AlertTranslator {
    pub fn new(resolver: InstrumentResolver) -> Self {
        Self { resolver }
    }

    pub async fn translate(&self, alert: &Alert) -> Result<OrderIntent, TranslationError> {
        let action = alert
            .action
            .as_deref()
            .ok_or_else(|| TranslationError::InvalidRequest("missing required field: action".into()))?;
        let transaction_type = TransactionType::parse(action).ok_or_else(|| {
            TranslationError::InvalidRequest(format!("unsupported action: {}", action.trim()))
        })?;

        let quantity = alert.quantity.ok_or_else(|| {
            TranslationError::InvalidRequest("missing required field: quantity".into())
        })?;
        if quantity <= 0 {
            return Err(TranslationError::InvalidRequest(format!(
                "quantity must be a positive integer, got {}",
                quantity
            )));
        }
        let quantity = u32::try_from(quantity).map_err(|_| {
            TranslationError::InvalidRequest(format!("quantity out of range: {}", quantity))
        })?;

        if !alert.has_instrument_reference() {
            return Err(TranslationError::InvalidRequest(
                "alert must carry a security_id or a symbol".into(),
            ));
        }

        let security_id = self.resolver.resolve(alert).await?;
        let fields = normalize(alert);

        let intent = OrderIntent {
            transaction_type,
            security_id,
            quantity,
            exchange_segment: fields.exchange_segment,
            product_type: fields.product_type,
            order_type: fields.order_type,
            price: fields.price,
        };
        debug!("translated alert into {:?}", intent);
        Ok(intent)
    }
}
