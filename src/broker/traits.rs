use async_trait::async_trait;

use crate::error::BrokerError;

use super::types::{OptionChainEntry, OrderAck, OrderIntent};

pub type BrokerResult<T> = Result<T, BrokerError>;

/// The external broker collaborator. Owns authentication/session state and
/// the actual order submission; the translation pipeline only ever hands it
/// a finished [`OrderIntent`].
#[async_trait]
pub trait BrokerApi: Send + Sync {
    fn name(&self) -> &'static str;

    async fn place_order(&self, intent: &OrderIntent) -> BrokerResult<OrderAck>;

    /// Live option chain for an underlying and expiry, flattened to
    /// strike/type/id rows.
    async fn option_chain(
        &self,
        underlying: &str,
        expiry: &str,
    ) -> BrokerResult<Vec<OptionChainEntry>>;
}
