//! Consumed interface: the external market price source.

use async_trait::async_trait;
use thiserror::Error;

use crate::observation::MarketObservation;

/// Failure of the market source itself (transport, timeout).
///
/// Kept distinct from an empty result set: `Ok(vec![])` is a legitimate
/// "queried and found nothing" answer for an unknown product, while an
/// `Err` is transient and potentially retriable by the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarketSourceError {
    #[error("market source timed out")]
    Timeout,

    #[error("market source unavailable: {0}")]
    Unavailable(String),
}

/// Market price source: given a product name and category, return the
/// currently observable quotes.
///
/// One attempt per call; retry policy (none, today) belongs to the caller.
#[async_trait]
pub trait MarketPriceSource: Send + Sync {
    async fn fetch(
        &self,
        name: &str,
        category: &str,
    ) -> Result<Vec<MarketObservation>, MarketSourceError>;
}
