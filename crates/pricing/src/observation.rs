//! A single externally sourced price quote for a product.

use serde::{Deserialize, Serialize};

use mobicorp_core::{DomainError, DomainResult};

/// Market observation: one price quote tagged with its origin.
///
/// Observations are transient — produced per suggestion request, summarized
/// into a [`crate::PriceComparison`], and never stored individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketObservation {
    source: String,
    price: f64,
    url: Option<String>,
}

impl MarketObservation {
    /// Validate and create an observation. Prices must be positive and finite.
    pub fn new(
        source: impl Into<String>,
        price: f64,
        url: Option<String>,
    ) -> DomainResult<Self> {
        let source = source.into().trim().to_string();
        if source.is_empty() {
            return Err(DomainError::validation("observation source cannot be empty"));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(DomainError::validation(
                "observed price must be positive and finite",
            ));
        }

        Ok(Self { source, price, url })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
