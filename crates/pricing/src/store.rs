//! Consumed interfaces: the persistence store.
//!
//! Each append is all-or-nothing on its own; the engine never requires a
//! transaction spanning the comparison and alert writes.

use thiserror::Error;

use mobicorp_core::ProductId;
use mobicorp_products::Product;

use crate::alert::PriceAlert;
use crate::comparison::PriceComparison;

/// Storage-level failure, opaque to the domain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Read access to the product catalog.
pub trait ProductDirectory: Send + Sync {
    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;
}

/// Append-only store of comparison records.
pub trait ComparisonStore: Send + Sync {
    /// Commit one comparison record atomically.
    fn append(&self, record: PriceComparison) -> Result<(), StoreError>;

    /// List records, newest first, optionally filtered by product.
    fn list(
        &self,
        product_id: Option<ProductId>,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<PriceComparison>, StoreError>;

    /// Housekeeping: delete all records, returning how many were removed.
    fn purge_all(&self) -> Result<usize, StoreError>;
}

/// Append-only store of price alerts.
pub trait AlertStore: Send + Sync {
    /// Commit one alert record atomically.
    fn append(&self, alert: PriceAlert) -> Result<(), StoreError>;

    /// Most recent alerts, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<PriceAlert>, StoreError>;

    /// Housekeeping: delete all records, returning how many were removed.
    fn purge_all(&self) -> Result<usize, StoreError>;
}
