use std::sync::RwLock;

use mobicorp_core::ProductId;
use mobicorp_pricing::{
    AlertStore, ComparisonStore, PriceAlert, PriceComparison, StoreError,
};

/// In-memory append-only store of comparison records.
///
/// Intended for tests/dev. Records are never mutated after append; bulk
/// purge exists for housekeeping only.
#[derive(Debug, Default)]
pub struct InMemoryComparisonStore {
    records: RwLock<Vec<PriceComparison>>,
}

impl InMemoryComparisonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl ComparisonStore for InMemoryComparisonStore {
    fn append(&self, record: PriceComparison) -> Result<(), StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        records.push(record);
        Ok(())
    }

    fn list(
        &self,
        product_id: Option<ProductId>,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<PriceComparison>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;

        let mut matching: Vec<PriceComparison> = records
            .iter()
            .filter(|r| product_id.is_none_or(|p| r.product_id == p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching.into_iter().skip(skip).take(limit).collect())
    }

    fn purge_all(&self) -> Result<usize, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        let removed = records.len();
        records.clear();
        tracing::debug!(removed, "purged comparison records");
        Ok(removed)
    }
}

/// In-memory append-only store of price alerts.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAlertStore {
    alerts: RwLock<Vec<PriceAlert>>,
}

impl InMemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlertStore for InMemoryAlertStore {
    fn append(&self, alert: PriceAlert) -> Result<(), StoreError> {
        let mut alerts = self
            .alerts
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        alerts.push(alert);
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<PriceAlert>, StoreError> {
        let alerts = self
            .alerts
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;

        let mut all: Vec<PriceAlert> = alerts.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all.into_iter().take(limit).collect())
    }

    fn purge_all(&self) -> Result<usize, StoreError> {
        let mut alerts = self
            .alerts
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        let removed = alerts.len();
        alerts.clear();
        tracing::debug!(removed, "purged price alerts");
        Ok(removed)
    }
}
