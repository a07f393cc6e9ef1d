use std::sync::RwLock;

use mobicorp_core::OrderId;
use mobicorp_pricing::StoreError;
use mobicorp_sales::SalesOrder;

/// In-memory sales order store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<SalesOrder>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, order: SalesOrder) -> Result<(), StoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        orders.push(order);
        Ok(())
    }

    pub fn get(&self, id: OrderId) -> Result<Option<SalesOrder>, StoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        Ok(orders.iter().find(|o| o.id_typed() == id).cloned())
    }

    /// Replace a stored order with an updated copy (same id).
    pub fn save(&self, order: SalesOrder) -> Result<(), StoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        match orders.iter_mut().find(|o| o.id_typed() == order.id_typed()) {
            Some(slot) => {
                *slot = order;
                Ok(())
            }
            None => Err(StoreError::backend("order vanished during update")),
        }
    }

    /// List orders, newest first.
    pub fn list(&self, skip: usize, limit: usize) -> Result<Vec<SalesOrder>, StoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;

        let mut all: Vec<SalesOrder> = orders.clone();
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(all.into_iter().skip(skip).take(limit).collect())
    }
}
