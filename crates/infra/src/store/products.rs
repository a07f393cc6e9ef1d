use std::sync::RwLock;

use mobicorp_core::ProductId;
use mobicorp_pricing::{ProductDirectory, StoreError};
use mobicorp_products::Product;

/// In-memory product catalog store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self
            .products
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        products.push(product);
        Ok(())
    }

    /// List products in insertion order, optionally filtered by category.
    pub fn list(
        &self,
        category: Option<&str>,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Product>, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;

        Ok(products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category() == c))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        Ok(products.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl ProductDirectory for InMemoryProductStore {
    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        Ok(products.iter().find(|p| p.id_typed() == id).cloned())
    }
}
