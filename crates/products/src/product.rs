use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mobicorp_core::{DomainError, DomainResult, Entity, ProductId};

/// Input for creating a catalog product.
///
/// `base_price` is the internally recorded cost/reference price. It is
/// optional: products without one are still sellable, but price-alert
/// evaluation is suppressed for them (no baseline to compare against).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub base_price: Option<f64>,
    #[serde(default)]
    pub stock: u32,
    pub sku: Option<String>,
    pub image_url: Option<String>,
}

/// Entity: catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: String,
    base_price: Option<f64>,
    stock: u32,
    sku: Option<String>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl Product {
    /// Validate and create a product.
    pub fn create(id: ProductId, input: NewProduct, created_at: DateTime<Utc>) -> DomainResult<Self> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let category = input.category.trim().to_string();
        if category.is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }

        if let Some(price) = input.base_price {
            if !price.is_finite() || price <= 0.0 {
                return Err(DomainError::validation("base_price must be positive and finite"));
            }
        }

        let sku = match input.sku {
            Some(s) => {
                let s = s.trim().to_string();
                if s.is_empty() {
                    return Err(DomainError::validation("SKU cannot be blank when provided"));
                }
                Some(s)
            }
            None => None,
        };

        Ok(Self {
            id,
            name,
            category,
            base_price: input.base_price,
            stock: input.stock,
            sku,
            image_url: input.image_url,
            created_at,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Internally recorded cost/reference price, if any.
    pub fn base_price(&self) -> Option<f64> {
        self.base_price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
