use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mobicorp_core::{DomainError, DomainResult, Entity, OrderId, ProductId, UserId};

/// Sales order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
}

/// Entity: sales order.
///
/// Orders are placed at a customer-requested price and stay `Pending` until
/// a back-office user approves them with a final price (or rejects them).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    id: OrderId,
    product_id: ProductId,
    quantity: u32,
    requested_price: f64,
    final_price: Option<f64>,
    status: OrderStatus,
    placed_by: UserId,
    created_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
}

impl SalesOrder {
    /// Validate and place a new pending order.
    pub fn place(
        id: OrderId,
        product_id: ProductId,
        quantity: u32,
        requested_price: f64,
        placed_by: UserId,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        if !requested_price.is_finite() || requested_price <= 0.0 {
            return Err(DomainError::validation(
                "requested_price must be positive and finite",
            ));
        }

        Ok(Self {
            id,
            product_id,
            quantity,
            requested_price,
            final_price: None,
            status: OrderStatus::Pending,
            placed_by,
            created_at,
            approved_at: None,
        })
    }

    /// Approve a pending order with its final price.
    pub fn approve(&mut self, final_price: f64, at: DateTime<Utc>) -> DomainResult<()> {
        if self.status != OrderStatus::Pending {
            return Err(DomainError::conflict(format!(
                "only pending orders can be approved (status: {:?})",
                self.status
            )));
        }
        if !final_price.is_finite() || final_price <= 0.0 {
            return Err(DomainError::validation(
                "final_price must be positive and finite",
            ));
        }

        self.final_price = Some(final_price);
        self.status = OrderStatus::Approved;
        self.approved_at = Some(at);
        Ok(())
    }

    /// Reject a pending order.
    pub fn reject(&mut self) -> DomainResult<()> {
        if self.status != OrderStatus::Pending {
            return Err(DomainError::conflict(format!(
                "only pending orders can be rejected (status: {:?})",
                self.status
            )));
        }
        self.status = OrderStatus::Rejected;
        Ok(())
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn requested_price(&self) -> f64 {
        self.requested_price
    }

    pub fn final_price(&self) -> Option<f64> {
        self.final_price
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn placed_by(&self) -> UserId {
        self.placed_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }
}

impl Entity for SalesOrder {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
