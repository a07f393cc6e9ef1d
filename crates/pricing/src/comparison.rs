//! Persisted snapshot of aggregated market statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mobicorp_core::{ComparisonId, Entity, ProductId, UserId};

use crate::stats::PriceStats;

/// Comparison record: one row of permanent history per suggestion request.
///
/// Immutable once created. Never created from zero observations — an empty
/// batch is an error upstream, not a zero-valued record here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub id: ComparisonId,
    pub product_id: ProductId,
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    pub suggested_price: f64,
    pub source_count: usize,
    pub requested_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl PriceComparison {
    pub fn record(
        id: ComparisonId,
        product_id: ProductId,
        stats: &PriceStats,
        requested_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_id,
            min_price: stats.min,
            max_price: stats.max,
            avg_price: stats.avg,
            suggested_price: stats.suggested,
            source_count: stats.sample_count,
            requested_by,
            created_at,
        }
    }
}

impl Entity for PriceComparison {
    type Id = ComparisonId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
