//! Price aggregation: observations in, summary statistics out.

use serde::{Deserialize, Serialize};

use crate::observation::MarketObservation;

/// Summary statistics over one batch of market observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    /// Price the engine recommends. The default strategy pins this to `avg`.
    pub suggested: f64,
    pub sample_count: usize,
}

/// Aggregation strategy seam.
///
/// The current product decision is a plain mean with no outlier filtering or
/// source weighting. That is a deliberate simplification — replace the
/// strategy here, not inline in the service, when it changes.
pub trait PriceAggregator: Send + Sync {
    /// Returns `None` for an empty batch; there are no zero-value statistics.
    fn aggregate(&self, observations: &[MarketObservation]) -> Option<PriceStats>;
}

/// Default strategy: unweighted mean, `suggested == avg`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAggregator;

impl PriceAggregator for MeanAggregator {
    fn aggregate(&self, observations: &[MarketObservation]) -> Option<PriceStats> {
        if observations.is_empty() {
            return None;
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for obs in observations {
            let price = obs.price();
            min = min.min(price);
            max = max.max(price);
            sum += price;
        }

        // Clamp so `min <= avg <= max` holds exactly even when summation
        // rounding nudges the mean past an endpoint.
        let avg = (sum / observations.len() as f64).clamp(min, max);

        Some(PriceStats {
            min,
            max,
            avg,
            suggested: avg,
            sample_count: observations.len(),
        })
    }
}
