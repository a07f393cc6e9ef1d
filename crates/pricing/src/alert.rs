//! Alert policy: decide whether a base price has drifted too far from market.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mobicorp_core::{AlertId, DomainError, DomainResult, Entity, ProductId};

/// Relative-deviation threshold above which an alert fires.
///
/// The single most consequential business rule in the system, so it is an
/// explicit, validated parameter rather than a literal buried in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertPolicy {
    threshold: f64,
}

impl AlertPolicy {
    /// Default trigger threshold: 10% relative deviation.
    pub const DEFAULT_THRESHOLD: f64 = 0.10;

    pub fn new(threshold: f64) -> DomainResult<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(DomainError::validation(
                "alert threshold must be positive and finite",
            ));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Compare a product's base price against a freshly computed market
    /// average.
    ///
    /// Deviation is relative to the base price; the trigger is strict
    /// (`deviation > threshold`, so exactly-at-threshold holds). The caller
    /// decides what "no base price" means — this policy requires a baseline.
    pub fn evaluate(&self, base_price: f64, market_avg: f64) -> AlertDecision {
        let deviation = (base_price - market_avg).abs() / base_price;
        if deviation > self.threshold {
            AlertDecision::Trigger {
                // Signed: positive means the market moved above the base price.
                variation_percent: (market_avg - base_price) / base_price * 100.0,
            }
        } else {
            AlertDecision::Hold { deviation }
        }
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

/// Outcome of one policy evaluation. No further lifecycle — an alert either
/// fires on this invocation or it does not exist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertDecision {
    /// Deviation within tolerance; nothing to record.
    Hold { deviation: f64 },
    /// Deviation exceeded the threshold; record an alert.
    Trigger { variation_percent: f64 },
}

/// Persisted price-variation alert. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    pub id: AlertId,
    pub product_id: ProductId,
    /// Product base price at evaluation time.
    pub old_price: f64,
    /// Market average that triggered the alert.
    pub new_price: f64,
    /// Signed percentage; negative for a market decrease.
    pub variation_percent: f64,
    pub created_at: DateTime<Utc>,
}

impl PriceAlert {
    pub fn record(
        id: AlertId,
        product_id: ProductId,
        old_price: f64,
        new_price: f64,
        variation_percent: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_id,
            old_price,
            new_price,
            variation_percent,
            created_at,
        }
    }
}

impl Entity for PriceAlert {
    type Id = AlertId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifteen_percent_increase_triggers() {
        let decision = AlertPolicy::default().evaluate(100.0, 115.0);
        match decision {
            AlertDecision::Trigger { variation_percent } => {
                assert_eq!(variation_percent, 15.0);
            }
            other => panic!("expected Trigger, got {other:?}"),
        }
    }

    #[test]
    fn five_percent_deviation_holds() {
        let decision = AlertPolicy::default().evaluate(100.0, 105.0);
        match decision {
            AlertDecision::Hold { deviation } => {
                assert!((deviation - 0.05).abs() < 1e-12);
            }
            other => panic!("expected Hold, got {other:?}"),
        }
    }

    #[test]
    fn decrease_preserves_sign() {
        let decision = AlertPolicy::default().evaluate(100.0, 85.0);
        match decision {
            AlertDecision::Trigger { variation_percent } => {
                assert_eq!(variation_percent, -15.0);
            }
            other => panic!("expected Trigger, got {other:?}"),
        }
    }

    #[test]
    fn exactly_at_threshold_holds() {
        // Strict comparison: 10% deviation with the default 0.10 threshold
        // does not fire.
        let decision = AlertPolicy::default().evaluate(100.0, 110.0);
        match decision {
            AlertDecision::Hold { .. } => {}
            other => panic!("expected Hold, got {other:?}"),
        }
    }

    #[test]
    fn custom_threshold_is_honored() {
        let policy = AlertPolicy::new(0.20).unwrap();
        match policy.evaluate(100.0, 115.0) {
            AlertDecision::Hold { .. } => {}
            other => panic!("expected Hold under 20% threshold, got {other:?}"),
        }
        match policy.evaluate(100.0, 125.0) {
            AlertDecision::Trigger { variation_percent } => {
                assert_eq!(variation_percent, 25.0);
            }
            other => panic!("expected Trigger, got {other:?}"),
        }
    }

    #[test]
    fn policy_rejects_invalid_thresholds() {
        for bad in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let err = AlertPolicy::new(bad).unwrap_err();
            match err {
                DomainError::Validation(_) => {}
                other => panic!("expected Validation for {bad}, got {other:?}"),
            }
        }
    }
}
