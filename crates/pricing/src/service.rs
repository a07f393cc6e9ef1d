//! Price suggestion service: the orchestrating operation of the engine.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use mobicorp_core::{AlertId, ComparisonId, ProductId, UserId};
use mobicorp_products::Product;

use crate::alert::{AlertDecision, AlertPolicy, PriceAlert};
use crate::comparison::PriceComparison;
use crate::observation::MarketObservation;
use crate::source::{MarketPriceSource, MarketSourceError};
use crate::stats::{MeanAggregator, PriceAggregator};
use crate::store::{AlertStore, ComparisonStore, ProductDirectory, StoreError};

/// Error taxonomy of the suggestion operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
    /// The referenced product identifier does not resolve.
    #[error("product not found")]
    ProductNotFound,

    /// The market source answered successfully but had no quotes.
    #[error("no market prices found for this product")]
    NoMarketData,

    /// The market source call failed or timed out (transient; distinct from
    /// a legitimate empty answer).
    #[error("market source unavailable: {0}")]
    MarketSourceUnavailable(#[from] MarketSourceError),

    /// A store write failed before anything was committed.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

/// What happened on the alert side of a successful suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AlertOutcome {
    /// Product has no base price; there is no baseline to compare against.
    Skipped,
    /// Deviation stayed within the threshold.
    Held { deviation: f64 },
    /// Alert persisted.
    Raised {
        alert_id: AlertId,
        variation_percent: f64,
    },
    /// Alert write failed after the comparison was already committed.
    /// Partial success: the suggestion stands, the alert does not.
    Failed { reason: String },
}

/// Payload returned to the caller on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSuggestion {
    pub suggested_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    pub market_sources: Vec<MarketObservation>,
    pub comparison_id: ComparisonId,
    pub alert: AlertOutcome,
}

/// Orchestrates one suggestion request: resolve product, fetch market
/// quotes (single attempt, bounded by `fetch_timeout`), aggregate, persist
/// the comparison, then evaluate the alert policy.
///
/// All collaborators are injected — the hosting layer owns their lifetimes.
pub struct PriceSuggestionService {
    products: Arc<dyn ProductDirectory>,
    market: Arc<dyn MarketPriceSource>,
    comparisons: Arc<dyn ComparisonStore>,
    alerts: Arc<dyn AlertStore>,
    aggregator: Arc<dyn PriceAggregator>,
    alert_policy: AlertPolicy,
    fetch_timeout: Duration,
}

impl PriceSuggestionService {
    pub fn new(
        products: Arc<dyn ProductDirectory>,
        market: Arc<dyn MarketPriceSource>,
        comparisons: Arc<dyn ComparisonStore>,
        alerts: Arc<dyn AlertStore>,
        alert_policy: AlertPolicy,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            products,
            market,
            comparisons,
            alerts,
            aggregator: Arc::new(MeanAggregator),
            alert_policy,
            fetch_timeout,
        }
    }

    /// Swap the aggregation strategy (defaults to [`MeanAggregator`]).
    pub fn with_aggregator(mut self, aggregator: Arc<dyn PriceAggregator>) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn alert_policy(&self) -> AlertPolicy {
        self.alert_policy
    }

    /// Suggest a price for `product_id` from current market observations.
    ///
    /// On success exactly one comparison record has been committed, and zero
    /// or one alert records. Any failure before the comparison write leaves
    /// no partial state.
    pub async fn suggest_price(
        &self,
        product_id: ProductId,
        requested_by: UserId,
    ) -> Result<PriceSuggestion, PricingError> {
        let product = self
            .products
            .get(product_id)?
            .ok_or(PricingError::ProductNotFound)?;

        let observations = match tokio::time::timeout(
            self.fetch_timeout,
            self.market.fetch(product.name(), product.category()),
        )
        .await
        {
            Err(_elapsed) => return Err(MarketSourceError::Timeout.into()),
            Ok(Err(e)) => return Err(e.into()),
            Ok(Ok(observations)) => observations,
        };

        let stats = self
            .aggregator
            .aggregate(&observations)
            .ok_or(PricingError::NoMarketData)?;

        let comparison = PriceComparison::record(
            ComparisonId::new(),
            product_id,
            &stats,
            requested_by,
            Utc::now(),
        );
        let comparison_id = comparison.id;
        self.comparisons.append(comparison)?;

        tracing::info!(
            product_id = %product_id,
            comparison_id = %comparison_id,
            source_count = stats.sample_count,
            avg_price = stats.avg,
            "price comparison recorded"
        );

        let alert = self.evaluate_alert(&product, stats.avg);

        Ok(PriceSuggestion {
            suggested_price: stats.suggested,
            min_price: stats.min,
            max_price: stats.max,
            avg_price: stats.avg,
            market_sources: observations,
            comparison_id,
            alert,
        })
    }

    /// Evaluate the alert policy against the product's base price.
    ///
    /// Never fails the caller's success path: a failed alert write is
    /// reported in the outcome, not propagated — the already-committed
    /// comparison stands.
    fn evaluate_alert(&self, product: &Product, market_avg: f64) -> AlertOutcome {
        let Some(base_price) = product.base_price() else {
            return AlertOutcome::Skipped;
        };

        match self.alert_policy.evaluate(base_price, market_avg) {
            AlertDecision::Hold { deviation } => AlertOutcome::Held { deviation },
            AlertDecision::Trigger { variation_percent } => {
                let alert = PriceAlert::record(
                    AlertId::new(),
                    product.id_typed(),
                    base_price,
                    market_avg,
                    variation_percent,
                    Utc::now(),
                );
                let alert_id = alert.id;

                match self.alerts.append(alert) {
                    Ok(()) => {
                        tracing::info!(
                            product_id = %product.id_typed(),
                            alert_id = %alert_id,
                            variation_percent,
                            "price alert raised"
                        );
                        AlertOutcome::Raised {
                            alert_id,
                            variation_percent,
                        }
                    }
                    Err(e) => {
                        tracing::warn!(
                            product_id = %product.id_typed(),
                            error = %e,
                            "price alert write failed; comparison already committed"
                        );
                        AlertOutcome::Failed {
                            reason: e.to_string(),
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use mobicorp_products::NewProduct;

    // ---- local fakes -------------------------------------------------

    struct FakeDirectory {
        products: HashMap<ProductId, Product>,
    }

    impl FakeDirectory {
        fn with(product: Product) -> Self {
            let mut products = HashMap::new();
            products.insert(product.id_typed(), product);
            Self { products }
        }
    }

    impl ProductDirectory for FakeDirectory {
        fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
            Ok(self.products.get(&id).cloned())
        }
    }

    enum FakeSource {
        Quotes(Vec<f64>),
        Empty,
        Down,
        Hanging,
    }

    #[async_trait]
    impl MarketPriceSource for FakeSource {
        async fn fetch(
            &self,
            _name: &str,
            _category: &str,
        ) -> Result<Vec<MarketObservation>, MarketSourceError> {
            match self {
                FakeSource::Quotes(prices) => Ok(prices
                    .iter()
                    .map(|p| MarketObservation::new("fake-source", *p, None).unwrap())
                    .collect()),
                FakeSource::Empty => Ok(vec![]),
                FakeSource::Down => {
                    Err(MarketSourceError::Unavailable("connection refused".to_string()))
                }
                FakeSource::Hanging => std::future::pending().await,
            }
        }
    }

    #[derive(Default)]
    struct RecordingComparisonStore {
        records: Mutex<Vec<PriceComparison>>,
    }

    impl ComparisonStore for RecordingComparisonStore {
        fn append(&self, record: PriceComparison) -> Result<(), StoreError> {
            self.records.lock().unwrap().push(record);
            Ok(())
        }

        fn list(
            &self,
            _product_id: Option<ProductId>,
            _skip: usize,
            _limit: usize,
        ) -> Result<Vec<PriceComparison>, StoreError> {
            Ok(self.records.lock().unwrap().clone())
        }

        fn purge_all(&self) -> Result<usize, StoreError> {
            let mut records = self.records.lock().unwrap();
            let n = records.len();
            records.clear();
            Ok(n)
        }
    }

    #[derive(Default)]
    struct RecordingAlertStore {
        alerts: Mutex<Vec<PriceAlert>>,
        fail_writes: bool,
    }

    impl RecordingAlertStore {
        fn failing() -> Self {
            Self {
                alerts: Mutex::new(Vec::new()),
                fail_writes: true,
            }
        }
    }

    impl AlertStore for RecordingAlertStore {
        fn append(&self, alert: PriceAlert) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(StoreError::backend("disk full"));
            }
            self.alerts.lock().unwrap().push(alert);
            Ok(())
        }

        fn recent(&self, _limit: usize) -> Result<Vec<PriceAlert>, StoreError> {
            Ok(self.alerts.lock().unwrap().clone())
        }

        fn purge_all(&self) -> Result<usize, StoreError> {
            let mut alerts = self.alerts.lock().unwrap();
            let n = alerts.len();
            alerts.clear();
            Ok(n)
        }
    }

    // ---- harness -----------------------------------------------------

    struct Harness {
        service: PriceSuggestionService,
        product_id: ProductId,
        comparisons: Arc<RecordingComparisonStore>,
        alerts: Arc<RecordingAlertStore>,
    }

    fn product(base_price: Option<f64>) -> Product {
        Product::create(
            ProductId::new(),
            NewProduct {
                name: "Executive Chair".to_string(),
                category: "chairs".to_string(),
                base_price,
                stock: 5,
                sku: None,
                image_url: None,
            },
            Utc::now(),
        )
        .unwrap()
    }

    fn harness(base_price: Option<f64>, source: FakeSource) -> Harness {
        harness_with_alerts(base_price, source, Arc::new(RecordingAlertStore::default()))
    }

    fn harness_with_alerts(
        base_price: Option<f64>,
        source: FakeSource,
        alerts: Arc<RecordingAlertStore>,
    ) -> Harness {
        let product = product(base_price);
        let product_id = product.id_typed();
        let comparisons = Arc::new(RecordingComparisonStore::default());

        let service = PriceSuggestionService::new(
            Arc::new(FakeDirectory::with(product)),
            Arc::new(source),
            comparisons.clone(),
            alerts.clone(),
            AlertPolicy::default(),
            Duration::from_millis(50),
        );

        Harness {
            service,
            product_id,
            comparisons,
            alerts,
        }
    }

    fn user() -> UserId {
        UserId::new()
    }

    // ---- behavior ----------------------------------------------------

    #[tokio::test]
    async fn suggestion_returns_stats_and_commits_comparison() {
        let h = harness(Some(100.0), FakeSource::Quotes(vec![100.0, 120.0, 140.0]));
        let requested_by = user();

        let suggestion = h.service.suggest_price(h.product_id, requested_by).await.unwrap();

        assert_eq!(suggestion.min_price, 100.0);
        assert_eq!(suggestion.max_price, 140.0);
        assert_eq!(suggestion.avg_price, 120.0);
        assert_eq!(suggestion.suggested_price, 120.0);
        assert_eq!(suggestion.market_sources.len(), 3);

        let records = h.comparisons.list(None, 0, 10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, suggestion.comparison_id);
        assert_eq!(records[0].product_id, h.product_id);
        assert_eq!(records[0].source_count, 3);
        assert_eq!(records[0].requested_by, requested_by);
    }

    #[tokio::test]
    async fn unknown_product_is_reported_without_side_effects() {
        let h = harness(Some(100.0), FakeSource::Quotes(vec![100.0]));

        let err = h.service.suggest_price(ProductId::new(), user()).await.unwrap_err();

        assert_eq!(err, PricingError::ProductNotFound);
        assert!(h.comparisons.list(None, 0, 10).unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_market_answer_is_no_market_data_and_writes_nothing() {
        let h = harness(Some(100.0), FakeSource::Empty);

        let err = h.service.suggest_price(h.product_id, user()).await.unwrap_err();

        assert_eq!(err, PricingError::NoMarketData);
        assert!(h.comparisons.list(None, 0, 10).unwrap().is_empty());
        assert!(h.alerts.recent(10).unwrap().is_empty());
    }

    #[tokio::test]
    async fn source_failure_is_distinct_from_empty_answer() {
        let h = harness(Some(100.0), FakeSource::Down);

        let err = h.service.suggest_price(h.product_id, user()).await.unwrap_err();

        match err {
            PricingError::MarketSourceUnavailable(MarketSourceError::Unavailable(_)) => {}
            other => panic!("expected MarketSourceUnavailable, got {other:?}"),
        }
        assert!(h.comparisons.list(None, 0, 10).unwrap().is_empty());
    }

    #[tokio::test]
    async fn hanging_source_times_out_as_unavailable() {
        let h = harness(Some(100.0), FakeSource::Hanging);

        let err = h.service.suggest_price(h.product_id, user()).await.unwrap_err();

        assert_eq!(
            err,
            PricingError::MarketSourceUnavailable(MarketSourceError::Timeout)
        );
        assert!(h.comparisons.list(None, 0, 10).unwrap().is_empty());
    }

    #[tokio::test]
    async fn fifteen_percent_drift_raises_alert() {
        // base 100, quotes averaging 115 -> deviation 0.15 > 0.10.
        let h = harness(Some(100.0), FakeSource::Quotes(vec![110.0, 115.0, 120.0]));

        let suggestion = h.service.suggest_price(h.product_id, user()).await.unwrap();

        match suggestion.alert {
            AlertOutcome::Raised { variation_percent, .. } => {
                assert!((variation_percent - 15.0).abs() < 1e-9);
            }
            other => panic!("expected Raised, got {other:?}"),
        }

        let alerts = h.alerts.recent(10).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].product_id, h.product_id);
        assert_eq!(alerts[0].old_price, 100.0);
        assert_eq!(alerts[0].new_price, 115.0);
        assert!((alerts[0].variation_percent - 15.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn five_percent_drift_stays_quiet() {
        let h = harness(Some(100.0), FakeSource::Quotes(vec![105.0]));

        let suggestion = h.service.suggest_price(h.product_id, user()).await.unwrap();

        match suggestion.alert {
            AlertOutcome::Held { deviation } => assert!((deviation - 0.05).abs() < 1e-12),
            other => panic!("expected Held, got {other:?}"),
        }
        assert!(h.alerts.recent(10).unwrap().is_empty());
    }

    #[tokio::test]
    async fn market_decrease_raises_negative_variation_alert() {
        let h = harness(Some(100.0), FakeSource::Quotes(vec![85.0]));

        let suggestion = h.service.suggest_price(h.product_id, user()).await.unwrap();

        match suggestion.alert {
            AlertOutcome::Raised { variation_percent, .. } => {
                assert!((variation_percent + 15.0).abs() < 1e-9);
            }
            other => panic!("expected Raised, got {other:?}"),
        }
        assert_eq!(h.alerts.recent(10).unwrap()[0].variation_percent, -15.0);
    }

    #[tokio::test]
    async fn missing_base_price_skips_alert_evaluation() {
        // Huge deviation, but no baseline to compare against.
        let h = harness(None, FakeSource::Quotes(vec![10_000.0]));

        let suggestion = h.service.suggest_price(h.product_id, user()).await.unwrap();

        assert_eq!(suggestion.alert, AlertOutcome::Skipped);
        assert!(h.alerts.recent(10).unwrap().is_empty());
        // The comparison is still committed.
        assert_eq!(h.comparisons.list(None, 0, 10).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn identical_invocations_append_independent_records() {
        let h = harness(Some(100.0), FakeSource::Quotes(vec![100.0, 102.0]));

        let first = h.service.suggest_price(h.product_id, user()).await.unwrap();
        let second = h.service.suggest_price(h.product_id, user()).await.unwrap();

        assert_ne!(first.comparison_id, second.comparison_id);
        assert_eq!(h.comparisons.list(None, 0, 10).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn alert_write_failure_does_not_fail_the_suggestion() {
        let h = harness_with_alerts(
            Some(100.0),
            FakeSource::Quotes(vec![120.0]),
            Arc::new(RecordingAlertStore::failing()),
        );

        let suggestion = h.service.suggest_price(h.product_id, user()).await.unwrap();

        // Partial success: comparison committed, alert reported as failed.
        assert_eq!(h.comparisons.list(None, 0, 10).unwrap().len(), 1);
        match suggestion.alert {
            AlertOutcome::Failed { reason } => assert!(reason.contains("disk full")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
