//! Infrastructure wiring: stores, market source, suggestion engine.
//!
//! All collaborators are constructed here and injected explicitly — the
//! hosting layer owns their lifetimes; there are no process-wide singletons.

use std::sync::Arc;

use mobicorp_infra::{
    InMemoryAlertStore, InMemoryComparisonStore, InMemoryOrderStore, InMemoryProductStore,
    SimulatedMarketSource,
};
use mobicorp_pricing::{AlertPolicy, PriceSuggestionService};

use crate::app::AppConfig;

pub struct AppServices {
    pub products: Arc<InMemoryProductStore>,
    pub orders: Arc<InMemoryOrderStore>,
    pub comparisons: Arc<InMemoryComparisonStore>,
    pub alerts: Arc<InMemoryAlertStore>,
    pub suggestions: PriceSuggestionService,
}

pub fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let products = Arc::new(InMemoryProductStore::new());
    let orders = Arc::new(InMemoryOrderStore::new());
    let comparisons = Arc::new(InMemoryComparisonStore::new());
    let alerts = Arc::new(InMemoryAlertStore::new());
    let market = Arc::new(SimulatedMarketSource::new());

    let alert_policy = AlertPolicy::new(config.alert_threshold)?;

    let suggestions = PriceSuggestionService::new(
        products.clone(),
        market,
        comparisons.clone(),
        alerts.clone(),
        alert_policy,
        config.fetch_timeout,
    );

    Ok(AppServices {
        products,
        orders,
        comparisons,
        alerts,
        suggestions,
    })
}
