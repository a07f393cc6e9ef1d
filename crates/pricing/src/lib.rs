//! `mobicorp-pricing` — price comparison and alerting engine.
//!
//! The core decision logic of the system: aggregate externally observed
//! market prices into summary statistics, persist an immutable comparison
//! record, and conditionally raise a price-variation alert when the
//! product's base price has drifted from the market average beyond a
//! configured threshold.

pub mod alert;
pub mod comparison;
pub mod observation;
pub mod service;
pub mod source;
pub mod stats;
pub mod store;

pub use alert::{AlertDecision, AlertPolicy, PriceAlert};
pub use comparison::PriceComparison;
pub use observation::MarketObservation;
pub use service::{AlertOutcome, PriceSuggestion, PriceSuggestionService, PricingError};
pub use source::{MarketPriceSource, MarketSourceError};
pub use stats::{MeanAggregator, PriceAggregator, PriceStats};
pub use store::{AlertStore, ComparisonStore, ProductDirectory, StoreError};
