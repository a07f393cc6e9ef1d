//! `mobicorp-infra` — store and market-source implementations.
//!
//! Everything here is the in-memory, tests/dev grade of the contracts the
//! domain crates define. Production-grade backends would live behind the
//! same traits.

pub mod market;
pub mod store;

pub use market::SimulatedMarketSource;
pub use store::{
    InMemoryAlertStore, InMemoryComparisonStore, InMemoryOrderStore, InMemoryProductStore,
};
