//! Market price source implementations.

mod simulated;

pub use simulated::SimulatedMarketSource;
