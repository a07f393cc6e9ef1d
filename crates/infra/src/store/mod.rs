//! In-memory record stores.

mod orders;
mod pricing;
mod products;

pub use orders::InMemoryOrderStore;
pub use pricing::{InMemoryAlertStore, InMemoryComparisonStore};
pub use products::InMemoryProductStore;
