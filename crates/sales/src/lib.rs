//! `mobicorp-sales` — sales order domain.

pub mod order;

pub use order::{OrderStatus, SalesOrder};
