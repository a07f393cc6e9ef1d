//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: infrastructure wiring (stores, market source, engine)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Host-level configuration, read from the environment in `main.rs` and
/// passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub alert_threshold: f64,
    pub fetch_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            alert_threshold: mobicorp_pricing::AlertPolicy::DEFAULT_THRESHOLD,
            fetch_timeout: Duration::from_secs(5),
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: AppConfig) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services(&config)?);

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services)))
}
