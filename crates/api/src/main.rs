use std::time::Duration;

use mobicorp_api::app::{build_app, AppConfig};
use mobicorp_pricing::AlertPolicy;

#[tokio::main]
async fn main() {
    mobicorp_observability::init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| {
        tracing::warn!("BIND_ADDR not set; defaulting to 0.0.0.0:8080");
        "0.0.0.0:8080".to_string()
    });

    let alert_threshold = match std::env::var("PRICE_ALERT_THRESHOLD") {
        Ok(raw) => raw.parse::<f64>().unwrap_or_else(|_| {
            tracing::warn!(%raw, "PRICE_ALERT_THRESHOLD is not a number; using default");
            AlertPolicy::DEFAULT_THRESHOLD
        }),
        Err(_) => AlertPolicy::DEFAULT_THRESHOLD,
    };

    let fetch_timeout_ms = match std::env::var("MARKET_FETCH_TIMEOUT_MS") {
        Ok(raw) => raw.parse::<u64>().unwrap_or_else(|_| {
            tracing::warn!(%raw, "MARKET_FETCH_TIMEOUT_MS is not a number; using default");
            5_000
        }),
        Err(_) => 5_000,
    };

    let config = AppConfig {
        alert_threshold,
        fetch_timeout: Duration::from_millis(fetch_timeout_ms),
    };

    let app = build_app(config).expect("invalid configuration");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
