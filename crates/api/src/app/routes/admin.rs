//! Housekeeping endpoints (bulk purges of permanent history).

use std::sync::Arc;

use axum::{
    extract::Extension, response::IntoResponse, routing::delete, Json, Router,
};

use mobicorp_pricing::{AlertStore, ComparisonStore};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/price-alerts", delete(purge_alerts))
        .route("/comparisons", delete(purge_comparisons))
}

pub async fn purge_alerts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.alerts.purge_all() {
        Ok(removed) => Json(serde_json::json!({ "removed": removed })).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn purge_comparisons(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.comparisons.purge_all() {
        Ok(removed) => Json(serde_json::json!({ "removed": removed })).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
