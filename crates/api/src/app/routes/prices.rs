use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use mobicorp_core::ProductId;
use mobicorp_pricing::{AlertStore, ComparisonStore};

use crate::app::routes::common::Actor;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// History endpoints cap at the most recent 50 alerts.
const RECENT_ALERTS_LIMIT: usize = 50;

pub fn router() -> Router {
    Router::new()
        .route("/suggest", post(suggest_price))
        .route("/comparisons", get(list_comparisons))
        .route("/alerts", get(list_alerts))
}

pub async fn suggest_price(
    Extension(services): Extension<Arc<AppServices>>,
    Actor(user_id): Actor,
    Query(query): Query<dto::SuggestPriceQuery>,
) -> axum::response::Response {
    let product_id: ProductId = match query.product_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
        }
    };

    match services.suggestions.suggest_price(product_id, user_id).await {
        Ok(suggestion) => Json(suggestion).into_response(),
        Err(e) => errors::pricing_error_to_response(e),
    }
}

pub async fn list_comparisons(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListComparisonsQuery>,
) -> axum::response::Response {
    let product_id = match query.product_id.as_deref() {
        Some(raw) => match raw.parse::<ProductId>() {
            Ok(v) => Some(v),
            Err(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_id",
                    "invalid product id",
                )
            }
        },
        None => None,
    };

    match services
        .comparisons
        .list(product_id, query.skip, query.limit)
    {
        Ok(records) => Json(records).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_alerts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.alerts.recent(RECENT_ALERTS_LIMIT) {
        Ok(alerts) => Json(alerts).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
