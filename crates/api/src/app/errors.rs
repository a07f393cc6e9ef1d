use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use mobicorp_core::DomainError;
use mobicorp_pricing::{PricingError, StoreError};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn pricing_error_to_response(err: PricingError) -> axum::response::Response {
    match err {
        PricingError::ProductNotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
        }
        // Distinct condition, same status the original surfaced it with.
        PricingError::NoMarketData => json_error(
            StatusCode::NOT_FOUND,
            "no_market_data",
            "no market prices found for this product",
        ),
        PricingError::MarketSourceUnavailable(e) => {
            json_error(StatusCode::BAD_GATEWAY, "market_source_unavailable", e.to_string())
        }
        PricingError::Persistence(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", err.to_string())
}
