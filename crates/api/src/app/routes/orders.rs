use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use mobicorp_core::{OrderId, ProductId};
use mobicorp_pricing::ProductDirectory;
use mobicorp_sales::SalesOrder;

use crate::app::routes::common::Actor;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/:id", get(get_order))
        .route("/:id/approve", post(approve_order))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Actor(user_id): Actor,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let product_id: ProductId = match body.product_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
        }
    };

    // Orders reference catalog products only.
    match services.products.get(product_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
        }
        Err(e) => return errors::store_error_to_response(e),
    }

    let order = match SalesOrder::place(
        OrderId::new(),
        product_id,
        body.quantity,
        body.requested_price,
        user_id,
        Utc::now(),
    ) {
        Ok(o) => o,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.orders.insert(order.clone()) {
        return errors::store_error_to_response(e);
    }

    (StatusCode::CREATED, Json(order)).into_response()
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListOrdersQuery>,
) -> axum::response::Response {
    match services.orders.list(query.skip, query.limit) {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
        }
    };

    match services.orders.get(order_id) {
        Ok(Some(order)) => Json(order).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn approve_order(
    Extension(services): Extension<Arc<AppServices>>,
    Actor(_user_id): Actor,
    Path(id): Path<String>,
    Query(query): Query<dto::ApproveOrderQuery>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
        }
    };

    let mut order = match services.orders.get(order_id) {
        Ok(Some(order)) => order,
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found")
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = order.approve(query.final_price, Utc::now()) {
        return errors::domain_error_to_response(e);
    }

    if let Err(e) = services.orders.save(order.clone()) {
        return errors::store_error_to_response(e);
    }

    Json(order).into_response()
}
