use axum::Router;

pub mod admin;
pub mod common;
pub mod orders;
pub mod prices;
pub mod products;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .nest("/api/products", products::router())
        .nest("/api/orders", orders::router())
        .nest("/api/prices", prices::router())
        .nest("/api/admin", admin::router())
}
