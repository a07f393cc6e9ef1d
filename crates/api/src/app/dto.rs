use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub category: String,
    pub base_price: Option<f64>,
    #[serde(default)]
    pub stock: u32,
    pub sku: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub product_id: String,
    pub quantity: u32,
    pub requested_price: f64,
}

// -------------------------
// Query DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub category: Option<String>,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct ApproveOrderQuery {
    pub final_price: f64,
}

#[derive(Debug, Deserialize)]
pub struct SuggestPriceQuery {
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ListComparisonsQuery {
    pub product_id: Option<String>,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

pub fn default_limit() -> usize {
    100
}
