use std::hash::{DefaultHasher, Hash, Hasher};

use async_trait::async_trait;

use mobicorp_pricing::{MarketObservation, MarketPriceSource, MarketSourceError};

/// Retailer labels the simulator quotes from.
const RETAILERS: [&str; 5] = [
    "furnimax",
    "office-essentials",
    "deskworld",
    "seatsmart",
    "woodandco",
];

/// Furniture categories the simulator has coverage for. Anything else gets
/// the legitimate "queried and found nothing" empty answer.
const COVERED_CATEGORIES: [&str; 5] = ["chairs", "desks", "tables", "storage", "sofas"];

/// Deterministic market price source for dev environments.
///
/// Intended for tests/dev: quotes are derived from a hash of the product
/// name and category, so repeated queries for the same product return the
/// same observations. No network access.
#[derive(Debug, Default)]
pub struct SimulatedMarketSource;

impl SimulatedMarketSource {
    pub fn new() -> Self {
        Self
    }

    fn seed(name: &str, category: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        category.hash(&mut hasher);
        hasher.finish()
    }

    fn slug(name: &str) -> String {
        name.split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase()
    }
}

#[async_trait]
impl MarketPriceSource for SimulatedMarketSource {
    async fn fetch(
        &self,
        name: &str,
        category: &str,
    ) -> Result<Vec<MarketObservation>, MarketSourceError> {
        if !COVERED_CATEGORIES.contains(&category) {
            tracing::debug!(category, "no simulated coverage for category");
            return Ok(vec![]);
        }

        let seed = Self::seed(name, category);
        let base_price = 80.0 + (seed % 720) as f64;
        let quote_count = 3 + (seed % 3) as usize;
        let slug = Self::slug(name);

        let mut quotes = Vec::with_capacity(quote_count);
        for (i, retailer) in RETAILERS.iter().take(quote_count).enumerate() {
            // Per-retailer spread in roughly the -10%..+15% band around base.
            let wobble = ((seed >> (8 * i)) % 26) as f64 / 100.0 - 0.10;
            let price = (base_price * (1.0 + wobble) * 100.0).round() / 100.0;
            let url = format!("https://{retailer}.example/{category}/{slug}");

            let observation = MarketObservation::new(*retailer, price, Some(url))
                .map_err(|e| MarketSourceError::Unavailable(e.to_string()))?;
            quotes.push(observation);
        }

        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_product_yields_identical_quotes() {
        let source = SimulatedMarketSource::new();
        let first = source.fetch("Executive Chair", "chairs").await.unwrap();
        let second = source.fetch("Executive Chair", "chairs").await.unwrap();
        assert_eq!(first, second);
        assert!(first.len() >= 3);
    }

    #[tokio::test]
    async fn quotes_are_positive_and_tagged_with_urls() {
        let source = SimulatedMarketSource::new();
        let quotes = source.fetch("Standing Desk Pro", "desks").await.unwrap();

        for quote in &quotes {
            assert!(quote.price() > 0.0);
            let url = quote.url().unwrap();
            assert!(url.contains("/desks/standing-desk-pro"), "url: {url}");
        }
    }

    #[tokio::test]
    async fn uncovered_category_returns_empty_not_error() {
        let source = SimulatedMarketSource::new();
        let quotes = source.fetch("Garden Gnome", "garden").await.unwrap();
        assert!(quotes.is_empty());
    }

    #[tokio::test]
    async fn different_products_generally_differ() {
        let source = SimulatedMarketSource::new();
        let a = source.fetch("Executive Chair", "chairs").await.unwrap();
        let b = source.fetch("Mesh Task Chair", "chairs").await.unwrap();
        assert_ne!(a, b);
    }
}
