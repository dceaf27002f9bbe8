//! Provider abstraction for fetching the market listing from external APIs

use crate::{
    constants::{MARKET_ORDER, PAGE, PER_PAGE, PRICE_CHANGE_WINDOWS, VS_CURRENCY},
    error::ProviderError,
    types::AssetQuote,
};
use async_trait::async_trait;

/// Parameters of a market listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketQuery {
    /// Reference currency prices are denominated in
    pub vs_currency: String,
    /// Number of assets per page
    pub per_page: u32,
    /// Page number, starting at 1
    pub page: u32,
    /// Listing order, e.g. `market_cap_desc`
    pub order: String,
    /// Whether to include the 7-day price history sample
    pub sparkline: bool,
    /// Comma-separated percentage-change windows
    pub price_change_windows: String,
}

impl Default for MarketQuery {
    fn default() -> Self {
        Self {
            vs_currency: VS_CURRENCY.to_string(),
            per_page: PER_PAGE,
            page: PAGE,
            order: MARKET_ORDER.to_string(),
            sparkline: true,
            price_change_windows: PRICE_CHANGE_WINDOWS.to_string(),
        }
    }
}

/// Trait for market listing providers
///
/// Implementations fetch an ordered list of quotes from a single source.
/// Failures are returned as errors; turning them into fallback data is the
/// fetcher's job.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches one page of the market listing
    ///
    /// # Arguments
    /// * `query` - Currency, page and ordering of the listing
    ///
    /// # Returns
    /// Quotes in provider order, or an error if the fetch fails
    async fn fetch_markets(&self, query: &MarketQuery) -> Result<Vec<AssetQuote>, ProviderError>;

    /// Returns the name of this provider
    fn provider_name(&self) -> &'static str;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query() {
        let query = MarketQuery::default();
        assert_eq!(query.vs_currency, "usd");
        assert_eq!(query.per_page, 100);
        assert_eq!(query.page, 1);
        assert_eq!(query.order, "market_cap_desc");
        assert!(query.sparkline);
        assert_eq!(query.price_change_windows, "1h,24h,7d");
    }
}
