//! CoinGecko market listing provider implementation

use crate::{
    constants::{COINGECKO_API_URL, COINGECKO_MARKETS_ENDPOINT, REQUEST_TIMEOUT_SECS, USER_AGENT},
    error::ProviderError,
    provider::{MarketDataProvider, MarketQuery},
    types::AssetQuote,
};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;

/// CoinGecko market listing provider
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    /// Creates a new CoinGecko provider against the public API
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_base_url(COINGECKO_API_URL)
    }

    /// Creates a provider against a different API root (mirrors, local fixtures)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ProviderError::NetworkError)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Builds the CoinGecko API URL for the market listing
    fn build_url(&self, query: &MarketQuery) -> String {
        format!(
            "{}{}?vs_currency={}&order={}&per_page={}&page={}&sparkline={}&price_change_percentage={}",
            self.base_url,
            COINGECKO_MARKETS_ENDPOINT,
            query.vs_currency,
            query.order,
            query.per_page,
            query.page,
            query.sparkline,
            query.price_change_windows.replace(',', "%2C"),
        )
    }
}

/// Parses a CoinGecko `/coins/markets` body into quotes
///
/// Repeated identifiers are dropped, keeping the first occurrence.
pub(crate) fn parse_markets(body: &str) -> Result<Vec<AssetQuote>, ProviderError> {
    let quotes: Vec<AssetQuote> = serde_json::from_str(body).map_err(|e| {
        ProviderError::InvalidResponse(format!("Failed to parse CoinGecko response: {}", e))
    })?;

    let mut seen = HashSet::with_capacity(quotes.len());
    let total = quotes.len();
    let unique: Vec<AssetQuote> = quotes
        .into_iter()
        .filter(|q| seen.insert(q.id.clone()))
        .collect();

    if unique.len() != total {
        tracing::warn!(
            dropped = total - unique.len(),
            "Dropped duplicate asset identifiers from CoinGecko listing"
        );
    }

    Ok(unique)
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    async fn fetch_markets(&self, query: &MarketQuery) -> Result<Vec<AssetQuote>, ProviderError> {
        let url = self.build_url(query);
        tracing::debug!(url = %url, "Fetching market listing from CoinGecko");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::NetworkError(e)
            }
        })?;

        // Check for rate limiting
        if response.status().as_u16() == 429 {
            return Err(ProviderError::RateLimitExceeded);
        }

        // Check for other errors
        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let body = response.text().await.map_err(ProviderError::NetworkError)?;
        let quotes = parse_markets(&body)?;

        tracing::debug!(
            count = quotes.len(),
            "Successfully fetched market listing from CoinGecko"
        );

        Ok(quotes)
    }

    fn provider_name(&self) -> &'static str {
        "coingecko"
    }
}
