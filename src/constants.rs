//! Constants for the crypto market board
//!
//! All configuration for the board is centralized here. No runtime
//! configuration is used - the board operates with these compile-time
//! constants. Tests override the refresh interval through `RefreshConfig`.

/// How often to refresh the market listing (in seconds)
pub const REFRESH_INTERVAL_SECS: u64 = 60;

/// HTTP request timeout when fetching the market listing (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Maximum number of rows rendered by the market table
pub const DISPLAY_LIMIT: usize = 50;

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko API endpoint for the market listing
pub const COINGECKO_MARKETS_ENDPOINT: &str = "/coins/markets";

/// Reference currency every quote is denominated in
pub const VS_CURRENCY: &str = "usd";

/// Number of assets requested per fetch
pub const PER_PAGE: u32 = 100;

/// Page of the listing to request
pub const PAGE: u32 = 1;

/// Listing order requested from the provider
pub const MARKET_ORDER: &str = "market_cap_desc";

/// Percentage-change windows requested alongside the 24h change
pub const PRICE_CHANGE_WINDOWS: &str = "1h,24h,7d";

/// Public coin page used by the detail panel
pub const COINGECKO_COIN_PAGE_URL: &str = "https://www.coingecko.com/en/coins";

/// Public coin page on CoinMarketCap used by the detail panel
pub const COINMARKETCAP_COIN_PAGE_URL: &str = "https://coinmarketcap.com/currencies";

/// Identifier of the placeholder quote substituted when a fetch fails
pub const FALLBACK_ASSET_ID: &str = "bitcoin";

/// Notification title emitted when a fetch falls back
pub const FETCH_FAILED_TITLE: &str = "Error loading crypto data";

/// Notification body emitted when a fetch falls back
pub const FETCH_FAILED_DESCRIPTION: &str =
    "Using fallback data. Please check your internet connection.";

/// Capacity of the notification broadcast channel
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Auto-advance period of the testimonials rotator (in seconds)
pub const TESTIMONIAL_ROTATION_SECS: u64 = 5;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "crypto-market-board/0.1.0";
