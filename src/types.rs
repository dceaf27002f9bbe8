//! Types for the crypto market board

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{FALLBACK_ASSET_ID, FETCH_FAILED_DESCRIPTION, FETCH_FAILED_TITLE};

/// Seven-day price history sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sparkline {
    /// Hourly prices, oldest first
    #[serde(default)]
    pub price: Vec<f64>,
}

/// One market snapshot for a tradable asset
///
/// Field names follow the CoinGecko `/coins/markets` payload. Every numeric
/// field is optional: `None` means the provider omitted it and is never the
/// same thing as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetQuote {
    /// Stable identifier, unique within a batch
    pub id: String,
    /// Display name
    pub name: String,
    /// Ticker symbol as reported (usually lower-case)
    pub symbol: String,
    /// Logo URL, empty when unknown
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub fully_diluted_valuation: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub high_24h: Option<f64>,
    #[serde(default)]
    pub low_24h: Option<f64>,

    #[serde(default)]
    pub price_change_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_1h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_7d_in_currency: Option<f64>,
    #[serde(default)]
    pub market_cap_change_24h: Option<f64>,
    #[serde(default)]
    pub market_cap_change_percentage_24h: Option<f64>,

    #[serde(default)]
    pub circulating_supply: Option<f64>,
    /// Absent for assets without a known total
    #[serde(default)]
    pub total_supply: Option<f64>,
    /// Absent for unbounded-supply assets
    #[serde(default)]
    pub max_supply: Option<f64>,

    #[serde(default)]
    pub ath: Option<f64>,
    #[serde(default)]
    pub ath_change_percentage: Option<f64>,
    #[serde(default)]
    pub ath_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub atl: Option<f64>,
    #[serde(default)]
    pub atl_change_percentage: Option<f64>,
    #[serde(default)]
    pub atl_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default)]
    pub sparkline_in_7d: Option<Sparkline>,
}

impl AssetQuote {
    /// Creates a quote carrying only its identity; all figures are absent
    pub fn new(id: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
            image: String::new(),
            current_price: None,
            market_cap: None,
            market_cap_rank: None,
            fully_diluted_valuation: None,
            total_volume: None,
            high_24h: None,
            low_24h: None,
            price_change_24h: None,
            price_change_percentage_24h: None,
            price_change_percentage_1h_in_currency: None,
            price_change_percentage_24h_in_currency: None,
            price_change_percentage_7d_in_currency: None,
            market_cap_change_24h: None,
            market_cap_change_percentage_24h: None,
            circulating_supply: None,
            total_supply: None,
            max_supply: None,
            ath: None,
            ath_change_percentage: None,
            ath_date: None,
            atl: None,
            atl_change_percentage: None,
            atl_date: None,
            last_updated: None,
            sparkline_in_7d: None,
        }
    }

    /// The placeholder quote shown when the market listing cannot be fetched
    pub fn fallback() -> Self {
        Self {
            current_price: Some(43_250.0),
            market_cap: Some(847_200_000_000.0),
            market_cap_rank: Some(1),
            fully_diluted_valuation: Some(847_200_000_000.0),
            total_volume: Some(15_200_000_000.0),
            high_24h: Some(44_000.0),
            low_24h: Some(42_500.0),
            price_change_24h: Some(1_045.5),
            price_change_percentage_24h: Some(2.45),
            price_change_percentage_1h_in_currency: Some(0.5),
            price_change_percentage_7d_in_currency: Some(5.2),
            market_cap_change_24h: Some(20_000_000_000.0),
            market_cap_change_percentage_24h: Some(2.4),
            circulating_supply: Some(19_600_000.0),
            total_supply: Some(21_000_000.0),
            max_supply: Some(21_000_000.0),
            ath: Some(69_000.0),
            ath_change_percentage: Some(-37.3),
            ath_date: Utc.with_ymd_and_hms(2021, 11, 10, 14, 24, 11).single(),
            atl: Some(67.81),
            atl_change_percentage: Some(63_600.0),
            atl_date: Utc.with_ymd_and_hms(2013, 7, 6, 0, 0, 0).single(),
            last_updated: Some(Utc::now()),
            ..Self::new(FALLBACK_ASSET_ID, "Bitcoin", "btc")
        }
    }

    /// Upper-case ticker for display
    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }

    /// First letter of the symbol, used as an avatar when no image is known
    pub fn avatar_initial(&self) -> Option<char> {
        self.symbol.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

/// Where a batch came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchSource {
    /// Parsed from a successful provider response
    Live,
    /// Substituted after a failed fetch
    Fallback,
}

/// The full set of quotes returned by one fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub quotes: Vec<AssetQuote>,
    pub source: BatchSource,
    pub fetched_at: DateTime<Utc>,
}

impl Batch {
    /// Wraps a successfully fetched list
    pub fn live(quotes: Vec<AssetQuote>) -> Self {
        Self {
            quotes,
            source: BatchSource::Live,
            fetched_at: Utc::now(),
        }
    }

    /// The single-row batch used after a failure
    pub fn fallback() -> Self {
        Self {
            quotes: vec![AssetQuote::fallback()],
            source: BatchSource::Fallback,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == BatchSource::Fallback
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// Notifications published by the fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketEvent {
    /// A live batch replaced the displayed data
    BatchUpdated {
        id: Uuid,
        count: usize,
        timestamp: DateTime<Utc>,
    },

    /// A fetch failed and the fallback row is shown
    FetchFailed {
        id: Uuid,
        title: String,
        description: String,
        error_message: String,
        timestamp: DateTime<Utc>,
    },
}

impl MarketEvent {
    pub fn batch_updated(count: usize) -> Self {
        MarketEvent::BatchUpdated {
            id: Uuid::new_v4(),
            count,
            timestamp: Utc::now(),
        }
    }

    pub fn fetch_failed(error_message: impl Into<String>) -> Self {
        MarketEvent::FetchFailed {
            id: Uuid::new_v4(),
            title: FETCH_FAILED_TITLE.to_string(),
            description: FETCH_FAILED_DESCRIPTION.to_string(),
            error_message: error_message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Get the event ID
    pub fn id(&self) -> Uuid {
        match self {
            MarketEvent::BatchUpdated { id, .. } => *id,
            MarketEvent::FetchFailed { id, .. } => *id,
        }
    }

    /// Get the event type as string
    pub fn event_type(&self) -> &'static str {
        match self {
            MarketEvent::BatchUpdated { .. } => "BATCH_UPDATED",
            MarketEvent::FetchFailed { .. } => "FETCH_FAILED",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, MarketEvent::FetchFailed { .. })
    }
}

impl std::fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketEvent::BatchUpdated { count, .. } => {
                write!(f, "Market data updated: {} assets", count)
            }
            MarketEvent::FetchFailed {
                title, description, ..
            } => {
                write!(f, "{}: {}", title, description)
            }
        }
    }
}
