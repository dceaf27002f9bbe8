//! Expanded read-only view of one selected asset

use crate::{
    constants::{COINGECKO_COIN_PAGE_URL, COINMARKETCAP_COIN_PAGE_URL},
    format::{
        change_tone, format_amount, format_date, format_number, format_optional_price,
        format_percent, format_ratio, ChangeTone, NOT_AVAILABLE, UNBOUNDED,
    },
    profiles::{profile_for, AssetProfile},
    types::AssetQuote,
};
use serde::Serialize;

/// A formatted signed change with its color category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeCell {
    pub text: String,
    pub tone: ChangeTone,
}

impl ChangeCell {
    pub fn percent(change: Option<f64>) -> Self {
        Self {
            text: format_percent(change),
            tone: change_tone(change),
        }
    }
}

/// All-time extreme (high or low) summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtremeSummary {
    pub price: String,
    pub date: String,
    /// e.g. `-37.3% from ATH`
    pub distance: String,
}

/// Outbound link opened in a new browsing context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub label: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPanel {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub image: String,
    pub rank: String,
    pub watched: bool,

    pub price: String,
    pub change_24h: ChangeCell,
    pub market_cap: String,
    pub market_cap_change_24h: ChangeCell,
    pub volume: String,
    /// 24h volume relative to market cap
    pub volume_to_market_cap: String,

    pub change_1h: ChangeCell,
    pub change_7d: ChangeCell,

    pub circulating_supply: String,
    pub total_supply: String,
    pub max_supply: String,

    pub all_time_high: ExtremeSummary,
    pub all_time_low: ExtremeSummary,

    pub profile: AssetProfile,
    pub links: Vec<ExternalLink>,
}

impl DetailPanel {
    pub fn new(quote: &AssetQuote, watched: bool) -> Self {
        let symbol = quote.display_symbol();
        let with_symbol = |figure: Option<f64>| match figure {
            Some(_) => format!("{} {}", format_number(figure), symbol),
            None => NOT_AVAILABLE.to_string(),
        };

        Self {
            id: quote.id.clone(),
            name: quote.name.clone(),
            symbol: symbol.clone(),
            image: quote.image.clone(),
            rank: quote
                .market_cap_rank
                .map(|r| format!("Rank #{}", r))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            watched,

            price: format_optional_price(quote.current_price),
            change_24h: ChangeCell::percent(quote.price_change_percentage_24h),
            market_cap: format_amount(quote.market_cap, "$"),
            market_cap_change_24h: ChangeCell::percent(quote.market_cap_change_percentage_24h),
            volume: format_amount(quote.total_volume, "$"),
            volume_to_market_cap: format_ratio(quote.total_volume, quote.market_cap),

            change_1h: ChangeCell::percent(quote.price_change_percentage_1h_in_currency),
            change_7d: ChangeCell::percent(quote.price_change_percentage_7d_in_currency),

            circulating_supply: with_symbol(quote.circulating_supply),
            total_supply: with_symbol(quote.total_supply),
            max_supply: match quote.max_supply {
                Some(_) => with_symbol(quote.max_supply),
                None => format!("{} {}", UNBOUNDED, symbol),
            },

            all_time_high: ExtremeSummary {
                price: format_optional_price(quote.ath),
                date: format_date(quote.ath_date),
                distance: quote
                    .ath_change_percentage
                    .map(|p| format!("{:.1}% from ATH", p))
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            },
            all_time_low: ExtremeSummary {
                price: format_optional_price(quote.atl),
                date: format_date(quote.atl_date),
                distance: quote
                    .atl_change_percentage
                    .map(|p| format!("+{:.1}% from ATL", p))
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            },

            profile: *profile_for(&quote.id),
            links: vec![
                ExternalLink {
                    label: "View on CoinGecko",
                    url: format!("{}/{}", COINGECKO_COIN_PAGE_URL, quote.id),
                },
                ExternalLink {
                    label: "View on CoinMarketCap",
                    url: format!("{}/{}/", COINMARKETCAP_COIN_PAGE_URL, quote.id),
                },
            ],
        }
    }
}
