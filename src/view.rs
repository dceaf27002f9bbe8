//! View state and the pure transformations behind the market table
//!
//! Everything here is synchronous and free of I/O so the table's behavior
//! can be tested without a rendering surface.

use crate::{constants::DISPLAY_LIMIT, types::AssetQuote};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Field the market table can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    MarketCapRank,
    Name,
    Symbol,
    CurrentPrice,
    MarketCap,
    TotalVolume,
    Change1h,
    Change24h,
    Change7d,
    CirculatingSupply,
}

/// Comparable value extracted from a quote
#[derive(Debug, Clone, PartialEq)]
enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            // A key always yields one kind of value.
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl SortKey {
    /// Extracts the field this key sorts on; `None` when the quote lacks it
    fn value(&self, quote: &AssetQuote) -> Option<SortValue> {
        let number = match self {
            SortKey::Name => return Some(SortValue::Text(quote.name.to_lowercase())),
            SortKey::Symbol => return Some(SortValue::Text(quote.symbol.to_lowercase())),
            SortKey::MarketCapRank => quote.market_cap_rank.map(f64::from),
            SortKey::CurrentPrice => quote.current_price,
            SortKey::MarketCap => quote.market_cap,
            SortKey::TotalVolume => quote.total_volume,
            SortKey::Change1h => quote.price_change_percentage_1h_in_currency,
            SortKey::Change24h => quote.price_change_percentage_24h,
            SortKey::Change7d => quote.price_change_percentage_7d_in_currency,
            SortKey::CirculatingSupply => quote.circulating_supply,
        };
        number.filter(|n| !n.is_nan()).map(SortValue::Number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The (field, direction) pair governing table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::MarketCapRank,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortSpec {
    /// Sort order after the user picks `key`: same key flips, new key ascends
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                key,
                direction: SortDirection::Ascending,
            }
        }
    }

    /// Orders two quotes; absent values go last in either direction
    pub fn compare(&self, a: &AssetQuote, b: &AssetQuote) -> Ordering {
        match (self.key.value(a), self.key.value(b)) {
            (Some(a), Some(b)) => {
                let ord = a.compare(&b);
                match self.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Ephemeral UI state of the market table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Raw search text as typed
    pub search: String,
    pub sort: SortSpec,
    /// Starred identifiers, session-local
    pub watchlist: BTreeSet<String>,
    /// Identifier shown in the detail panel, if open
    pub selected: Option<String>,
}

impl ViewState {
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn sort_by(&mut self, key: SortKey) {
        self.sort = self.sort.toggled(key);
    }

    /// Adds or removes `id` from the watchlist, returning the new membership
    pub fn toggle_watch(&mut self, id: &str) -> bool {
        if self.watchlist.remove(id) {
            false
        } else {
            self.watchlist.insert(id.to_string());
            true
        }
    }

    pub fn is_watched(&self, id: &str) -> bool {
        self.watchlist.contains(id)
    }
}

/// Case-insensitive substring match on name or symbol
pub fn matches_search(quote: &AssetQuote, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    quote.name.to_lowercase().contains(&needle) || quote.symbol.to_lowercase().contains(&needle)
}

/// Quotes matching `search`, in batch order
pub fn filter<'a>(quotes: &'a [AssetQuote], search: &str) -> Vec<&'a AssetQuote> {
    quotes.iter().filter(|q| matches_search(q, search)).collect()
}

/// Stable sort by `spec`
pub fn sort(rows: &mut [&AssetQuote], spec: &SortSpec) {
    rows.sort_by(|a, b| spec.compare(a, b));
}

/// Filtered then sorted quotes, without the display cap
pub fn project<'a>(quotes: &'a [AssetQuote], view: &ViewState) -> Vec<&'a AssetQuote> {
    let mut rows = filter(quotes, &view.search);
    sort(&mut rows, &view.sort);
    rows
}

/// [`project`] truncated to the rows the table renders
pub fn visible<'a>(quotes: &'a [AssetQuote], view: &ViewState) -> Vec<&'a AssetQuote> {
    let mut rows = project(quotes, view);
    rows.truncate(DISPLAY_LIMIT);
    rows
}
