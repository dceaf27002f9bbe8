//! Market table view-model
//!
//! Owns the latest batch together with the view state, the loading
//! indicator and the refresh epoch. Every batch is tagged with the epoch it
//! was requested in; after [`MarketBoard::detach`] bumps the epoch, late
//! completions are discarded instead of applied.

use crate::{
    detail::{ChangeCell, DetailPanel},
    error::BoardError,
    format::{format_amount, format_number, format_optional_price, format_scaled, NOT_AVAILABLE},
    types::{AssetQuote, Batch, BatchSource},
    view::{self, SortKey, SortSpec, ViewState},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Columns of the market table, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Column {
    Rank,
    Coin,
    Price,
    Change1h,
    Change24h,
    Change7d,
    MarketCap,
    Volume24h,
    CirculatingSupply,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Rank,
        Column::Coin,
        Column::Price,
        Column::Change1h,
        Column::Change24h,
        Column::Change7d,
        Column::MarketCap,
        Column::Volume24h,
        Column::CirculatingSupply,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Column::Rank => "#",
            Column::Coin => "Coin",
            Column::Price => "Price",
            Column::Change1h => "1h%",
            Column::Change24h => "24h%",
            Column::Change7d => "7d%",
            Column::MarketCap => "Market Cap",
            Column::Volume24h => "Volume(24h)",
            Column::CirculatingSupply => "Circulating Supply",
        }
    }

    /// Sort key behind a clickable header, `None` for static headers
    pub fn sort_key(&self) -> Option<SortKey> {
        match self {
            Column::Rank => Some(SortKey::MarketCapRank),
            Column::Price => Some(SortKey::CurrentPrice),
            Column::MarketCap => Some(SortKey::MarketCap),
            _ => None,
        }
    }
}

/// One rendered row of the market table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub rank: String,
    pub name: String,
    pub symbol: String,
    /// Logo URL, empty when unknown
    pub image: String,
    /// Shown instead of the logo when `image` is empty
    pub avatar: Option<char>,
    pub price: String,
    pub change_1h: ChangeCell,
    pub change_24h: ChangeCell,
    pub change_7d: ChangeCell,
    pub market_cap: String,
    pub volume: String,
    pub circulating_supply: String,
    /// `Max: …` line, only for assets with a bounded supply
    pub max_supply: Option<String>,
    pub watched: bool,
}

impl TableRow {
    fn new(quote: &AssetQuote, watched: bool) -> Self {
        let symbol = quote.display_symbol();
        Self {
            id: quote.id.clone(),
            rank: quote
                .market_cap_rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            name: quote.name.clone(),
            image: quote.image.clone(),
            avatar: if quote.image.is_empty() {
                quote.avatar_initial()
            } else {
                None
            },
            price: format_optional_price(quote.current_price),
            change_1h: ChangeCell::percent(quote.price_change_percentage_1h_in_currency),
            change_24h: ChangeCell::percent(quote.price_change_percentage_24h),
            change_7d: ChangeCell::percent(quote.price_change_percentage_7d_in_currency),
            market_cap: format_amount(quote.market_cap, "$"),
            volume: format_amount(quote.total_volume, "$"),
            circulating_supply: format_scaled(
                quote.circulating_supply,
                "",
                &format!(" {}", symbol),
            ),
            max_supply: quote
                .max_supply
                .map(|max| format!("Max: {}", format_number(Some(max)))),
            symbol,
            watched,
        }
    }
}

/// Which refresh asked for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshKind {
    /// First fetch after mounting
    Initial,
    /// Timer-driven refresh
    Periodic,
    /// User-requested refresh
    Manual,
}

impl RefreshKind {
    fn shows_loading(&self) -> bool {
        !matches!(self, RefreshKind::Periodic)
    }
}

/// Handle for one outstanding refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    epoch: u64,
    kind: RefreshKind,
}

impl RefreshTicket {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn kind(&self) -> RefreshKind {
        self.kind
    }
}

/// Result of handing a completed batch to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The ticket predates the current epoch
    Discarded,
}

#[derive(Debug, Default)]
pub struct MarketBoard {
    quotes: Vec<AssetQuote>,
    source: Option<BatchSource>,
    fetched_at: Option<DateTime<Utc>>,
    view: ViewState,
    /// Quote captured when the detail panel was opened
    selected_quote: Option<AssetQuote>,
    epoch: u64,
    pending_loads: usize,
}

impl MarketBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a refresh, raising the loading indicator unless it is periodic
    pub fn begin_refresh(&mut self, kind: RefreshKind) -> RefreshTicket {
        if kind.shows_loading() {
            self.pending_loads += 1;
        }
        RefreshTicket {
            epoch: self.epoch,
            kind,
        }
    }

    /// Replaces the batch wholesale, unless the ticket is stale
    ///
    /// Completions within one epoch apply in completion order, so the most
    /// recently completed fetch wins.
    pub fn complete_refresh(&mut self, ticket: RefreshTicket, batch: Batch) -> ApplyOutcome {
        if ticket.epoch != self.epoch {
            tracing::debug!(
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                "Discarding batch from a superseded epoch"
            );
            return ApplyOutcome::Discarded;
        }

        if ticket.kind.shows_loading() {
            self.pending_loads = self.pending_loads.saturating_sub(1);
        }

        self.quotes = batch.quotes;
        self.source = Some(batch.source);
        self.fetched_at = Some(batch.fetched_at);
        ApplyOutcome::Applied
    }

    /// Invalidates every outstanding ticket and clears the loading indicator
    pub fn detach(&mut self) {
        self.epoch += 1;
        self.pending_loads = 0;
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }

    pub fn quotes(&self) -> &[AssetQuote] {
        &self.quotes
    }

    pub fn source(&self) -> Option<BatchSource> {
        self.source
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.view.set_search(text);
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.view.sort
    }

    pub fn sort_by(&mut self, key: SortKey) {
        self.view.sort_by(key);
    }

    /// Header click; returns false for columns that do not sort
    pub fn click_header(&mut self, column: Column) -> bool {
        match column.sort_key() {
            Some(key) => {
                self.sort_by(key);
                true
            }
            None => false,
        }
    }

    /// Stars or unstars an asset; never touches the selection
    pub fn toggle_watch(&mut self, id: &str) -> bool {
        self.view.toggle_watch(id)
    }

    pub fn is_watched(&self, id: &str) -> bool {
        self.view.is_watched(id)
    }

    /// Number of quotes matching the current search, before the display cap
    pub fn match_count(&self) -> usize {
        view::filter(&self.quotes, &self.view.search).len()
    }

    /// Rows to render: filtered, sorted and capped
    pub fn rows(&self) -> Vec<TableRow> {
        view::visible(&self.quotes, &self.view)
            .into_iter()
            .map(|q| TableRow::new(q, self.view.is_watched(&q.id)))
            .collect()
    }

    /// Opens the detail panel on an asset of the current batch
    pub fn select(&mut self, id: &str) -> Result<DetailPanel, BoardError> {
        let quote = self
            .quotes
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| BoardError::unknown_asset(id))?;

        let panel = DetailPanel::new(&quote, self.view.is_watched(id));
        self.view.selected = Some(quote.id.clone());
        self.selected_quote = Some(quote);
        Ok(panel)
    }

    /// The open detail panel, showing the quote as it was when selected
    pub fn detail(&self) -> Option<DetailPanel> {
        self.selected_quote
            .as_ref()
            .map(|q| DetailPanel::new(q, self.view.is_watched(&q.id)))
    }

    /// Closes the detail panel; nothing else changes
    pub fn close_detail(&mut self) {
        self.view.selected = None;
        self.selected_quote = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DISPLAY_LIMIT, FALLBACK_ASSET_ID};
    use crate::format::ChangeTone;
    use crate::provider::mock::quote;
    use crate::view::SortDirection;

    fn loaded_board(quotes: Vec<AssetQuote>) -> MarketBoard {
        let mut board = MarketBoard::new();
        let ticket = board.begin_refresh(RefreshKind::Initial);
        assert_eq!(board.complete_refresh(ticket, Batch::live(quotes)), ApplyOutcome::Applied);
        board
    }

    fn sample() -> Vec<AssetQuote> {
        vec![
            quote("bitcoin", "Bitcoin", "btc", 1, 43_000.0),
            quote("ethereum", "Ethereum", "eth", 2, 2_300.0),
            quote("solana", "Solana", "sol", 5, 98.0),
            quote("dogecoin", "Dogecoin", "doge", 8, 0.08),
        ]
    }

    fn row_ids(board: &MarketBoard) -> Vec<String> {
        board.rows().into_iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_header_click_sequence() {
        let mut board = loaded_board(sample());
        assert_eq!(board.sort_spec(), SortSpec::default());

        assert!(board.click_header(Column::Price));
        assert_eq!(board.sort_spec().key, SortKey::CurrentPrice);
        assert_eq!(board.sort_spec().direction, SortDirection::Ascending);
        assert_eq!(row_ids(&board), vec!["dogecoin", "solana", "ethereum", "bitcoin"]);

        assert!(board.click_header(Column::Price));
        assert_eq!(board.sort_spec().direction, SortDirection::Descending);
        assert_eq!(
            row_ids(&board),
            vec!["bitcoin", "ethereum", "solana", "dogecoin"]
        );

        assert!(board.click_header(Column::Rank));
        assert_eq!(board.sort_spec(), SortSpec::default());
        assert_eq!(
            row_ids(&board),
            vec!["bitcoin", "ethereum", "solana", "dogecoin"]
        );

        assert!(!board.click_header(Column::Change24h));
        assert_eq!(board.sort_spec(), SortSpec::default());
    }

    #[test]
    fn test_search_filters_before_cap() {
        let mut quotes: Vec<AssetQuote> = (1..=80)
            .map(|i| quote(&format!("filler-{i}"), &format!("Filler {i}"), "fil", i, 1.0))
            .collect();
        quotes.push(quote("ethereum", "Ethereum", "eth", 81, 2_300.0));

        let mut board = loaded_board(quotes);
        assert_eq!(board.rows().len(), DISPLAY_LIMIT);
        assert_eq!(board.match_count(), 81);

        board.set_search("ETH");
        assert_eq!(row_ids(&board), vec!["ethereum"]);
        assert_eq!(board.match_count(), 1);

        board.set_search("");
        assert_eq!(board.rows().len(), DISPLAY_LIMIT);
    }

    #[test]
    fn test_toggle_watch_does_not_select() {
        let mut board = loaded_board(sample());
        assert!(board.toggle_watch("solana"));
        assert!(board.view().selected.is_none());
        assert!(board.detail().is_none());

        let row = board
            .rows()
            .into_iter()
            .find(|r| r.id == "solana")
            .unwrap();
        assert!(row.watched);

        assert!(!board.toggle_watch("solana"));
        assert!(board.view().watchlist.is_empty());
    }

    #[test]
    fn test_row_formatting() {
        let mut btc = AssetQuote::fallback();
        btc.image = "https://example.com/btc.png".to_string();
        btc.price_change_percentage_7d_in_currency = Some(-3.1);
        btc.max_supply = None;
        let board = loaded_board(vec![btc]);

        let row = &board.rows()[0];
        assert_eq!(row.rank, "1");
        assert_eq!(row.symbol, "BTC");
        assert_eq!(row.avatar, None);
        assert_eq!(row.price, "$43,250.00");
        assert_eq!(row.change_1h.text, "+0.50%");
        assert_eq!(row.change_7d.tone, ChangeTone::Negative);
        assert_eq!(row.market_cap, "$847.20B");
        assert_eq!(row.volume, "$15.20B");
        assert_eq!(row.circulating_supply, "19.60M BTC");
        assert_eq!(row.max_supply, None);
    }

    #[test]
    fn test_row_renders_absent_figures_as_not_available() {
        let board = loaded_board(vec![AssetQuote::new("x", "X", "x")]);

        let row = &board.rows()[0];
        assert_eq!(row.rank, "N/A");
        assert_eq!(row.price, "N/A");
        assert_eq!(row.change_24h.text, "N/A");
        assert_eq!(row.market_cap, "N/A");
        assert_eq!(row.circulating_supply, "N/A");

        let panel = DetailPanel::new(&board.quotes()[0], false);
        assert_eq!(panel.rank, "N/A");
        assert_eq!(panel.circulating_supply, row.circulating_supply);
    }

    #[test]
    fn test_select_and_close_detail() {
        let mut board = loaded_board(sample());

        assert_eq!(
            board.select("cardano"),
            Err(BoardError::unknown_asset("cardano"))
        );

        let panel = board.select("ethereum").unwrap();
        assert_eq!(panel.name, "Ethereum");
        assert_eq!(board.view().selected.as_deref(), Some("ethereum"));

        board.set_search("sol");
        board.toggle_watch("bitcoin");
        board.close_detail();
        assert!(board.detail().is_none());
        assert_eq!(board.view().search, "sol");
        assert!(board.is_watched("bitcoin"));
    }

    #[test]
    fn test_detail_keeps_snapshot_after_refresh() {
        let mut board = loaded_board(sample());
        board.select("solana").unwrap();

        let ticket = board.begin_refresh(RefreshKind::Periodic);
        let refreshed = vec![quote("bitcoin", "Bitcoin", "btc", 1, 44_000.0)];
        board.complete_refresh(ticket, Batch::live(refreshed));

        let panel = board.detail().unwrap();
        assert_eq!(panel.id, "solana");
        assert_eq!(panel.price, "$98.00");

        board.close_detail();
        assert!(board.select("solana").is_err());
    }

    #[test]
    fn test_loading_follows_initial_and_manual_refreshes() {
        let mut board = MarketBoard::new();
        assert!(!board.is_loading());

        let initial = board.begin_refresh(RefreshKind::Initial);
        assert!(board.is_loading());
        let periodic = board.begin_refresh(RefreshKind::Periodic);
        board.complete_refresh(periodic, Batch::live(sample()));
        assert!(board.is_loading());
        board.complete_refresh(initial, Batch::fallback());
        assert!(!board.is_loading());
        assert_eq!(board.source(), Some(BatchSource::Fallback));
        assert_eq!(row_ids(&board), vec![FALLBACK_ASSET_ID]);

        let manual = board.begin_refresh(RefreshKind::Manual);
        assert!(board.is_loading());
        board.complete_refresh(manual, Batch::live(sample()));
        assert!(!board.is_loading());
        assert_eq!(board.quotes().len(), 4);
    }

    #[test]
    fn test_last_completion_wins_within_epoch() {
        let mut board = MarketBoard::new();
        let first = board.begin_refresh(RefreshKind::Periodic);
        let second = board.begin_refresh(RefreshKind::Periodic);

        board.complete_refresh(second, Batch::live(sample()));
        let stale = vec![quote("bitcoin", "Bitcoin", "btc", 1, 1.0)];
        board.complete_refresh(first, Batch::live(stale));
        assert_eq!(row_ids(&board), vec!["bitcoin"]);
    }

    #[test]
    fn test_detach_discards_late_batches() {
        let mut board = loaded_board(sample());
        let ticket = board.begin_refresh(RefreshKind::Manual);
        board.detach();
        assert!(!board.is_loading());

        assert_eq!(
            board.complete_refresh(ticket, Batch::fallback()),
            ApplyOutcome::Discarded
        );
        assert_eq!(board.quotes().len(), 4);
        assert_eq!(ticket.epoch() + 1, board.epoch());
    }
}
