//! # Crypto Market Board
//!
//! View-model for a live cryptocurrency market table, fed by the CoinGecko
//! `/coins/markets` listing.
//!
//! ## What it does
//!
//! - Fetches the top 100 assets by market cap every 60 seconds.
//! - Falls back to a single placeholder row when a fetch fails, and
//!   publishes a failure notification instead of returning an error.
//! - Filters by name or symbol, sorts by any column with absent values
//!   last, keeps a session-local watchlist and caps the table at 50 rows.
//! - Formats figures for display (`1.50M`, `$43,250.00`, `$0.000046`, `N/A`).
//!
//! ## Usage
//!
//! ```no_run
//! use crypto_market_board::{Column, MarketBoardService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = MarketBoardService::mount_coingecko()?;
//! let mut events = service.subscribe();
//!
//! {
//!     let mut board = service.board_mut().await;
//!     board.set_search("eth");
//!     board.click_header(Column::Price);
//! }
//!
//! if let Ok(event) = events.recv().await {
//!     println!("{}", event);
//! }
//!
//! for row in service.board().await.rows() {
//!     println!("{:>3} {:<6} {:>14} {}", row.rank, row.symbol, row.price, row.change_24h.text);
//! }
//!
//! service.unmount().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! MarketBoardService::mount()
//!     ↓
//! Refresh task (immediately, then every 60s)
//!     ↓
//! MarketDataFetcher → MarketDataProvider (CoinGecko)
//!     ↓                    ↘ MarketEvent notifications
//! MarketBoard (batch + ViewState, epoch guarded)
//!     ↓
//! rows() / detail()
//! ```

pub mod board;
pub mod constants;
pub mod detail;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod page;
pub mod profiles;
pub mod provider;
pub mod providers;
pub mod service;
pub mod stats;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use board::{ApplyOutcome, Column, MarketBoard, RefreshKind, TableRow};
pub use detail::DetailPanel;
pub use error::{BoardError, ProviderError};
pub use fetcher::MarketDataFetcher;
pub use page::{Section, TestimonialRotator};
pub use provider::{MarketDataProvider, MarketQuery};
pub use service::{MarketBoardService, RefreshConfig};
pub use types::{AssetQuote, Batch, BatchSource, MarketEvent};
pub use view::{SortDirection, SortKey, SortSpec, ViewState};
