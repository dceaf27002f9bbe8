//! Market board lifecycle service
//!
//! Mounting the service starts a background timer that fetches the market
//! listing immediately and then on every interval. Unmounting stops the
//! timer and bumps the board epoch so fetches still in flight complete as
//! no-ops.

use crate::{
    board::{ApplyOutcome, MarketBoard, RefreshKind, RefreshTicket},
    constants::REFRESH_INTERVAL_SECS,
    error::ProviderError,
    fetcher::MarketDataFetcher,
    provider::MarketDataProvider,
    providers::CoinGeckoProvider,
    stats::RefreshSnapshot,
    types::MarketEvent,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Timing of the periodic refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshConfig {
    pub interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self::with_interval(Duration::from_secs(REFRESH_INTERVAL_SECS))
    }
}

impl RefreshConfig {
    pub fn with_interval(interval: Duration) -> Self {
        Self { interval }
    }
}

/// A mounted market board with its periodic refresh
///
/// # Example
/// ```no_run
/// use crypto_market_board::{Column, MarketBoardService};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = MarketBoardService::mount_coingecko()?;
/// service.board_mut().await.click_header(Column::Price);
/// for row in service.board().await.rows() {
///     println!("{} {} {}", row.rank, row.symbol, row.price);
/// }
/// service.unmount().await;
/// # Ok(())
/// # }
/// ```
pub struct MarketBoardService {
    board: Arc<RwLock<MarketBoard>>,
    fetcher: Arc<MarketDataFetcher>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl MarketBoardService {
    /// Mounts a board backed by the public CoinGecko API
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount_coingecko() -> Result<Self, ProviderError> {
        let provider = Arc::new(CoinGeckoProvider::new()?);
        Ok(Self::mount(provider, RefreshConfig::default()))
    }

    /// Mounts a board and starts its refresh timer
    ///
    /// The first fetch is issued right away with the loading indicator
    /// raised. Must be called from within a tokio runtime.
    pub fn mount(provider: Arc<dyn MarketDataProvider>, config: RefreshConfig) -> Self {
        let fetcher = Arc::new(MarketDataFetcher::new(provider));

        let mut board = MarketBoard::new();
        let initial = board.begin_refresh(RefreshKind::Initial);
        let board = Arc::new(RwLock::new(board));

        let timer = Self::start_timer(board.clone(), fetcher.clone(), config, initial);

        Self {
            board,
            fetcher,
            timer: Mutex::new(Some(timer)),
        }
    }

    /// Starts the periodic refresh task
    fn start_timer(
        board: Arc<RwLock<MarketBoard>>,
        fetcher: Arc<MarketDataFetcher>,
        config: RefreshConfig,
        initial: RefreshTicket,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!(
                refresh_interval_secs = config.interval.as_secs(),
                provider = fetcher.provider_name(),
                "Starting market board refresh task"
            );

            let mut interval = tokio::time::interval(config.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut pending_initial = Some(initial);

            loop {
                interval.tick().await;

                let ticket = match pending_initial.take() {
                    Some(ticket) => ticket,
                    None => board.write().await.begin_refresh(RefreshKind::Periodic),
                };

                // Each tick fetches independently; overlapping fetches are allowed.
                tokio::spawn(Self::refresh(board.clone(), fetcher.clone(), ticket));
            }
        })
    }

    /// Fetches one batch and hands it to the board
    async fn refresh(
        board: Arc<RwLock<MarketBoard>>,
        fetcher: Arc<MarketDataFetcher>,
        ticket: RefreshTicket,
    ) -> ApplyOutcome {
        let batch = fetcher.fetch().await;
        let count = batch.len();
        let fallback = batch.is_fallback();

        let outcome = board.write().await.complete_refresh(ticket, batch);
        tracing::debug!(
            epoch = ticket.epoch(),
            kind = ?ticket.kind(),
            count,
            fallback,
            outcome = ?outcome,
            "Market board refresh finished"
        );
        outcome
    }

    /// Forces an immediate refresh with the loading indicator raised
    ///
    /// Once unmounted this is a no-op that never reaches the provider.
    pub async fn refresh_now(&self) -> ApplyOutcome {
        if !self.is_mounted() {
            tracing::debug!("Ignoring manual refresh on an unmounted board");
            return ApplyOutcome::Discarded;
        }
        let ticket = self.board.write().await.begin_refresh(RefreshKind::Manual);
        Self::refresh(self.board.clone(), self.fetcher.clone(), ticket).await
    }

    /// Stops the timer and invalidates in-flight fetches
    ///
    /// In-flight requests are not aborted; their results are discarded.
    pub async fn unmount(&self) {
        if self.stop_timer() {
            tracing::info!("Stopped market board refresh task");
        }
        self.board.write().await.detach();
    }

    fn stop_timer(&self) -> bool {
        match self.timer.lock() {
            Ok(mut timer) => match timer.take() {
                Some(handle) => {
                    handle.abort();
                    true
                }
                None => false,
            },
            Err(poisoned) => {
                tracing::warn!("Refresh timer lock poisoned");
                poisoned.into_inner().take().map(|h| h.abort()).is_some()
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.timer
            .lock()
            .map(|timer| timer.is_some())
            .unwrap_or(false)
    }

    /// Read access to the view-model
    pub async fn board(&self) -> RwLockReadGuard<'_, MarketBoard> {
        self.board.read().await
    }

    /// Write access to the view-model (search, sort, watchlist, selection)
    pub async fn board_mut(&self) -> RwLockWriteGuard<'_, MarketBoard> {
        self.board.write().await
    }

    /// Subscribes to batch and failure notifications
    pub fn subscribe(&self) -> broadcast::Receiver<MarketEvent> {
        self.fetcher.subscribe()
    }

    /// Live/fallback refresh counts
    pub async fn stats(&self) -> RefreshSnapshot {
        self.fetcher.stats().snapshot().await
    }

    pub fn provider_name(&self) -> &'static str {
        self.fetcher.provider_name()
    }
}

impl Drop for MarketBoardService {
    fn drop(&mut self) {
        if !self.stop_timer() {
            return;
        }

        // Detaching needs the async lock, so hand it to the runtime if one is around.
        let board = self.board.clone();
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                board.write().await.detach();
            });
        }
    }
}
