//! Market data fetcher
//!
//! Wraps a [`MarketDataProvider`] so that a fetch always yields a batch:
//! any provider failure is replaced by the single fallback row and reported
//! once on the notification channel.

use crate::{
    constants::EVENT_CHANNEL_CAPACITY,
    provider::{MarketDataProvider, MarketQuery},
    stats::RefreshStats,
    types::{Batch, MarketEvent},
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;

pub struct MarketDataFetcher {
    provider: Arc<dyn MarketDataProvider>,
    query: MarketQuery,
    events: broadcast::Sender<MarketEvent>,
    stats: Arc<RefreshStats>,
}

impl MarketDataFetcher {
    /// Creates a fetcher requesting the default listing
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::with_query(provider, MarketQuery::default())
    }

    pub fn with_query(provider: Arc<dyn MarketDataProvider>, query: MarketQuery) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let stats = Arc::new(RefreshStats::new(provider.provider_name()));
        Self {
            provider,
            query,
            events,
            stats,
        }
    }

    /// Subscribes to batch and failure notifications
    pub fn subscribe(&self) -> broadcast::Receiver<MarketEvent> {
        self.events.subscribe()
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    pub fn stats(&self) -> Arc<RefreshStats> {
        self.stats.clone()
    }

    /// Fetches the market listing, falling back to the placeholder row
    ///
    /// Never fails: transport and parse errors both produce
    /// [`Batch::fallback`] and exactly one [`MarketEvent::FetchFailed`].
    pub async fn fetch(&self) -> Batch {
        let start = Instant::now();

        match self.provider.fetch_markets(&self.query).await {
            Ok(quotes) => {
                tracing::debug!(
                    count = quotes.len(),
                    provider = self.provider.provider_name(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Successfully fetched market listing"
                );
                self.stats.record(true).await;
                let batch = Batch::live(quotes);
                self.publish(MarketEvent::batch_updated(batch.len()));
                batch
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    transport = e.is_transport(),
                    provider = self.provider.provider_name(),
                    "Failed to fetch market listing, using fallback data"
                );
                self.stats.record(false).await;
                self.publish(MarketEvent::fetch_failed(e.to_string()));
                Batch::fallback()
            }
        }
    }

    fn publish(&self, event: MarketEvent) {
        // No subscribers is not an error.
        if self.events.send(event).is_err() {
            tracing::trace!("No notification subscribers");
        }
    }
}
