//! Refresh statistics
//!
//! Tracks how many refreshes produced live data versus the fallback row.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Point-in-time view of the refresh statistics
#[derive(Debug, Clone)]
pub struct RefreshSnapshot {
    pub provider_name: String,
    pub total_refreshes: u64,
    pub fallback_refreshes: u64,
    pub last_live_at: Option<DateTime<Utc>>,
}

impl RefreshSnapshot {
    /// Share of refreshes that produced live data (1.0 before any refresh)
    pub fn live_rate(&self) -> f64 {
        if self.total_refreshes == 0 {
            return 1.0;
        }
        (self.total_refreshes - self.fallback_refreshes) as f64 / self.total_refreshes as f64
    }
}

#[derive(Debug, Default)]
struct Inner {
    total: u64,
    fallbacks: u64,
    last_live_at: Option<DateTime<Utc>>,
}

/// Collects refresh outcomes for one provider
pub struct RefreshStats {
    provider_name: String,
    inner: RwLock<Inner>,
}

impl RefreshStats {
    pub fn new(provider_name: &str) -> Self {
        Self {
            provider_name: provider_name.to_string(),
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Records one refresh outcome
    pub async fn record(&self, live: bool) {
        let mut inner = self.inner.write().await;
        inner.total += 1;

        if live {
            inner.last_live_at = Some(Utc::now());
        } else {
            inner.fallbacks += 1;
        }
    }

    pub async fn snapshot(&self) -> RefreshSnapshot {
        let inner = self.inner.read().await;

        RefreshSnapshot {
            provider_name: self.provider_name.clone(),
            total_refreshes: inner.total,
            fallback_refreshes: inner.fallbacks,
            last_live_at: inner.last_live_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_refresh_stats() {
        let stats = RefreshStats::new("test");

        stats.record(true).await;
        stats.record(true).await;
        stats.record(false).await;

        let snapshot = stats.snapshot().await;
        assert_eq!(snapshot.provider_name, "test");
        assert_eq!(snapshot.total_refreshes, 3);
        assert_eq!(snapshot.fallback_refreshes, 1);
        assert!(snapshot.last_live_at.is_some());
        assert!(snapshot.live_rate() > 0.6 && snapshot.live_rate() < 0.7);
    }

    #[tokio::test]
    async fn test_empty_stats() {
        let snapshot = RefreshStats::new("idle").snapshot().await;
        assert_eq!(snapshot.total_refreshes, 0);
        assert!(snapshot.last_live_at.is_none());
        assert_eq!(snapshot.live_rate(), 1.0);
    }

    #[tokio::test]
    async fn test_fallback_only_keeps_no_live_timestamp() {
        let stats = RefreshStats::new("down");
        stats.record(false).await;

        let snapshot = stats.snapshot().await;
        assert_eq!(snapshot.live_rate(), 0.0);
        assert!(snapshot.last_live_at.is_none());
    }
}
