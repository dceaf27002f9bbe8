//! Page composition
//!
//! The landing page is a fixed vertical stack of sections. Apart from the
//! market board, the only section with state is the testimonials rotator.

use crate::{constants::TESTIMONIAL_ROTATION_SECS, error::BoardError};
use std::time::Duration;

/// Sections of the landing page, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    CryptoMarket,
    Airdrops,
    Portfolio,
    Testimonials,
    Faq,
    Contact,
    Footer,
}

impl Section {
    /// Render order
    pub const ORDER: [Section; 8] = [
        Section::Hero,
        Section::CryptoMarket,
        Section::Airdrops,
        Section::Portfolio,
        Section::Testimonials,
        Section::Faq,
        Section::Contact,
        Section::Footer,
    ];

    /// In-page anchor the navigation bar scrolls to
    pub fn anchor(&self) -> Option<&'static str> {
        match self {
            Section::Hero => Some("home"),
            Section::CryptoMarket => Some("crypto"),
            Section::Airdrops => Some("airdrops"),
            Section::Portfolio => Some("portfolio"),
            Section::Testimonials => Some("testimonials"),
            Section::Faq => Some("faq"),
            Section::Contact => Some("contact"),
            Section::Footer => None,
        }
    }

    /// Finds the section behind an anchor, e.g. from a `#crypto` link
    pub fn from_anchor(anchor: &str) -> Option<Section> {
        let anchor = anchor.trim_start_matches('#');
        Self::ORDER
            .iter()
            .copied()
            .find(|s| s.anchor() == Some(anchor))
    }
}

/// Auto-advancing carousel position
///
/// Time is fed in through [`TestimonialRotator::advance`], so the rotator
/// works the same under a real clock, a paused test clock or a UI frame loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestimonialRotator {
    len: usize,
    index: usize,
    period: Duration,
    elapsed: Duration,
}

impl TestimonialRotator {
    /// Rotator over `len` entries with the default period
    pub fn new(len: usize) -> Self {
        Self::with_period(len, Duration::from_secs(TESTIMONIAL_ROTATION_SECS))
    }

    pub fn with_period(len: usize, period: Duration) -> Self {
        Self {
            len,
            index: 0,
            period,
            elapsed: Duration::ZERO,
        }
    }

    pub fn current(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left before the next automatic step
    pub fn time_until_next(&self) -> Duration {
        self.period.saturating_sub(self.elapsed)
    }

    /// Feeds elapsed time, stepping once per full period; returns the position
    pub fn advance(&mut self, delta: Duration) -> usize {
        if self.len == 0 || self.period.is_zero() {
            return self.index;
        }

        self.elapsed += delta;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// Manual step forward, wrapping after the last entry
    pub fn forward(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.elapsed = Duration::ZERO;
        self.index
    }

    /// Manual step back, wrapping before the first entry
    pub fn back(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.elapsed = Duration::ZERO;
        self.index
    }

    /// Jumps to an explicit entry and restarts the countdown
    pub fn jump_to(&mut self, index: usize) -> Result<(), BoardError> {
        if index >= self.len {
            return Err(BoardError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.index = index;
        self.elapsed = Duration::ZERO;
        Ok(())
    }
}
