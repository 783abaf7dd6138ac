//! Per-source polling cadence, independent of the controller tick.

use chrono::{DateTime, Duration, Utc};
use fxwatch_data::{BankQuote, Currency, Provider, RateSource};
use tracing::{debug, warn};

/// Drives one [`RateSource`] on its own refresh interval.
///
/// Every attempt, successful or not, consumes one full interval before the
/// next becomes due, so a failing provider is retried at its normal cadence
/// instead of hammering it every tick. A failed fetch keeps the previously
/// held quote visible as stale.
pub struct ThrottledPoller {
    source: Box<dyn RateSource>,
    interval: Duration,
    last_fetch: Option<DateTime<Utc>>,
    current: Option<BankQuote>,
}

impl ThrottledPoller {
    pub fn new(source: Box<dyn RateSource>, interval: Duration) -> Self {
        Self {
            source,
            interval,
            last_fetch: None,
            current: None,
        }
    }

    pub fn provider(&self) -> Provider {
        self.source.provider()
    }

    /// Latest successfully fetched quote, if any.
    pub fn current(&self) -> Option<&BankQuote> {
        self.current.as_ref()
    }

    /// A fetch is due strictly more than one interval after the previous
    /// attempt, or immediately when none has been made yet.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_fetch {
            None => true,
            Some(last) => now - last > self.interval,
        }
    }

    /// Run one poll cycle if due.
    pub async fn poll(&mut self, currency: Currency, now: DateTime<Utc>) {
        if !self.is_due(now) {
            return;
        }

        match self.source.fetch(currency).await {
            Ok(quote) => {
                debug!(provider = %self.provider(), %currency, "bank quote refreshed");
                self.current = Some(quote);
            }
            Err(error) => {
                warn!(
                    provider = %self.provider(),
                    %currency,
                    %error,
                    "bank rate fetch failed; keeping previous quote"
                );
            }
        }

        self.last_fetch = Some(now);
    }

    /// Forget the held quote and cadence, forcing a fetch on the next poll.
    pub fn reset(&mut self) {
        self.current = None;
        self.last_fetch = None;
    }
}
