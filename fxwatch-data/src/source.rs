//! Provider capabilities: bank sell rates and market quote data.
//!
//! Bank providers implement [`RateSource`]; the market data provider
//! implements [`MarketSource`]. Both are object-safe so the engine can hold
//! them behind trait objects and tests can substitute recording fakes.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::currency::{Currency, TimeRange};
use crate::error::FetchError;
use crate::sample::Sample;

/// Hard per-request timeout for every provider call.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Conventional browser identification sent to all providers.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Bank rate providers polled by the monitor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Provider {
    /// Bank of China (central bank rate table).
    #[display("BOC")]
    Boc,
    /// China Merchants Bank (commercial bank rate API).
    #[display("CMB")]
    Cmb,
}

/// Sell-side rates published by a bank, kept as the provider's original text.
///
/// Field values are `None` when the provider omitted them; a quote as a
/// whole only exists after at least one successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankQuote {
    pub provider: Provider,
    pub sell_spot: Option<String>,
    pub sell_cash: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

/// Capability of fetching a bank's current sell rates for one currency.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Provider identity, used for labelling quotes and log lines.
    fn provider(&self) -> Provider;

    /// Fetch the current sell rates for `currency`.
    ///
    /// Network, parse, and missing-row conditions all surface as
    /// [`FetchError`]; implementations must not panic.
    async fn fetch(&self, currency: Currency) -> Result<BankQuote, FetchError>;
}

/// Capability of fetching market-quote data: bulk history plus a
/// lightweight last-price snapshot.
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Fetch the close series for `symbol` over `range`, oldest first.
    async fn fetch_history(
        &self,
        symbol: &str,
        range: TimeRange,
    ) -> Result<Vec<Sample>, FetchError>;

    /// Latest traded rate for `symbol`, or `None` when no usable value
    /// could be obtained. Fetch failures are logged and swallowed here.
    async fn fetch_live_quote(&self, symbol: &str) -> Option<Sample>;
}
