//! Fixed-tick aggregation controller.
//!
//! Owns the selection, the stitched series, and the bank pollers. Each tick
//! pulls one live market quote plus any due bank rates concurrently,
//! recomputes the trend, and publishes an immutable snapshot for the
//! renderer. A selection change atomically resets all derived state before
//! any fetch for the new selection is issued.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use futures::future::join_all;
use fxwatch_data::provider::{BocSource, CmbSource, YahooFx};
use fxwatch_data::{BankQuote, Currency, MarketSource, Provider, Sample, TimeRange};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::nearest::{NoData, nearest_sample};
use crate::poller::ThrottledPoller;
use crate::series::{DEFAULT_LIVE_CAPACITY, SeriesBuffer};
use crate::trend::Trend;

/// Controller tick period.
pub const TICK_PERIOD: std::time::Duration = std::time::Duration::from_secs(3);

/// Bank of China poll cadence (seconds).
pub const BOC_POLL_SECS: i64 = 30;

/// China Merchants Bank poll cadence (seconds).
pub const CMB_POLL_SECS: i64 = 10;

/// Currency and look-back window chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub currency: Currency,
    pub range: TimeRange,
}

impl Selection {
    pub fn new(currency: Currency, range: TimeRange) -> Self {
        Self { currency, range }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(Currency::Eur, TimeRange::default())
    }
}

/// Immutable view published to the renderer on every tick.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub selection: Option<Selection>,
    /// Stitched history + live series, ascending by timestamp.
    pub series: Vec<Sample>,
    /// Latest quote per bank provider; missing until its first success.
    pub bank_quotes: Vec<BankQuote>,
    pub trend: Trend,
}

impl Snapshot {
    /// Latest stitched rate, the renderer's headline metric.
    pub fn current_rate(&self) -> Option<f64> {
        self.series.last().map(|sample| sample.rate)
    }

    /// Quote held for `provider`, if one has been fetched.
    pub fn bank_quote(&self, provider: Provider) -> Option<&BankQuote> {
        self.bank_quotes
            .iter()
            .find(|quote| quote.provider == provider)
    }

    /// Nearest sample to a cursor timestamp; see [`nearest_sample`].
    pub fn nearest(&self, target: DateTime<Utc>) -> Result<Sample, NoData> {
        nearest_sample(&self.series, target)
    }
}

/// The aggregation controller.
pub struct Monitor {
    market: Box<dyn MarketSource>,
    pollers: Vec<ThrottledPoller>,
    series: SeriesBuffer,
    selection: Option<Selection>,
    trend: Trend,
}

impl Monitor {
    /// Monitor wired to the production providers, sharing one HTTP client.
    pub fn new() -> Self {
        let client = reqwest::Client::new();
        Self::with_sources(
            Box::new(YahooFx::new(client.clone())),
            vec![
                ThrottledPoller::new(
                    Box::new(BocSource::new(client.clone())),
                    ChronoDuration::seconds(BOC_POLL_SECS),
                ),
                ThrottledPoller::new(
                    Box::new(CmbSource::new(client)),
                    ChronoDuration::seconds(CMB_POLL_SECS),
                ),
            ],
            DEFAULT_LIVE_CAPACITY,
        )
    }

    /// Monitor over caller-supplied sources.
    pub fn with_sources(
        market: Box<dyn MarketSource>,
        pollers: Vec<ThrottledPoller>,
        live_capacity: usize,
    ) -> Self {
        Self {
            market,
            pollers,
            series: SeriesBuffer::new(live_capacity),
            selection: None,
            trend: Trend::flat(),
        }
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Advance one tick.
    ///
    /// Honours a selection change first, then gathers the live quote and
    /// every due bank rate concurrently. Each provider call carries its own
    /// hard timeout, so one slow or failed source cannot stall the others
    /// or delay the next tick past that timeout. All buffer and quote
    /// mutation happens here, on the caller's task.
    pub async fn tick(&mut self, selection: Selection, now: DateTime<Utc>) -> Snapshot {
        if self.selection != Some(selection) {
            self.apply_selection(selection).await;
        }

        let symbol = selection.currency.market_symbol();
        let (live, _) = tokio::join!(
            self.market.fetch_live_quote(symbol),
            join_all(
                self.pollers
                    .iter_mut()
                    .map(|poller| poller.poll(selection.currency, now)),
            ),
        );

        if let Some(sample) = live {
            self.series.append_live(sample);
        }

        self.trend = Trend::compute(&self.series.view());
        self.snapshot()
    }

    /// Reset for a new (currency, range) selection and reload history.
    ///
    /// Stale samples and quotes are cleared before any fetch for the new
    /// selection goes out. A failed history fetch starts the selection from
    /// an empty series instead of propagating.
    async fn apply_selection(&mut self, selection: Selection) {
        info!(
            currency = %selection.currency,
            range = %selection.range,
            "selection changed; resetting aggregation state"
        );

        self.series.clear();
        self.trend = Trend::flat();
        for poller in &mut self.pollers {
            poller.reset();
        }
        self.selection = Some(selection);

        match self
            .market
            .fetch_history(selection.currency.market_symbol(), selection.range)
            .await
        {
            Ok(history) => self.series.load_history(history),
            Err(error) => {
                warn!(%error, "history fetch failed; starting with an empty series");
            }
        }
    }

    /// Build the published view from current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            selection: self.selection,
            series: self.series.view().into_samples(),
            bank_quotes: self
                .pollers
                .iter()
                .filter_map(|poller| poller.current().cloned())
                .collect(),
            trend: self.trend,
        }
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the aggregation loop on its own task.
///
/// The loop ticks every [`TICK_PERIOD`], re-reads the selection channel,
/// and publishes a fresh [`Snapshot`]. It ends on its own once every
/// snapshot receiver is gone; aborting the returned handle stops it
/// immediately, dropping any in-flight fetches without awaiting them.
pub fn spawn_monitor(
    mut monitor: Monitor,
    selection_rx: watch::Receiver<Selection>,
    snapshot_tx: watch::Sender<Snapshot>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let selection = *selection_rx.borrow();
            let snapshot = monitor.tick(selection, Utc::now()).await;
            if snapshot_tx.send(snapshot).is_err() {
                info!("all snapshot receivers dropped; stopping monitor loop");
                break;
            }
        }
    })
}
