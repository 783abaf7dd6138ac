//! Yahoo Finance FX chart adapter.
//!
//! Serves both market-quote operations from the v8 chart API: bulk close
//! history for a (period, interval) pair, and a live quote taken from the
//! chart metadata's last traded price. When the snapshot price is absent or
//! not a number, the freshest intraday close stands in for it.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::currency::TimeRange;
use crate::error::FetchError;
use crate::sample::Sample;
use crate::source::{MarketSource, BROWSER_USER_AGENT, FETCH_TIMEOUT};

/// Yahoo Finance v8 chart API base.
pub const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Bulk history pulls cover up to three months of closes; allow them longer
/// than the 5s quote timeout.
const HISTORY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    result: Vec<ChartResult>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice", default)]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Yahoo Finance FX market data source.
#[derive(Debug, Clone)]
pub struct YahooFx {
    client: reqwest::Client,
}

impl YahooFx {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_chart(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
        timeout: Duration,
    ) -> Result<ChartResult, FetchError> {
        let url = format!("{YAHOO_CHART_URL}/{symbol}?range={period}&interval={interval}");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .timeout(timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Transport(format!(
                "yahoo returned status {}",
                response.status()
            )));
        }

        let payload: ChartResponse = response.json().await?;

        if let Some(error) = &payload.chart.error {
            if !error.is_null() {
                return Err(FetchError::Parse(format!("yahoo chart error: {error}")));
            }
        }

        payload
            .chart
            .result
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Parse("chart response carried no result".to_string()))
    }

    /// Pair timestamps with closes, dropping null and non-finite entries.
    /// Output is sorted ascending so downstream stitching never reorders.
    fn close_series(result: &ChartResult) -> Vec<Sample> {
        let Some(quote) = result.indicators.quote.first() else {
            return Vec::new();
        };

        let mut samples: Vec<Sample> = result
            .timestamp
            .iter()
            .zip(quote.close.iter())
            .filter_map(|(&epoch, close)| {
                let time = DateTime::from_timestamp(epoch, 0)?;
                let sample = Sample::new(time, (*close)?);
                sample.is_valid().then_some(sample)
            })
            .collect();

        samples.sort_by_key(|sample| sample.time);
        samples
    }

    /// Snapshot price when usable, otherwise the freshest intraday close.
    fn pick_live_rate(result: &ChartResult) -> Option<f64> {
        result
            .meta
            .regular_market_price
            .filter(|price| price.is_finite() && *price > 0.0)
            .or_else(|| Self::close_series(result).last().map(|sample| sample.rate))
    }

    async fn live_quote(&self, symbol: &str) -> Result<Sample, FetchError> {
        // A single 1d/1m chart call carries both the last-price snapshot
        // and the intraday series the fallback reads from.
        let result = self.fetch_chart(symbol, "1d", "1m", FETCH_TIMEOUT).await?;

        Self::pick_live_rate(&result)
            .map(|rate| Sample::new(Utc::now(), rate))
            .ok_or(FetchError::EmptyHistory)
    }
}

#[async_trait]
impl MarketSource for YahooFx {
    async fn fetch_history(
        &self,
        symbol: &str,
        range: TimeRange,
    ) -> Result<Vec<Sample>, FetchError> {
        let result = self
            .fetch_chart(symbol, range.period(), range.interval(), HISTORY_TIMEOUT)
            .await?;

        let samples = Self::close_series(&result);
        if samples.is_empty() {
            return Err(FetchError::EmptyHistory);
        }

        debug!(symbol, %range, points = samples.len(), "fetched rate history");
        Ok(samples)
    }

    async fn fetch_live_quote(&self, symbol: &str) -> Option<Sample> {
        match self.live_quote(symbol).await {
            Ok(sample) => Some(sample),
            Err(error) => {
                debug!(symbol, %error, "live quote fetch failed");
                None
            }
        }
    }
}
