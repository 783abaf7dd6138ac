//! China Merchants Bank foreign exchange rate API.
//!
//! JSON endpoint listing one entry per currency; the target entry is found
//! by substring-matching the Chinese currency name against `ccyNbr`
//! (first match wins). Sell rates arrive as decimal text in `rthOfr`
//! (spot) and `rtcOfr` (cash) and are kept verbatim.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use crate::currency::Currency;
use crate::error::FetchError;
use crate::source::{BankQuote, Provider, RateSource, FETCH_TIMEOUT};

/// China Merchants Bank rate API endpoint.
pub const CMB_RATE_URL: &str = "https://fx.cmbchina.com/api/v1/fx/rate";

const CMB_REFERER: &str = "https://fx.cmbchina.com/hq/";
const CMB_ORIGIN: &str = "https://fx.cmbchina.com";

#[derive(Debug, Deserialize)]
struct CmbRateResponse {
    #[serde(default)]
    body: Vec<CmbRateEntry>,
}

#[derive(Debug, Deserialize)]
struct CmbRateEntry {
    #[serde(rename = "ccyNbr")]
    name: String,
    /// Spot sell rate, decimal as text.
    #[serde(rename = "rthOfr", default)]
    sell_spot: Option<String>,
    /// Cash sell rate, decimal as text.
    #[serde(rename = "rtcOfr", default)]
    sell_cash: Option<String>,
}

/// Fetches sell rates from the China Merchants Bank API.
#[derive(Debug, Clone)]
pub struct CmbSource {
    client: reqwest::Client,
}

impl CmbSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn find_entry(
        response: CmbRateResponse,
        currency: Currency,
    ) -> Result<CmbRateEntry, FetchError> {
        response
            .body
            .into_iter()
            .find(|entry| entry.name.contains(currency.bank_table_name()))
            .ok_or(FetchError::NoMatchingRow(currency))
    }
}

#[async_trait]
impl RateSource for CmbSource {
    fn provider(&self) -> Provider {
        Provider::Cmb
    }

    async fn fetch(&self, currency: Currency) -> Result<BankQuote, FetchError> {
        let response = self
            .client
            .get(CMB_RATE_URL)
            .header(reqwest::header::USER_AGENT, "Mozilla/5.0")
            .header(reqwest::header::REFERER, CMB_REFERER)
            .header(reqwest::header::ORIGIN, CMB_ORIGIN)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Transport(format!(
                "CMB returned status {}",
                response.status()
            )));
        }

        let payload: CmbRateResponse = response.json().await?;
        let entry = Self::find_entry(payload, currency)?;
        debug!(
            %currency,
            sell_spot = ?entry.sell_spot,
            sell_cash = ?entry.sell_cash,
            "matched CMB rate entry"
        );

        Ok(BankQuote {
            provider: Provider::Cmb,
            sell_spot: entry.sell_spot,
            sell_cash: entry.sell_cash,
            fetched_at: Utc::now(),
        })
    }
}
