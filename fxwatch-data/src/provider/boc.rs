//! Bank of China published exchange rate table.
//!
//! The rates page is server-rendered HTML; the currency is located by
//! substring-matching its Chinese name against the first cell of each table
//! row. The table layout is provider-owned and may change without notice;
//! a layout change that removes the row surfaces as
//! [`FetchError::NoMatchingRow`], indistinguishable from a delisted
//! currency.

use async_trait::async_trait;
use chrono::Utc;
use scraper::{Html, Selector};
use tracing::debug;

use crate::currency::Currency;
use crate::error::FetchError;
use crate::source::{BankQuote, Provider, RateSource, BROWSER_USER_AGENT, FETCH_TIMEOUT};

/// Bank of China paper exchange rate page.
pub const BOC_RATE_URL: &str = "https://www.boc.cn/sourcedb/whpj/";

/// Scrapes the Bank of China rate table.
#[derive(Debug, Clone)]
pub struct BocSource {
    client: reqwest::Client,
}

impl BocSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Locate the currency row and read its sell columns.
    ///
    /// BOC columns: name, spot buy, cash buy, spot sell, cash sell.
    fn parse_rates(
        html: &str,
        currency: Currency,
    ) -> Result<(Option<String>, Option<String>), FetchError> {
        let document = Html::parse_document(html);
        let row_selector =
            Selector::parse("table tr").map_err(|error| FetchError::Parse(error.to_string()))?;
        let cell_selector =
            Selector::parse("td").map_err(|error| FetchError::Parse(error.to_string()))?;

        for row in document.select(&row_selector) {
            let cells: Vec<String> = row
                .select(&cell_selector)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect();

            // Header rows and spacer rows carry fewer cells; skip them.
            if cells.len() < 5 {
                continue;
            }

            if cells[0].contains(currency.bank_table_name()) {
                let sell_spot = Some(cells[3].clone()).filter(|value| !value.is_empty());
                let sell_cash = Some(cells[4].clone()).filter(|value| !value.is_empty());
                return Ok((sell_spot, sell_cash));
            }
        }

        Err(FetchError::NoMatchingRow(currency))
    }
}

#[async_trait]
impl RateSource for BocSource {
    fn provider(&self) -> Provider {
        Provider::Boc
    }

    async fn fetch(&self, currency: Currency) -> Result<BankQuote, FetchError> {
        let response = self
            .client
            .get(BOC_RATE_URL)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Transport(format!(
                "BOC returned status {}",
                response.status()
            )));
        }

        let html = response.text().await?;
        let (sell_spot, sell_cash) = Self::parse_rates(&html, currency)?;
        debug!(%currency, ?sell_spot, ?sell_cash, "parsed BOC rate row");

        Ok(BankQuote {
            provider: Provider::Boc,
            sell_spot,
            sell_cash,
            fetched_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
        <html><body>
        <table>
            <tr><th>货币名称</th><th>现汇买入价</th><th>现钞买入价</th><th>现汇卖出价</th><th>现钞卖出价</th><th>发布时间</th></tr>
            <tr><td>英镑</td><td>921.05</td><td>892.42</td><td>927.84</td><td>927.84</td><td>2025-08-05 10:30:00</td></tr>
            <tr><td>欧元</td><td>788.61</td><td>764.10</td><td>794.42</td><td>794.42</td><td>2025-08-05 10:30:00</td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_rates_reads_sell_columns() {
        let (sell_spot, sell_cash) =
            BocSource::parse_rates(TABLE, Currency::Eur).expect("row should match");
        assert_eq!(sell_spot.as_deref(), Some("794.42"));
        assert_eq!(sell_cash.as_deref(), Some("794.42"));
    }

    #[test]
    fn test_parse_rates_missing_currency_is_no_matching_row() {
        let error = BocSource::parse_rates(TABLE, Currency::Jpy).unwrap_err();
        assert_eq!(error, FetchError::NoMatchingRow(Currency::Jpy));
    }

    #[test]
    fn test_parse_rates_skips_short_rows() {
        let html = r#"
            <table>
                <tr><td>欧元</td><td>788.61</td></tr>
                <tr><td>欧元</td><td>788.61</td><td>764.10</td><td>794.42</td><td>795.01</td></tr>
            </table>
        "#;
        let (sell_spot, sell_cash) =
            BocSource::parse_rates(html, Currency::Eur).expect("full row should match");
        assert_eq!(sell_spot.as_deref(), Some("794.42"));
        assert_eq!(sell_cash.as_deref(), Some("795.01"));
    }

    #[test]
    fn test_parse_rates_empty_document_is_no_matching_row() {
        let error = BocSource::parse_rates("<html></html>", Currency::Usd).unwrap_err();
        assert_eq!(error, FetchError::NoMatchingRow(Currency::Usd));
    }
}
