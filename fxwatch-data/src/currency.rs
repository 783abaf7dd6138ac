//! Static lookup tables for the supported currencies and chart ranges.

use serde::{Deserialize, Serialize};

/// Foreign currencies quoted against CNY.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Currency {
    #[display("EUR")]
    Eur,
    #[display("USD")]
    Usd,
    #[display("HKD")]
    Hkd,
    #[display("GBP")]
    Gbp,
    #[display("JPY")]
    Jpy,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Eur,
        Currency::Usd,
        Currency::Hkd,
        Currency::Gbp,
        Currency::Jpy,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Hkd => "HKD",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Eur => "Euro",
            Currency::Usd => "US Dollar",
            Currency::Hkd => "Hong Kong Dollar",
            Currency::Gbp => "British Pound",
            Currency::Jpy => "Japanese Yen",
        }
    }

    /// Simplified-Chinese name used by both bank rate tables.
    pub fn bank_table_name(&self) -> &'static str {
        match self {
            Currency::Eur => "欧元",
            Currency::Usd => "美元",
            Currency::Hkd => "港币",
            Currency::Gbp => "英镑",
            Currency::Jpy => "日元",
        }
    }

    /// Yahoo Finance symbol for this currency quoted in CNY.
    pub fn market_symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "EURCNY=X",
            Currency::Usd => "CNY=X",
            Currency::Hkd => "HKDCNY=X",
            Currency::Gbp => "GBPCNY=X",
            Currency::Jpy => "JPYCNY=X",
        }
    }
}

/// Chart look-back windows, expressed as Yahoo (period, interval) pairs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum TimeRange {
    #[display("1h")]
    Hour1,
    #[display("24h")]
    Hour24,
    #[display("48h")]
    Hour48,
    #[display("7d")]
    Day7,
    #[display("1m")]
    Month1,
}

impl TimeRange {
    pub const ALL: [TimeRange; 5] = [
        TimeRange::Hour1,
        TimeRange::Hour24,
        TimeRange::Hour48,
        TimeRange::Day7,
        TimeRange::Month1,
    ];

    /// Yahoo chart `range` parameter.
    pub fn period(&self) -> &'static str {
        match self {
            TimeRange::Hour1 => "1d",
            TimeRange::Hour24 => "5d",
            TimeRange::Hour48 => "5d",
            TimeRange::Day7 => "1mo",
            TimeRange::Month1 => "3mo",
        }
    }

    /// Yahoo chart `interval` parameter (history sampling step).
    pub fn interval(&self) -> &'static str {
        match self {
            TimeRange::Hour1 => "1m",
            TimeRange::Hour24 => "1m",
            TimeRange::Hour48 => "2m",
            TimeRange::Day7 => "15m",
            TimeRange::Month1 => "60m",
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Hour48
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_tables_are_consistent() {
        for currency in Currency::ALL {
            assert_eq!(currency.code(), currency.to_string());
            assert!(!currency.bank_table_name().is_empty());
            assert!(currency.market_symbol().ends_with("=X"));
        }
    }

    #[test]
    fn test_usd_uses_short_symbol() {
        // Yahoo quotes USD/CNY under the bare "CNY=X" ticker
        assert_eq!(Currency::Usd.market_symbol(), "CNY=X");
    }

    #[test]
    fn test_default_range() {
        assert_eq!(TimeRange::default(), TimeRange::Hour48);
        assert_eq!(TimeRange::default().period(), "5d");
        assert_eq!(TimeRange::default().interval(), "2m");
    }
}
