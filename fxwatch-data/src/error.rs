use crate::currency::Currency;
use thiserror::Error;

/// All errors generated while fetching from a rate provider.
///
/// Providers never panic on network, parse, or missing-field conditions;
/// every such condition maps onto one of these variants and is swallowed
/// at the poller/controller boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected response shape: {0}")]
    Parse(String),

    #[error("no rate row matching {0} in provider response")]
    NoMatchingRow(Currency),

    #[error("provider returned an empty history")]
    EmptyHistory,
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::Parse(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matching_row_names_the_currency() {
        let error = FetchError::NoMatchingRow(Currency::Gbp);
        assert!(error.to_string().contains("GBP"));
    }
}
