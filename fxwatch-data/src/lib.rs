//! Rate source adapters and shared data model for the fxwatch monitor.
//!
//! Provides:
//! - Static `Currency` and `TimeRange` lookup tables
//! - The `Sample` and `BankQuote` data model
//! - `RateSource` (bank sell rates) and `MarketSource` (history + live
//!   quote) capabilities with their concrete providers
//! - The `FetchError` taxonomy shared by all providers

pub mod currency;
pub mod error;
pub mod provider;
pub mod sample;
pub mod source;

pub use currency::{Currency, TimeRange};
pub use error::FetchError;
pub use sample::Sample;
pub use source::{BankQuote, MarketSource, Provider, RateSource};
