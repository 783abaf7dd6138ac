//! Concrete rate providers.
//!
//! - [`boc::BocSource`]: Bank of China published rate table (HTML scrape)
//! - [`cmb::CmbSource`]: China Merchants Bank rate API (JSON)
//! - [`yahoo::YahooFx`]: Yahoo Finance FX chart API (history + live quote)

pub mod boc;
pub mod cmb;
pub mod yahoo;

pub use boc::BocSource;
pub use cmb::CmbSource;
pub use yahoo::YahooFx;
