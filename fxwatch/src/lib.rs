//! Live FX-to-CNY rate aggregation engine.
//!
//! Combines a one-shot market history with an append-only live sample
//! stream, polls two bank rate sources on independent cadences, derives
//! trend signals, and publishes immutable snapshots for a renderer:
//! - [`series`]: bounded live buffer stitched onto the historical series
//! - [`trend`]: delta / percent / direction relative to the window baseline
//! - [`nearest`]: binary-search nearest-timestamp lookup for cursor queries
//! - [`poller`]: per-source throttled polling state machine
//! - [`monitor`]: the fixed-tick aggregation controller and its spawned loop

pub mod monitor;
pub mod nearest;
pub mod poller;
pub mod series;
pub mod trend;

pub use monitor::{Monitor, Selection, Snapshot, TICK_PERIOD, spawn_monitor};
pub use nearest::{NoData, nearest_sample};
pub use poller::ThrottledPoller;
pub use series::{DEFAULT_LIVE_CAPACITY, SeriesBuffer, StitchedView};
pub use trend::{Direction, Trend};

// Re-export the shared data model for convenience
pub use fxwatch_data::{BankQuote, Currency, FetchError, Provider, Sample, TimeRange};
