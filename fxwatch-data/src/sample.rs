//! A single observed exchange rate at a point in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One (timestamp, rate) observation. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: DateTime<Utc>,
    pub rate: f64,
}

impl Sample {
    pub fn new(time: DateTime<Utc>, rate: f64) -> Self {
        Self { time, rate }
    }

    /// A sample is plottable only when its rate is a finite, positive number.
    pub fn is_valid(&self) -> bool {
        self.rate.is_finite() && self.rate > 0.0
    }
}
