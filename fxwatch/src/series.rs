//! Bounded storage stitching one-shot history onto the live sample stream.
//!
//! History is replaced wholesale once per selection; live samples append
//! one per tick into a fixed-capacity ring that evicts its oldest entry on
//! overflow. The stitched view concatenates both sides into a single
//! timestamp-ordered sequence for trend and cursor queries.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use fxwatch_data::Sample;

use crate::nearest::{NoData, nearest_sample};

/// Default live-sample capacity: an hour of one-per-second appends.
pub const DEFAULT_LIVE_CAPACITY: usize = 3600;

/// Historical series plus the bounded live sample ring.
#[derive(Debug, Clone)]
pub struct SeriesBuffer {
    history: Vec<Sample>,
    live: VecDeque<Sample>,
    capacity: usize,
}

impl SeriesBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: Vec::new(),
            live: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Replace the historical series wholesale.
    ///
    /// Invalid samples are dropped and ordering is normalised, so the
    /// stitched view never carries placeholders or out-of-order points.
    pub fn load_history(&mut self, mut series: Vec<Sample>) {
        series.retain(Sample::is_valid);
        series.sort_by_key(|sample| sample.time);
        self.history = series;
    }

    /// Append a live sample, evicting the single oldest once at capacity.
    ///
    /// Returns whether the sample was stored; invalid samples are rejected
    /// rather than stored as placeholders.
    pub fn append_live(&mut self, sample: Sample) -> bool {
        if !sample.is_valid() {
            return false;
        }
        if self.live.len() >= self.capacity {
            self.live.pop_front();
        }
        self.live.push_back(sample);
        true
    }

    pub fn clear_live(&mut self) {
        self.live.clear();
    }

    /// Drop both sides; used when the selection changes.
    pub fn clear(&mut self) {
        self.history.clear();
        self.live.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn live_len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty() && self.live.is_empty()
    }

    /// Materialise history followed by live as one ordered sequence.
    pub fn view(&self) -> StitchedView {
        StitchedView {
            samples: self
                .history
                .iter()
                .chain(self.live.iter())
                .copied()
                .collect(),
        }
    }
}

impl Default for SeriesBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_LIVE_CAPACITY)
    }
}

/// History followed by live samples as one time-ordered sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StitchedView {
    samples: Vec<Sample>,
}

impl StitchedView {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn first(&self) -> Option<Sample> {
        self.samples.first().copied()
    }

    pub fn last(&self) -> Option<Sample> {
        self.samples.last().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    /// Sample closest in time to `target`; see [`nearest_sample`].
    pub fn nearest(&self, target: DateTime<Utc>) -> Result<Sample, NoData> {
        nearest_sample(&self.samples, target)
    }
}
