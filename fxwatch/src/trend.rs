//! Delta and direction signals derived from the stitched series.

use serde::Serialize;

use crate::series::StitchedView;

/// Direction of the latest rate relative to the window baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Up,
    Down,
}

/// Movement of the latest rate against the first sample in the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    pub delta: f64,
    pub percent: f64,
    pub direction: Direction,
}

impl Trend {
    /// A flat reading; zero movement renders as a gain.
    pub fn flat() -> Self {
        Self {
            delta: 0.0,
            percent: 0.0,
            direction: Direction::Up,
        }
    }

    /// Compute the trend over `view`.
    ///
    /// Baseline is the first sample's rate; with fewer than two samples
    /// (no history, or nothing at all) the reading is flat. A zero
    /// baseline yields a zero percentage rather than dividing by it.
    pub fn compute(view: &StitchedView) -> Self {
        let (Some(first), Some(last)) = (view.first(), view.last()) else {
            return Self::flat();
        };

        let baseline = first.rate;
        let delta = last.rate - baseline;
        let percent = if baseline == 0.0 {
            0.0
        } else {
            delta / baseline * 100.0
        };
        let direction = if delta >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        };

        Self {
            delta,
            percent,
            direction,
        }
    }
}

impl Default for Trend {
    fn default() -> Self {
        Self::flat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesBuffer;
    use chrono::{DateTime, TimeZone, Utc};
    use fxwatch_data::Sample;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_754_355_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_empty_view_is_flat_up() {
        let trend = Trend::compute(&StitchedView::default());
        assert_eq!(trend.delta, 0.0);
        assert_eq!(trend.percent, 0.0);
        assert_eq!(trend.direction, Direction::Up);
    }

    #[test]
    fn test_single_sample_is_flat() {
        let mut buffer = SeriesBuffer::new(10);
        buffer.append_live(Sample::new(at(0), 7.85));

        let trend = Trend::compute(&buffer.view());
        assert_eq!(trend.delta, 0.0);
        assert_eq!(trend.direction, Direction::Up);
    }

    #[test]
    fn test_history_baseline_with_live_gain() {
        let mut buffer = SeriesBuffer::new(10);
        buffer.load_history(vec![
            Sample::new(at(0), 7.80),
            Sample::new(at(60), 7.82),
        ]);
        buffer.append_live(Sample::new(at(120), 7.85));

        let trend = Trend::compute(&buffer.view());
        assert!((trend.delta - 0.05).abs() < 1e-9);
        assert!((trend.percent - 0.641_025).abs() < 1e-3);
        assert_eq!(trend.direction, Direction::Up);
    }

    #[test]
    fn test_loss_reads_down() {
        let mut buffer = SeriesBuffer::new(10);
        buffer.load_history(vec![Sample::new(at(0), 7.90)]);
        buffer.append_live(Sample::new(at(60), 7.85));

        let trend = Trend::compute(&buffer.view());
        assert!(trend.delta < 0.0);
        assert_eq!(trend.direction, Direction::Down);
    }

    #[test]
    fn test_zero_delta_counts_as_up() {
        let mut buffer = SeriesBuffer::new(10);
        buffer.load_history(vec![Sample::new(at(0), 7.85)]);
        buffer.append_live(Sample::new(at(60), 7.85));

        let trend = Trend::compute(&buffer.view());
        assert_eq!(trend.delta, 0.0);
        assert_eq!(trend.direction, Direction::Up);
    }
}
