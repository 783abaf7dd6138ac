//! Sub-linear nearest-timestamp lookup for interactive cursor tracking.
//!
//! The stitched series is monotonic in time, so the neighbourhood of any
//! target timestamp is found with a binary search rather than a scan; the
//! query fires on every cursor movement over a series that can hold
//! thousands of points.

use chrono::{DateTime, Utc};
use fxwatch_data::Sample;
use thiserror::Error;

/// A lookup ran against an empty series. The caller decides how to react
/// (a renderer typically skips drawing its cursor marker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no samples available for nearest-timestamp lookup")]
pub struct NoData;

/// Sample in `samples` whose timestamp is closest to `target`.
///
/// `samples` must be ascending by time. Targets before the first or after
/// the last sample clamp to the boundary sample; an exact midpoint between
/// two samples resolves to the earlier one.
pub fn nearest_sample(samples: &[Sample], target: DateTime<Utc>) -> Result<Sample, NoData> {
    if samples.is_empty() {
        return Err(NoData);
    }

    let idx = samples.partition_point(|sample| sample.time < target);

    if idx == 0 {
        return Ok(samples[0]);
    }
    if idx == samples.len() {
        return Ok(samples[idx - 1]);
    }

    let earlier = samples[idx - 1];
    let later = samples[idx];
    if target - earlier.time <= later.time - target {
        Ok(earlier)
    } else {
        Ok(later)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_754_355_000 + secs, 0).unwrap()
    }

    fn series() -> Vec<Sample> {
        vec![
            Sample::new(at(0), 7.80),
            Sample::new(at(60), 7.82),
            Sample::new(at(180), 7.85),
        ]
    }

    #[test]
    fn test_empty_series_is_no_data() {
        assert_eq!(nearest_sample(&[], at(0)), Err(NoData));
    }

    #[test]
    fn test_clamps_to_boundaries() {
        let samples = series();
        assert_eq!(nearest_sample(&samples, at(-500)).unwrap().rate, 7.80);
        assert_eq!(nearest_sample(&samples, at(9_000)).unwrap().rate, 7.85);
    }

    #[test]
    fn test_picks_strictly_closer_neighbour() {
        let samples = series();
        assert_eq!(nearest_sample(&samples, at(10)).unwrap().rate, 7.80);
        assert_eq!(nearest_sample(&samples, at(55)).unwrap().rate, 7.82);
        assert_eq!(nearest_sample(&samples, at(150)).unwrap().rate, 7.85);
    }

    #[test]
    fn test_midpoint_tie_resolves_to_earlier_sample() {
        let samples = series();
        // at(30) is equidistant from at(0) and at(60)
        assert_eq!(nearest_sample(&samples, at(30)).unwrap().rate, 7.80);
        // at(120) is equidistant from at(60) and at(180)
        assert_eq!(nearest_sample(&samples, at(120)).unwrap().rate, 7.82);
    }

    #[test]
    fn test_exact_timestamp_hits_that_sample() {
        let samples = series();
        assert_eq!(nearest_sample(&samples, at(60)).unwrap().rate, 7.82);
    }
}
