//! Partition an ordered itinerary into day buckets.
//!
//! The splitter always uses [`LocalEstimator`] durations, even when totals
//! came from a remote provider, so the day boundaries are stable and never
//! depend on the network.

use std::mem;

use crate::config::TravelMode;
use crate::metrics::LocalEstimator;
use crate::stop::Stop;
use crate::totals::DayBucket;

/// Upper bound on emitted day buckets; further buckets are dropped, not
/// merged.
pub const MAX_DAY_BUCKETS: usize = 3;

/// Split ordered stops into day buckets near the daily budget.
///
/// Walks the order, charging each leg's estimated hours to the stop it
/// arrives at. When the running total lands inside the tolerance band
/// `[0.9 * budget, 1.1 * budget]`, the bucket closes and the next stop opens
/// a fresh one; the leg between two buckets is charged to neither. The final
/// stop always closes the open bucket, even outside the band, so a lone
/// trailing stop becomes a zero-hour bucket.
///
/// A leg that jumps over the band in one step leaves the bucket open until
/// the forced terminal close; overshoot does not split.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::{LocalEstimator, Stop, TravelMode, split_days};
///
/// let stops = vec![
///     Stop::new("a", "A", Coord { x: 0.0, y: 0.0 }),
///     Stop::new("b", "B", Coord { x: 0.0, y: 1.0 }),
///     Stop::new("c", "C", Coord { x: 0.0, y: 2.0 }),
/// ];
/// let days = split_days(&stops, TravelMode::Drive, &LocalEstimator::default(), 2.0);
/// assert_eq!(days.len(), 2);
/// assert_eq!(days[0].stops, ["a", "b"]);
/// assert_eq!(days[1].stops, ["c"]);
/// ```
pub fn split_days(
    stops: &[Stop],
    mode: TravelMode,
    estimator: &LocalEstimator,
    daily_budget_hours: f64,
) -> Vec<DayBucket> {
    let band = (daily_budget_hours * 0.9)..=(daily_budget_hours * 1.1);
    let mut days = Vec::new();
    let mut bucket = Vec::new();
    let mut hours = 0.0;

    for (index, stop) in stops.iter().enumerate() {
        if !bucket.is_empty() {
            hours += estimator.leg(&stops[index - 1], stop, mode).duration_hours;
        }
        bucket.push(stop.id.clone());

        let terminal = index + 1 == stops.len();
        if terminal || (bucket.len() > 1 && band.contains(&hours)) {
            days.push(DayBucket {
                stops: mem::take(&mut bucket),
                hours,
            });
            hours = 0.0;
        }
    }

    days.truncate(MAX_DAY_BUCKETS);
    days
}
