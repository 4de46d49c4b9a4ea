//! Aggregated route totals and per-day buckets.

use crate::metrics::LegMetric;
use crate::stop::StopId;

/// A contiguous run of itinerary stops assigned to one travel day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayBucket {
    /// Stops visited that day, in itinerary order. Never empty.
    pub stops: Vec<StopId>,
    /// Travel hours accumulated within the day.
    pub hours: f64,
}

/// Whole-route summary, rebuilt from scratch on every recompute.
///
/// The default value (`0 km, 0 h, no days`) is the summary of any itinerary
/// with fewer than two stops.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Totals {
    /// Sum of leg distances in kilometres.
    pub total_km: f64,
    /// Sum of leg durations in hours.
    pub total_hours: f64,
    /// Day buckets from the splitter, capped at
    /// [`MAX_DAY_BUCKETS`](crate::MAX_DAY_BUCKETS).
    pub days: Vec<DayBucket>,
}

impl Totals {
    /// Sum leg metrics and attach the day split.
    pub fn from_legs(legs: &[LegMetric], days: Vec<DayBucket>) -> Self {
        Self {
            total_km: legs.iter().map(|leg| leg.distance_km).sum(),
            total_hours: legs.iter().map(|leg| leg.duration_hours).sum(),
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_legs_sums_distance_and_duration() {
        let legs = [
            LegMetric {
                distance_km: 10.0,
                duration_hours: 0.5,
            },
            LegMetric {
                distance_km: 20.0,
                duration_hours: 1.0,
            },
        ];
        let totals = Totals::from_legs(&legs, Vec::new());
        assert_eq!(totals.total_km, 30.0);
        assert_eq!(totals.total_hours, 1.5);
    }

    #[test]
    fn default_is_the_empty_summary() {
        let totals = Totals::default();
        assert_eq!(totals.total_km, 0.0);
        assert_eq!(totals.total_hours, 0.0);
        assert!(totals.days.is_empty());
    }
}
