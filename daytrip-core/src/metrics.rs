//! Leg metrics: the provider seam and the offline estimator.
//!
//! A *leg* is the travel segment between two consecutive stops in the
//! itinerary order. Providers return one [`LegMetric`] per consecutive pair,
//! so `n` stops yield `n - 1` legs.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::TravelMode;
use crate::geodesy::haversine_km;
use crate::stop::Stop;

/// Default per-leg overhead in hours, covering parking, walking to the
/// entrance and similar stop-transition time.
pub const DEFAULT_STOP_OVERHEAD_HOURS: f64 = 0.25;

/// Distance and duration of one leg.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegMetric {
    /// Travel distance in kilometres.
    pub distance_km: f64,
    /// Travel duration in hours, including any per-leg overhead.
    pub duration_hours: f64,
}

/// Errors from [`LegMetricsProvider::compute_legs`].
///
/// Every variant is recoverable: the session falls back to the
/// [`LocalEstimator`] and never surfaces these to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LegMetricsError {
    /// Fewer than two stops were provided; there are no legs to measure.
    #[error("at least two stops are required to compute leg metrics")]
    NotEnoughStops,
    /// The request exceeded the configured deadline.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },
    /// The service could not be reached.
    #[error("network error reaching {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Error detail.
        message: String,
    },
    /// The service answered but reported a failure code.
    #[error("routing service error {code}: {message}")]
    Service {
        /// Service-specific error code.
        code: String,
        /// Error detail.
        message: String,
    },
    /// The payload could not be interpreted as a complete matrix.
    #[error("malformed matrix response: {message}")]
    Malformed {
        /// What was wrong with the payload.
        message: String,
    },
}

/// Compute per-leg distance and duration for an ordered stop sequence.
///
/// Implementations must return exactly `stops.len() - 1` metrics, in order,
/// or fail the whole request; partial results are never acceptable.
#[async_trait]
pub trait LegMetricsProvider: Send + Sync {
    /// Return one metric per consecutive pair of `stops`.
    ///
    /// Must return [`LegMetricsError::NotEnoughStops`] for fewer than two
    /// stops.
    async fn compute_legs(
        &self,
        stops: &[Stop],
        mode: TravelMode,
    ) -> Result<Vec<LegMetric>, LegMetricsError>;
}

#[async_trait]
impl<T: LegMetricsProvider + ?Sized> LegMetricsProvider for std::sync::Arc<T> {
    async fn compute_legs(
        &self,
        stops: &[Stop],
        mode: TravelMode,
    ) -> Result<Vec<LegMetric>, LegMetricsError> {
        (**self).compute_legs(stops, mode).await
    }
}

/// Offline leg estimator: haversine distance at the mode's average speed,
/// plus a fixed per-leg overhead.
///
/// Infallible and synchronous; [`LegMetricsProvider`] is implemented on top
/// of [`LocalEstimator::legs`] so the estimator can stand in wherever a
/// provider is expected.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::{LocalEstimator, Stop, TravelMode};
///
/// let estimator = LocalEstimator::default();
/// let a = Stop::new("a", "A", Coord { x: 0.0, y: 0.0 });
/// let b = Stop::new("b", "B", Coord { x: 0.0, y: 1.0 });
/// let leg = estimator.leg(&a, &b, TravelMode::Drive);
/// assert!((leg.distance_km - 111.19).abs() < 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct LocalEstimator {
    stop_overhead_hours: f64,
}

impl Default for LocalEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_OVERHEAD_HOURS)
    }
}

impl LocalEstimator {
    /// Create an estimator with an explicit per-leg overhead in hours.
    pub const fn new(stop_overhead_hours: f64) -> Self {
        Self {
            stop_overhead_hours,
        }
    }

    /// Estimate a single leg.
    pub fn leg(&self, from: &Stop, to: &Stop, mode: TravelMode) -> LegMetric {
        let distance_km = haversine_km(from.location, to.location);
        LegMetric {
            distance_km,
            duration_hours: distance_km / mode.speed_kmh() + self.stop_overhead_hours,
        }
    }

    /// Estimate every consecutive leg of an ordered stop sequence.
    ///
    /// Returns an empty vector for fewer than two stops.
    pub fn legs(&self, stops: &[Stop], mode: TravelMode) -> Vec<LegMetric> {
        stops
            .windows(2)
            .map(|pair| self.leg(&pair[0], &pair[1], mode))
            .collect()
    }
}

#[async_trait]
impl LegMetricsProvider for LocalEstimator {
    async fn compute_legs(
        &self,
        stops: &[Stop],
        mode: TravelMode,
    ) -> Result<Vec<LegMetric>, LegMetricsError> {
        if stops.len() < 2 {
            return Err(LegMetricsError::NotEnoughStops);
        }
        Ok(self.legs(stops, mode))
    }
}
