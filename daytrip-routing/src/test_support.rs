//! Test utilities for leg-metrics providers.
//!
//! [`StubLegMetricsProvider`] is a deterministic double for
//! [`LegMetricsProvider`] that answers without any network access, for use
//! by downstream crates testing session behaviour.

use async_trait::async_trait;
use daytrip_core::{LegMetric, LegMetricsError, LegMetricsProvider, Stop, TravelMode};

/// Stub provider returning a canned per-leg metric or a canned error.
///
/// # Example
///
/// ```
/// use daytrip_core::{LegMetric, LegMetricsProvider, Stop, TravelMode};
/// use daytrip_routing::test_support::StubLegMetricsProvider;
/// use geo::Coord;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let provider = StubLegMetricsProvider::with_uniform_leg(LegMetric {
///     distance_km: 50.0,
///     duration_hours: 0.5,
/// });
/// let stops = vec![
///     Stop::new("a", "A", Coord { x: 0.0, y: 0.0 }),
///     Stop::new("b", "B", Coord { x: 1.0, y: 1.0 }),
///     Stop::new("c", "C", Coord { x: 2.0, y: 2.0 }),
/// ];
/// let legs = provider.compute_legs(&stops, TravelMode::Drive).await.unwrap();
/// assert_eq!(legs.len(), 2);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct StubLegMetricsProvider {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    UniformLeg(LegMetric),
    Error(LegMetricsError),
}

impl StubLegMetricsProvider {
    /// Create a provider that returns `leg` for every consecutive pair.
    #[must_use]
    pub fn with_uniform_leg(leg: LegMetric) -> Self {
        Self {
            response: StubResponse::UniformLeg(leg),
        }
    }

    /// Create a provider that fails every non-trivial request with `error`.
    ///
    /// Fewer than two stops still return
    /// [`LegMetricsError::NotEnoughStops`].
    #[must_use]
    pub fn with_error(error: LegMetricsError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }
}

#[async_trait]
impl LegMetricsProvider for StubLegMetricsProvider {
    async fn compute_legs(
        &self,
        stops: &[Stop],
        _mode: TravelMode,
    ) -> Result<Vec<LegMetric>, LegMetricsError> {
        if stops.len() < 2 {
            return Err(LegMetricsError::NotEnoughStops);
        }
        match &self.response {
            StubResponse::UniformLeg(leg) => Ok(vec![*leg; stops.len() - 1]),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
