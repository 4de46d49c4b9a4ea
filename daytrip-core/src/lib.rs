//! Core domain model for the Daytrip itinerary engine.
//!
//! The crate covers the planning pipeline from a read-only stop catalog to a
//! day-by-day travel summary: the [`Itinerary`] selection/order model, leg
//! distance and duration estimation ([`LegMetricsProvider`] with the offline
//! [`LocalEstimator`]), the nearest-neighbour + 2-opt [`optimize_order`]
//! heuristic, the [`split_days`] partitioner, and the [`TripSession`]
//! orchestrator that ties them together with last-write-wins recomputation.
//!
//! Network-backed providers live in `daytrip-routing`; this crate only
//! defines the seam they implement.

#![forbid(unsafe_code)]

mod config;
mod geodesy;
mod itinerary;
mod metrics;
mod optimize;
mod session;
mod split;
mod stop;
mod totals;

pub use config::{
    DEFAULT_DAILY_BUDGET_HOURS, Engine, ParseEngineError, ParseTravelModeError, RoutingConfig,
    RoutingConfigError, TravelMode,
};
pub use geodesy::{MEAN_EARTH_RADIUS_KM, haversine_km, path_length_km};
pub use itinerary::Itinerary;
pub use metrics::{
    DEFAULT_STOP_OVERHEAD_HOURS, LegMetric, LegMetricsError, LegMetricsProvider, LocalEstimator,
};
pub use optimize::{nearest_neighbour_order, optimize_order};
pub use session::TripSession;
pub use split::{MAX_DAY_BUCKETS, split_days};
pub use stop::{MemoryCatalog, Stop, StopCatalog, StopId};
pub use totals::{DayBucket, Totals};
