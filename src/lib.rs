//! Facade crate for the Daytrip itinerary engine.
//!
//! This crate re-exports the core planning types and exposes the OSRM-backed
//! leg-metrics provider behind a feature flag.

#![forbid(unsafe_code)]

pub use daytrip_core::{
    DayBucket, Engine, Itinerary, LegMetric, LegMetricsError, LegMetricsProvider, LocalEstimator,
    MemoryCatalog, RoutingConfig, RoutingConfigError, Stop, StopCatalog, StopId, Totals,
    TravelMode, TripSession, haversine_km, nearest_neighbour_order, optimize_order, split_days,
};

#[cfg(feature = "routing-osrm")]
pub use daytrip_routing::{OsrmTableProvider, OsrmTableProviderConfig, ProviderBuildError};
