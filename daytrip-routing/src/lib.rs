//! OSRM-backed leg metrics for the Daytrip engine.
//!
//! This crate provides [`OsrmTableProvider`], an implementation of
//! [`daytrip_core::LegMetricsProvider`] that fetches a pairwise
//! distance/duration matrix from an OSRM Table service and extracts the
//! consecutive-leg (superdiagonal) entries.
//!
//! # Architecture
//!
//! One recompute issues exactly one batched HTTP request carrying the full
//! ordered coordinate list. The response is validated as a whole: a matrix
//! of the wrong shape, a missing annotation, or an unusable superdiagonal
//! cell fails the entire request, and the session falls back to its local
//! estimator. Remote results are never partially accepted.
//!
//! # Example
//!
//! ```no_run
//! use daytrip_routing::{OsrmTableProvider, OsrmTableProviderConfig};
//! use daytrip_core::{LegMetricsProvider, Stop, TravelMode};
//! use geo::Coord;
//! use std::time::Duration;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let config = OsrmTableProviderConfig::new("https://router.project-osrm.org")
//!     .with_timeout(Duration::from_secs(10));
//! let provider = OsrmTableProvider::with_config(config)?;
//!
//! let stops = vec![
//!     Stop::new("louvre", "Louvre", Coord { x: 2.3376, y: 48.8606 }),
//!     Stop::new("orsay", "Musée d'Orsay", Coord { x: 2.3266, y: 48.8600 }),
//! ];
//! let legs = provider.compute_legs(&stops, TravelMode::Walk).await?;
//! assert_eq!(legs.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```

#![forbid(unsafe_code)]

mod osrm;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_USER_AGENT, OsrmTableProvider, OsrmTableProviderConfig, ProviderBuildError,
};
