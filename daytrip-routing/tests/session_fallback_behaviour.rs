//! Cross-crate behaviour: a planning session degrades to the local
//! estimator when the remote provider fails, and consumes remote legs when
//! it succeeds.

use daytrip_core::{
    Engine, LegMetric, LegMetricsError, MemoryCatalog, RoutingConfig, Stop, TravelMode,
    TripSession,
};
use daytrip_routing::test_support::StubLegMetricsProvider;
use geo::Coord;

fn catalog() -> MemoryCatalog {
    MemoryCatalog::from_stops([
        Stop::new("a", "A", Coord { x: 0.0, y: 0.0 }),
        Stop::new("b", "B", Coord { x: 0.0, y: 1.0 }),
        Stop::new("c", "C", Coord { x: 0.0, y: 2.0 }),
    ])
}

fn remote_config() -> RoutingConfig {
    RoutingConfig::new(TravelMode::Drive, Engine::Remote, 5.0).expect("valid config")
}

#[tokio::test]
async fn http_500_falls_back_to_local_estimates() {
    let failing = StubLegMetricsProvider::with_error(LegMetricsError::Http {
        url: "http://osrm.example.com/table".to_owned(),
        status: 500,
        message: "internal server error".to_owned(),
    });
    let remote_session = TripSession::with_remote(catalog(), failing, remote_config());
    let local_session = TripSession::offline(
        catalog(),
        RoutingConfig::new(TravelMode::Drive, Engine::Local, 5.0).expect("valid config"),
    );

    for id in ["a", "b", "c"] {
        remote_session.toggle(id);
        local_session.toggle(id);
    }
    remote_session.recompute().await;
    local_session.recompute().await;

    assert_eq!(remote_session.totals(), local_session.totals());
    assert!(remote_session.totals().total_km > 200.0);
}

#[tokio::test]
async fn successful_remote_legs_drive_the_totals() {
    let provider = StubLegMetricsProvider::with_uniform_leg(LegMetric {
        distance_km: 80.0,
        duration_hours: 1.0,
    });
    let session = TripSession::with_remote(catalog(), provider, remote_config());

    for id in ["a", "b", "c"] {
        session.toggle(id);
    }
    session.recompute().await;

    let totals = session.totals();
    assert_eq!(totals.total_km, 160.0);
    assert_eq!(totals.total_hours, 2.0);
    // Day boundaries stay on local estimates even with remote totals.
    assert!(!totals.days.is_empty());
}
