//! Planning session: the single context structure for itinerary mutation
//! and totals recomputation.
//!
//! There is no global state; every call site receives a [`TripSession`] by
//! reference. The session guards its mutable state with a mutex that is
//! never held across an await, and serialises recomputes with a generation
//! counter: each mutation bumps the generation, and a recompute commits its
//! totals only if no newer mutation happened while it ran (last-write-wins).

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::{Engine, RoutingConfig};
use crate::itinerary::Itinerary;
use crate::metrics::{LegMetric, LegMetricsProvider, LocalEstimator};
use crate::optimize::optimize_order;
use crate::split::split_days;
use crate::stop::{Stop, StopCatalog, StopId};
use crate::totals::Totals;

#[derive(Debug)]
struct State {
    itinerary: Itinerary,
    config: RoutingConfig,
    totals: Totals,
    generation: u64,
}

/// A planning session over a stop catalog and an optional remote provider.
///
/// Mutators are synchronous and cheap; only [`TripSession::recompute`]
/// suspends, and only for the remote matrix call. Readers always observe
/// either the previous totals or the fully computed new value.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::{MemoryCatalog, RoutingConfig, Stop, TripSession};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let catalog = MemoryCatalog::from_stops([
///     Stop::new("a", "A", Coord { x: 0.0, y: 0.0 }),
///     Stop::new("b", "B", Coord { x: 0.0, y: 1.0 }),
/// ]);
/// let session = TripSession::offline(catalog, RoutingConfig::default());
/// session.toggle("a");
/// session.toggle("b");
/// session.recompute().await;
/// assert!(session.totals().total_km > 100.0);
/// # });
/// ```
pub struct TripSession<C, P> {
    catalog: C,
    remote: Option<P>,
    estimator: LocalEstimator,
    state: Mutex<State>,
}

impl<C: StopCatalog> TripSession<C, LocalEstimator> {
    /// Create a session with no remote provider.
    ///
    /// The `Remote` engine then behaves like `Local`; nothing ever
    /// suspends for the network.
    pub fn offline(catalog: C, config: RoutingConfig) -> Self {
        Self {
            catalog,
            remote: None,
            estimator: LocalEstimator::default(),
            state: Mutex::new(State {
                itinerary: Itinerary::new(),
                config,
                totals: Totals::default(),
                generation: 0,
            }),
        }
    }
}

impl<C, P> TripSession<C, P>
where
    C: StopCatalog,
    P: LegMetricsProvider,
{
    /// Create a session that prefers `remote` when the engine asks for it.
    pub fn with_remote(catalog: C, remote: P, config: RoutingConfig) -> Self {
        Self {
            catalog,
            remote: Some(remote),
            estimator: LocalEstimator::default(),
            state: Mutex::new(State {
                itinerary: Itinerary::new(),
                config,
                totals: Totals::default(),
                generation: 0,
            }),
        }
    }

    /// Replace the default local estimator, e.g. to change the per-leg
    /// overhead.
    #[must_use]
    pub fn with_estimator(mut self, estimator: LocalEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock leaves the state consistent
        // (mutators never unwind mid-update), so poisoning is recoverable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Toggle a stop's membership; see [`Itinerary::toggle`].
    ///
    /// Returns `true` if the stop is selected afterwards.
    pub fn toggle(&self, id: &str) -> bool {
        let mut state = self.lock();
        let selected = state.itinerary.toggle(id);
        state.generation += 1;
        selected
    }

    /// Remove a stop; see [`Itinerary::remove`].
    pub fn remove(&self, id: &str) -> bool {
        let mut state = self.lock();
        let removed = state.itinerary.remove(id);
        state.generation += 1;
        removed
    }

    /// Swap a stop with a neighbour; see [`Itinerary::move_stop`].
    pub fn move_stop(&self, index: usize, delta: isize) -> bool {
        let mut state = self.lock();
        let moved = state.itinerary.move_stop(index, delta);
        state.generation += 1;
        moved
    }

    /// Empty the itinerary.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.itinerary.clear();
        state.generation += 1;
    }

    /// Replace the routing configuration.
    pub fn set_config(&self, config: RoutingConfig) {
        let mut state = self.lock();
        state.config = config;
        state.generation += 1;
    }

    /// Current routing configuration.
    pub fn config(&self) -> RoutingConfig {
        self.lock().config
    }

    /// Snapshot of the visiting order.
    pub fn order(&self) -> Vec<StopId> {
        self.lock().itinerary.order().to_vec()
    }

    /// Snapshot of the current totals.
    ///
    /// Totals lag mutations until the next [`TripSession::recompute`].
    pub fn totals(&self) -> Totals {
        self.lock().totals.clone()
    }

    /// Reorder the itinerary with nearest-neighbour + 2-opt.
    ///
    /// A no-op returning `false` for fewer than three stops, or when any
    /// stop id fails to resolve against the catalog (dropping ids would
    /// break the selection/order invariant). The optimizer always measures
    /// haversine distance; the configured engine only affects totals.
    /// Callers should follow up with [`TripSession::recompute`].
    pub fn optimize(&self) -> bool {
        let mut state = self.lock();
        let order = state.itinerary.order().to_vec();
        if order.len() < 3 {
            return false;
        }
        let stops = self.resolve(&order);
        if stops.len() != order.len() {
            log::warn!("skipping optimisation: itinerary has stops missing from the catalog");
            return false;
        }
        let optimized = optimize_order(&stops);
        let changed = optimized != order;
        state.itinerary.replace_order(optimized);
        state.generation += 1;
        changed
    }

    /// Rebuild totals from the latest itinerary and configuration.
    ///
    /// Idempotent: recomputing twice with no interleaved mutation commits
    /// the same value. If a mutation lands while the remote call is in
    /// flight, the stale result is discarded and the caller is expected to
    /// trigger a fresh recompute for the newer state.
    pub async fn recompute(&self) {
        let (order, config, generation) = {
            let state = self.lock();
            (
                state.itinerary.order().to_vec(),
                state.config,
                state.generation,
            )
        };

        let totals = self.compute_totals(&order, config).await;

        let mut state = self.lock();
        if state.generation == generation {
            state.totals = totals;
        } else {
            log::debug!(
                "discarding superseded totals (computed at generation {generation}, now at {})",
                state.generation
            );
        }
    }

    async fn compute_totals(&self, order: &[StopId], config: RoutingConfig) -> Totals {
        let stops = self.resolve(order);
        if stops.len() < 2 {
            return Totals::default();
        }
        let legs = self.compute_legs(&stops, config).await;
        let days = split_days(&stops, config.mode, &self.estimator, config.daily_budget_hours);
        Totals::from_legs(&legs, days)
    }

    /// Apply the engine selection policy: remote first when configured and
    /// available, local estimate otherwise. Remote failure of any kind
    /// degrades to the local estimate for *all* legs; remote and local legs
    /// are never mixed within one computation.
    async fn compute_legs(&self, stops: &[Stop], config: RoutingConfig) -> Vec<LegMetric> {
        if config.engine == Engine::Remote {
            if let Some(remote) = &self.remote {
                match remote.compute_legs(stops, config.mode).await {
                    Ok(legs) if legs.len() + 1 == stops.len() => return legs,
                    Ok(legs) => log::warn!(
                        "remote provider returned {} legs for {} stops; using local estimate",
                        legs.len(),
                        stops.len()
                    ),
                    Err(err) => {
                        log::warn!("remote leg metrics failed, using local estimate: {err}");
                    }
                }
            }
        }
        self.estimator.legs(stops, config.mode)
    }

    fn resolve(&self, order: &[StopId]) -> Vec<Stop> {
        order
            .iter()
            .filter_map(|id| {
                let stop = self.catalog.get(id);
                if stop.is_none() {
                    log::warn!("stop '{id}' is not in the catalog; skipping");
                }
                stop
            })
            .collect()
    }
}
