//! Route optimisation: nearest-neighbour construction with 2-opt refinement.
//!
//! Both phases use the haversine metric only, never a remote provider, so
//! optimisation is synchronous and deterministic. Nearest-neighbour is
//! O(n²) and each 2-opt pass is O(n³) in the worst case with no bound on
//! pass count; that is fine for itineraries of a few dozen stops, which is
//! the intended scale.

use geo::Coord;

use crate::geodesy::haversine_km;
use crate::stop::{Stop, StopId};

/// Greedy construction: keep the first stop fixed, then repeatedly append
/// the closest not-yet-placed stop.
///
/// Ties go to the earliest candidate in scan order. Inputs with fewer than
/// three stops are returned unchanged.
pub fn nearest_neighbour_order(stops: &[Stop]) -> Vec<StopId> {
    let ids: Vec<StopId> = stops.iter().map(|stop| stop.id.clone()).collect();
    if stops.len() < 3 {
        return ids;
    }
    let coords: Vec<Coord<f64>> = stops.iter().map(|stop| stop.location).collect();
    let order = nearest_neighbour(&coords);
    order.iter().map(|&i| ids[i].clone()).collect()
}

/// Full optimisation: nearest-neighbour construction followed by 2-opt
/// local search.
///
/// Returns a permutation of the input ids with the first stop frozen in
/// place. The result is a local optimum of total haversine path length, not
/// a guaranteed global one. Inputs with fewer than three stops are returned
/// unchanged.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::{Stop, optimize_order};
///
/// // A detour: visiting the middle stop last.
/// let stops = vec![
///     Stop::new("a", "A", Coord { x: 0.0, y: 0.0 }),
///     Stop::new("c", "C", Coord { x: 0.0, y: 2.0 }),
///     Stop::new("b", "B", Coord { x: 0.0, y: 1.0 }),
/// ];
/// assert_eq!(optimize_order(&stops), ["a", "b", "c"]);
/// ```
pub fn optimize_order(stops: &[Stop]) -> Vec<StopId> {
    let ids: Vec<StopId> = stops.iter().map(|stop| stop.id.clone()).collect();
    if stops.len() < 3 {
        return ids;
    }
    let coords: Vec<Coord<f64>> = stops.iter().map(|stop| stop.location).collect();
    let constructed = nearest_neighbour(&coords);
    let refined = two_opt(&coords, constructed);
    refined.iter().map(|&i| ids[i].clone()).collect()
}

fn nearest_neighbour(coords: &[Coord<f64>]) -> Vec<usize> {
    let mut remaining: Vec<usize> = (1..coords.len()).collect();
    let mut order = Vec::with_capacity(coords.len());
    let mut last = 0;
    order.push(last);
    while !remaining.is_empty() {
        let mut nearest = 0;
        let mut best = f64::INFINITY;
        for (position, &candidate) in remaining.iter().enumerate() {
            let distance = haversine_km(coords[last], coords[candidate]);
            // Strict comparison keeps the earliest candidate on ties.
            if distance < best {
                best = distance;
                nearest = position;
            }
        }
        last = remaining.remove(nearest);
        order.push(last);
    }
    order
}

/// First-improvement 2-opt over an owned index buffer.
///
/// Scans pairs `(i, j)` with `1 <= i < j < n` (index 0 is frozen) and
/// reverses the range `[i, j)`. The first strictly improving move is applied
/// and the scan restarts; a full pass without improvement terminates.
fn two_opt(coords: &[Coord<f64>], order: Vec<usize>) -> Vec<usize> {
    let n = order.len();
    let mut best = order;
    let mut best_length = tour_length(coords, &best);
    'scan: loop {
        for i in 1..n {
            for j in (i + 1)..n {
                let mut candidate = best.clone();
                candidate[i..j].reverse();
                let length = tour_length(coords, &candidate);
                if length < best_length {
                    best = candidate;
                    best_length = length;
                    continue 'scan;
                }
            }
        }
        break;
    }
    best
}

fn tour_length(coords: &[Coord<f64>], order: &[usize]) -> f64 {
    order
        .windows(2)
        .map(|pair| haversine_km(coords[pair[0]], coords[pair[1]]))
        .sum()
}
