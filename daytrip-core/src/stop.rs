//! Stops and read-only catalog access.
//!
//! The planner never copies catalog data into its own state; the itinerary
//! holds [`StopId`] references and resolves them through a [`StopCatalog`]
//! when metrics are computed.

use std::collections::HashMap;

use geo::Coord;

/// Identifier of a stop in the catalog.
pub type StopId = String;

/// A catalogued point of interest.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`, in
/// degrees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::Stop;
///
/// let stop = Stop::new("neuschwanstein", "Neuschwanstein", Coord { x: 10.75, y: 47.5575 });
/// assert_eq!(stop.id, "neuschwanstein");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Unique catalog identifier.
    pub id: StopId,
    /// Display name.
    pub name: String,
    /// Geospatial position (`x = lon`, `y = lat`).
    pub location: Coord<f64>,
}

impl Stop {
    /// Construct a stop.
    pub fn new(id: impl Into<StopId>, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
        }
    }
}

/// Read-only id-to-stop lookup.
///
/// Implementations must treat the catalog as immutable for the lifetime of a
/// planning session; the core never writes through this trait.
pub trait StopCatalog {
    /// Return the stop with the given id, if the catalog contains it.
    fn get(&self, id: &str) -> Option<Stop>;
}

/// In-memory [`StopCatalog`] backed by a hash map.
///
/// Suitable for catalogs loaded wholesale from a file, and for tests.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::{MemoryCatalog, Stop, StopCatalog};
///
/// let catalog = MemoryCatalog::from_stops([Stop::new("a", "A", Coord { x: 0.0, y: 0.0 })]);
/// assert!(catalog.get("a").is_some());
/// assert!(catalog.get("b").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    stops: HashMap<StopId, Stop>,
}

impl MemoryCatalog {
    /// Build a catalog from a collection of stops.
    ///
    /// Later duplicates of an id replace earlier ones.
    pub fn from_stops<I>(stops: I) -> Self
    where
        I: IntoIterator<Item = Stop>,
    {
        Self {
            stops: stops
                .into_iter()
                .map(|stop| (stop.id.clone(), stop))
                .collect(),
        }
    }

    /// Number of stops in the catalog.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl StopCatalog for MemoryCatalog {
    fn get(&self, id: &str) -> Option<Stop> {
        self.stops.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn lookup_returns_owned_stop() {
        let stop = Stop::new("a", "A", Coord { x: 1.0, y: 2.0 });
        let catalog = MemoryCatalog::from_stops([stop.clone()]);
        assert_eq!(catalog.get("a"), Some(stop));
    }

    #[rstest]
    fn lookup_misses_unknown_id() {
        let catalog = MemoryCatalog::default();
        assert_eq!(catalog.get("missing"), None);
    }

    #[rstest]
    fn later_duplicate_wins() {
        let catalog = MemoryCatalog::from_stops([
            Stop::new("a", "First", Coord { x: 0.0, y: 0.0 }),
            Stop::new("a", "Second", Coord { x: 1.0, y: 1.0 }),
        ]);
        assert_eq!(catalog.len(), 1);
        let stop = catalog.get("a").expect("id should resolve");
        assert_eq!(stop.name, "Second");
    }
}
