//! The itinerary selection/order model.
//!
//! Invariant: `order` is a permutation of `selection`: every selected stop
//! appears in the order exactly once, and nothing else does. All mutation
//! goes through the methods here, which preserve that invariant.

use std::collections::HashSet;

use crate::stop::StopId;

/// Selected stops and the sequence they are visited in.
///
/// # Examples
/// ```
/// use daytrip_core::Itinerary;
///
/// let mut itinerary = Itinerary::new();
/// itinerary.toggle("a");
/// itinerary.toggle("b");
/// assert_eq!(itinerary.order(), ["a", "b"]);
/// itinerary.toggle("a");
/// assert_eq!(itinerary.order(), ["b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Itinerary {
    selection: HashSet<StopId>,
    order: Vec<StopId>,
}

impl Itinerary {
    /// Create an empty itinerary.
    pub fn new() -> Self {
        Self::default()
    }

    /// The visiting order.
    pub fn order(&self) -> &[StopId] {
        &self.order
    }

    /// Whether a stop is currently selected.
    pub fn contains(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Number of selected stops.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no stops are selected.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Add the stop to the end of the order, or remove it if present.
    ///
    /// Returns `true` if the stop is selected after the call. Toggling the
    /// same id twice restores the original state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selection.contains(id) {
            self.remove(id);
            false
        } else {
            self.selection.insert(id.to_owned());
            self.order.push(id.to_owned());
            true
        }
    }

    /// Remove a stop from both structures; no-op if absent.
    ///
    /// Returns `true` if the stop was present.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.selection.remove(id) {
            self.order.retain(|existing| existing != id);
            true
        } else {
            false
        }
    }

    /// Swap `order[index]` with `order[index + delta]`.
    ///
    /// A silent no-op when either index is out of bounds; never an error.
    /// Returns `true` if the order changed.
    pub fn move_stop(&mut self, index: usize, delta: isize) -> bool {
        let Some(target) = index.checked_add_signed(delta) else {
            return false;
        };
        if index >= self.order.len() || target >= self.order.len() || index == target {
            return false;
        }
        self.order.swap(index, target);
        true
    }

    /// Remove every stop.
    pub fn clear(&mut self) {
        self.selection.clear();
        self.order.clear();
    }

    /// Replace the visiting order with a permutation of the selection.
    ///
    /// Callers must pass a reordering of the current order; the optimizer
    /// guarantees this by construction.
    pub(crate) fn replace_order(&mut self, order: Vec<StopId>) {
        debug_assert_eq!(order.len(), self.order.len());
        debug_assert!(order.iter().all(|id| self.selection.contains(id)));
        self.order = order;
    }
}
