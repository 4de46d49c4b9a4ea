//! OSRM Table API response types.
//!
//! The Table service computes the fastest route between all pairs of the
//! supplied coordinates and, with `annotations=distance,duration`, returns
//! both a distance matrix (metres) and a duration matrix (seconds).
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#table-service>

use serde::Deserialize;

/// OSRM Table API response.
///
/// On success the response carries both matrices; on failure `code` holds a
/// service-specific error identifier and `message` the detail.
#[derive(Debug, Deserialize)]
pub struct TableResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoTable"` - Table computation failed
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Matrix of durations in seconds.
    ///
    /// `durations[i][j]` is the travel time from the i-th to the j-th
    /// coordinate. Cells are `None` when no route exists between a pair.
    pub durations: Option<Vec<Vec<Option<f64>>>>,

    /// Matrix of distances in metres, indexed like `durations`.
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}

impl TableResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}
