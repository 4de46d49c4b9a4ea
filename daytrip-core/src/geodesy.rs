//! Great-circle distance on a spherical Earth.

use geo::Coord;

/// Mean Earth radius in kilometres.
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two WGS84 coordinates, in kilometres.
///
/// Coordinates use `x = longitude`, `y = latitude`, in degrees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::haversine_km;
///
/// let equator = Coord { x: 0.0, y: 0.0 };
/// let one_degree_north = Coord { x: 0.0, y: 1.0 };
/// let km = haversine_km(equator, one_degree_north);
/// assert!((km - 111.19).abs() < 0.1);
/// ```
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1.0 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    MEAN_EARTH_RADIUS_KM * c
}

/// Total haversine length of a path visiting `coords` in order.
///
/// Returns zero for fewer than two coordinates.
pub fn path_length_km(coords: &[Coord<f64>]) -> f64 {
    coords
        .windows(2)
        .map(|pair| haversine_km(pair[0], pair[1]))
        .sum()
}
