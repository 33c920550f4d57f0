//! Geographic primitives: coordinates, great-circle distance, display formatting.

/// Mean Earth radius in meters, per the IUGG sphere approximation.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in meters from `self` to `other`.
    pub fn distance_to(self, other: Self) -> f64 {
        haversine_distance(self, other)
    }
}

/// Haversine great-circle distance in meters between two coordinates.
pub fn haversine_distance(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Floating-point roundoff can push `a` a hair outside [0, 1] for
    // near-antipodal points, which would NaN the asin.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Formats a distance in meters for display: integer meters below one
/// kilometer, kilometers to one decimal place above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// Formats the distance between two optional coordinates, returning the
/// empty string when either endpoint is unknown.
pub fn formatted_distance(from: Option<Coordinate>, to: Option<Coordinate>) -> String {
    match (from, to) {
        (Some(from), Some(to)) => format_distance(haversine_distance(from, to)),
        _ => String::new(),
    }
}
