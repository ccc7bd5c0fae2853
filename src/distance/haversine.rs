//! Haversine great-circle distance.
//!
//! ```text
//! a = sin²(Δlat/2) + cos(lat₁)·cos(lat₂)·sin²(Δlon/2)
//! d = 2·asin(√a) · R
//! ```
//!
//! # Reference
//!
//! Sinnott, R.W. (1984). "Virtues of the Haversine", *Sky and Telescope*
//! 68(2), 159.

use crate::models::Unit;

/// Decimal digits kept in every computed distance.
pub const DISTANCE_PRECISION: i32 = 3;

/// Great-circle distance between two `(latitude, longitude)` points in
/// degrees, in the given unit, rounded to [`DISTANCE_PRECISION`] digits.
///
/// # Examples
///
/// ```
/// use geo_route::distance::haversine_distance;
/// use geo_route::models::Unit;
///
/// let vegas = (36.17, -115.14);
/// let los_angeles = (34.05, -118.24);
/// let miles = haversine_distance(vegas, los_angeles, Unit::Miles);
/// assert!((miles - 228.368).abs() < 1e-9);
/// assert_eq!(haversine_distance(vegas, vegas, Unit::Miles), 0.0);
/// ```
pub fn haversine_distance(from: (f64, f64), to: (f64, f64), unit: Unit) -> f64 {
    let lat_from = from.0.to_radians();
    let lon_from = from.1.to_radians();
    let lat_to = to.0.to_radians();
    let lon_to = to.1.to_radians();

    let lat_delta = lat_to - lat_from;
    let lon_delta = lon_to - lon_from;

    let a = (lat_delta / 2.0).sin().powi(2)
        + lat_from.cos() * lat_to.cos() * (lon_delta / 2.0).sin().powi(2);
    let angle = 2.0 * a.sqrt().min(1.0).asin();

    round_to_precision(angle * unit.earth_radius())
}

fn round_to_precision(value: f64) -> f64 {
    let factor = 10f64.powi(DISTANCE_PRECISION);
    (value * factor).round() / factor
}
