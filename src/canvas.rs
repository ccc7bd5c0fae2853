//! Projection of tours onto a flat drawing surface.
//!
//! A linear lat/lon transform tuned for a 500×500 canvas over Southern
//! California; adjust the offsets and scale for other regions.

use serde::{Deserialize, Serialize};

use crate::models::{LocationSet, Tour};

/// Linear lat/lon to canvas transform.
///
/// `x = (lon + lon_offset) × scale`, `y = height − (lat + lat_offset) × scale`.
///
/// # Examples
///
/// ```
/// use geo_route::canvas::CanvasProjection;
///
/// let projection = CanvasProjection::default();
/// let (x, y) = projection.project(33.6, -118.3);
/// assert!(x.abs() < 1e-9);
/// assert!((y - 500.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasProjection {
    pub scale: f64,
    pub lat_offset: f64,
    pub lon_offset: f64,
    /// Canvas height; y grows downwards from the top edge.
    pub height: f64,
}

impl Default for CanvasProjection {
    fn default() -> Self {
        Self {
            scale: 800.0,
            lat_offset: -33.6,
            lon_offset: 118.3,
            height: 500.0,
        }
    }
}

/// A straight line between two projected points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

impl CanvasProjection {
    /// Canvas `(x, y)` of a coordinate.
    pub fn project(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        let x = (longitude + self.lon_offset) * self.scale;
        let y = self.height - (latitude + self.lat_offset) * self.scale;
        (x, y)
    }

    /// One segment per consecutive pair of tour keys, closing leg included.
    ///
    /// Keys missing from `set` are skipped.
    pub fn segments(&self, tour: &Tour, set: &LocationSet) -> Vec<Segment> {
        let points: Vec<(f64, f64)> = tour
            .keys()
            .iter()
            .filter_map(|&key| set.get(key))
            .map(|location| self.project(location.latitude(), location.longitude()))
            .collect();
        points
            .windows(2)
            .map(|w| Segment {
                from: w[0],
                to: w[1],
            })
            .collect()
    }
}
