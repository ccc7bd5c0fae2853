//! Dense distance matrix.

use crate::distance::haversine_distance;
use crate::models::{Location, Unit};

/// A dense n×n distance matrix stored in row-major order, indexed by
/// location key.
///
/// # Examples
///
/// ```
/// use geo_route::models::{Location, Unit};
/// use geo_route::distance::DistanceMatrix;
///
/// let locations = vec![
///     Location::start(0.0, 0.0),
///     Location::new("East", 10, 0.0, 1.0),
///     Location::new("North", 20, 1.0, 0.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations, Unit::Miles);
/// assert!((dm.get(0, 1) - 69.098).abs() < 1e-9);
/// assert_eq!(dm.get(1, 1), 0.0);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes the great-circle distance for every ordered pair of
    /// locations, diagonal included.
    ///
    /// Both directions of each pair are evaluated independently.
    pub fn from_locations(locations: &[Location], unit: Unit) -> Self {
        let n = locations.len();
        let mut dm = Self::new(n);
        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                dm.set(i, j, haversine_distance(from.coordinates(), to.coordinates(), unit));
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the candidate closest to `from`.
    ///
    /// Ties go to the candidate listed first. Zero is a valid distance;
    /// non-finite entries count as missing edges and are never chosen.
    /// Returns `None` if no candidate has a finite distance.
    pub fn nearest(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.get(from, c);
            if !d.is_finite() {
                continue;
            }
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((c, d));
            }
        }
        best.map(|(c, _)| c)
    }

    /// Sums the edges between consecutive keys.
    ///
    /// With `close_loop`, a path whose first and last keys differ gets the
    /// edge back to its first key added.
    ///
    /// # Examples
    ///
    /// ```
    /// use geo_route::distance::DistanceMatrix;
    ///
    /// let dm = DistanceMatrix::from_data(3, vec![
    ///     0.0, 1.0, 4.0,
    ///     1.0, 0.0, 2.0,
    ///     4.0, 2.0, 0.0,
    /// ]).unwrap();
    /// assert_eq!(dm.path_distance(&[0, 1, 2], false), 3.0);
    /// assert_eq!(dm.path_distance(&[0, 1, 2], true), 7.0);
    /// assert_eq!(dm.path_distance(&[0, 1, 2, 0], true), 7.0);
    /// ```
    pub fn path_distance(&self, keys: &[usize], close_loop: bool) -> f64 {
        let mut dist: f64 = keys.windows(2).map(|w| self.get(w[0], w[1])).sum();
        if close_loop {
            if let (Some(&first), Some(&last)) = (keys.first(), keys.last()) {
                if first != last {
                    dist += self.get(last, first);
                }
            }
        }
        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Location> {
        vec![
            Location::start(0.0, 0.0),
            Location::new("A", 10, 0.0, 1.0),
            Location::new("B", 20, 1.0, 1.0),
            Location::new("C", 30, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_from_locations() {
        let dm = DistanceMatrix::from_locations(&square(), Unit::Miles);
        assert_eq!(dm.size(), 4);
        assert!((dm.get(0, 1) - 69.098).abs() < 1e-9);
        assert!((dm.get(0, 2) - 97.716).abs() < 1e-9);
        assert!((dm.get(2, 3) - 69.087).abs() < 1e-9);
    }

    #[test]
    fn test_diagonal_is_zero() {
        let dm = DistanceMatrix::from_locations(&square(), Unit::Miles);
        for i in 0..dm.size() {
            assert_eq!(dm.get(i, i), 0.0);
        }
    }

    #[test]
    fn test_symmetric() {
        let dm = DistanceMatrix::from_locations(&square(), Unit::Kilometers);
        assert!(dm.is_symmetric(1e-6));
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 5.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_asymmetric_matrix() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10.0);
        dm.set(1, 0, 15.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_nearest() {
        let dm = DistanceMatrix::from_locations(&square(), Unit::Miles);
        // A and C are both 69.098 from the start; A is listed first.
        assert_eq!(dm.nearest(0, &[1, 2, 3]), Some(1));
        assert_eq!(dm.nearest(0, &[3, 2, 1]), Some(3));
        assert_eq!(dm.nearest(0, &[2]), Some(2));
        assert_eq!(dm.nearest(0, &[]), None);
    }

    #[test]
    fn test_nearest_prefers_zero_distance() {
        let dm = DistanceMatrix::from_data(3, vec![0.0, 5.0, 0.0, 5.0, 0.0, 1.0, 0.0, 1.0, 0.0])
            .expect("valid");
        assert_eq!(dm.nearest(0, &[1, 2]), Some(2));
    }

    #[test]
    fn test_nearest_skips_missing_edges() {
        let dm = DistanceMatrix::from_data(
            3,
            vec![0.0, f64::NAN, 9.0, f64::NAN, 0.0, 1.0, 9.0, 1.0, 0.0],
        )
        .expect("valid");
        assert_eq!(dm.nearest(0, &[1, 2]), Some(2));
        assert_eq!(dm.nearest(0, &[1]), None);
    }

    #[test]
    fn test_path_distance_open_and_closed() {
        let dm = DistanceMatrix::from_locations(&square(), Unit::Miles);
        let open = dm.path_distance(&[0, 1, 2, 3], false);
        let closed = dm.path_distance(&[0, 1, 2, 3], true);
        assert!((open - (69.098 + 69.098 + 69.087)).abs() < 1e-9);
        assert!((closed - open - 69.098).abs() < 1e-9);
        assert!((dm.path_distance(&[0, 1, 2, 3, 0], true) - closed).abs() < 1e-12);
    }

    #[test]
    fn test_path_distance_degenerate() {
        let dm = DistanceMatrix::from_locations(&square(), Unit::Miles);
        assert_eq!(dm.path_distance(&[], true), 0.0);
        assert_eq!(dm.path_distance(&[2], true), 0.0);
        assert_eq!(dm.path_distance(&[2, 2], true), 0.0);
    }
}
