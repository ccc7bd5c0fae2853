//! Nearest-neighbor constructive heuristic.
//!
//! Builds a closed tour greedily: starting from the start key, always step to
//! the nearest candidate not yet in the tour, then return to the start.
//!
//! # Complexity
//!
//! O(n²) where n = number of candidates.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An Analysis of
//! Several Heuristics for the Traveling Salesman Problem", *SIAM Journal on
//! Computing* 6(3), 563-581.

use tracing::trace;

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::models::Tour;

/// Constructs a closed tour over `candidates` using the nearest-neighbor
/// heuristic.
///
/// Candidates are scanned in ascending key order, so distance ties go to the
/// smaller key. A zero distance (coincident coordinates) is a valid shortest
/// edge. Non-finite matrix entries are treated as missing edges; if every
/// remaining edge is missing, the smallest unvisited key is taken.
///
/// # Arguments
///
/// * `distances` — Distance matrix over all keys
/// * `candidates` — Keys to visit; must include `start`
/// * `start` — Key the tour leaves from and returns to
///
/// # Errors
///
/// [`Error::InvalidInput`] if `candidates` is empty, lacks `start`, or holds
/// a key outside the matrix.
///
/// # Examples
///
/// ```
/// use geo_route::models::{Location, Unit};
/// use geo_route::distance::DistanceMatrix;
/// use geo_route::constructive::nearest_neighbor;
///
/// let locations = vec![
///     Location::start(0.0, 0.0),
///     Location::new("Far", 10, 0.0, 3.0),
///     Location::new("Near", 10, 0.0, 1.0),
///     Location::new("Middle", 10, 0.0, 2.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations, Unit::Miles);
///
/// let tour = nearest_neighbor(&dm, &[0, 1, 2, 3], 0).unwrap();
/// assert_eq!(tour.keys(), &[0, 2, 3, 1, 0]);
/// ```
pub fn nearest_neighbor(
    distances: &DistanceMatrix,
    candidates: &[usize],
    start: usize,
) -> Result<Tour> {
    if candidates.is_empty() {
        return Err(Error::invalid_input("no candidate locations to visit"));
    }
    if let Some(&bad) = candidates.iter().find(|&&k| k >= distances.size()) {
        return Err(Error::invalid_input(format!(
            "candidate key {bad} is outside the {}-location matrix",
            distances.size()
        )));
    }

    let mut order = candidates.to_vec();
    order.sort_unstable();
    order.dedup();
    if order.binary_search(&start).is_err() {
        return Err(Error::invalid_input(format!(
            "start key {start} is not among the candidates"
        )));
    }

    let n = distances.size();
    let mut visited = vec![false; n];
    visited[start] = true;

    let mut keys = Vec::with_capacity(order.len() + 1);
    keys.push(start);
    let mut current = start;

    for _ in 1..order.len() {
        let unvisited: Vec<usize> = order.iter().copied().filter(|&k| !visited[k]).collect();
        let next = match distances.nearest(current, &unvisited) {
            Some(next) => next,
            None => unvisited[0],
        };
        trace!(
            from = current,
            to = next,
            distance = distances.get(current, next),
            "nearest neighbor step"
        );
        visited[next] = true;
        keys.push(next);
        current = next;
    }

    keys.push(start);
    Ok(Tour::from_keys_unchecked(keys))
}
