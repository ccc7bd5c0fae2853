//! Budget-constrained stop substitution.
//!
//! # Algorithm
//!
//! While the tour is longer than the allowed distance:
//!
//! 1. For every interior position `p`, score the open sub-path
//!    `(tour[p-1], tour[p], tour[p+1])`.
//! 2. Try every location not in the tour at `p`. A substitute is eligible
//!    if it makes that sub-path strictly shorter; among the eligible ones
//!    keep the most populated (first in key order on ties).
//! 3. Across positions, pick the proposal with the highest population
//!    (earliest position on ties).
//! 4. Swap it in and subtract its saving from the running distance.
//!
//! Stops when the running distance is within budget or no position has an
//! eligible substitute. The number of stops never changes.
//!
//! # Complexity
//!
//! O(n·m) per substitution, where n = tour length and m = number of
//! locations in the matrix.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// A single accepted or proposed swap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    /// Tour position whose key is replaced.
    pub position: usize,
    /// Key that is swapped out.
    pub replaced: usize,
    /// Key that is swapped in.
    pub key: usize,
    /// Population of the incoming key.
    pub population: u64,
    /// Distance removed from the tour.
    pub saving: f64,
}

/// Result of [`reduce_to_budget`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub tour: Tour,
    /// Tour distance after the last substitution, tracked incrementally.
    pub distance: f64,
    /// Accepted substitutions, in order.
    pub substitutions: Vec<Substitution>,
    /// `true` if `distance` is within the allowed distance.
    pub budget_met: bool,
}

/// Swaps stops for shorter, better populated alternatives until the tour
/// fits in `allowed_distance`.
///
/// Every key of `distances` that is not in the tour is a candidate.
/// `populations` is indexed by key; keys past its end count as population 0.
/// `max_substitutions` bounds the number of swaps.
///
/// An over-budget result is not an error: check [`Reduction::budget_met`].
///
/// # Panics
///
/// Panics if a tour key is outside `distances`.
///
/// # Examples
///
/// ```
/// use geo_route::models::{Location, Tour, Unit};
/// use geo_route::distance::DistanceMatrix;
/// use geo_route::local_search::reduce_to_budget;
///
/// let locations = vec![
///     Location::start(0.0, 0.0),
///     Location::new("On the way", 500, 0.0, 1.0),
///     Location::new("Detour", 100, 1.5, 1.5),
///     Location::new("Shortcut", 5000, 0.0, 1.5),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations, Unit::Miles);
/// let tour = Tour::from_keys(vec![0, 1, 2, 0]).unwrap();
/// let allowed = tour.distance(&dm) - 1.0;
///
/// let reduction = reduce_to_budget(tour, &dm, &[0, 500, 100, 5000], allowed, 100);
/// assert!(reduction.budget_met);
/// assert_eq!(reduction.tour.keys(), &[0, 1, 3, 0]);
/// assert_eq!(reduction.substitutions.len(), 1);
/// ```
pub fn reduce_to_budget(
    tour: Tour,
    distances: &DistanceMatrix,
    populations: &[u64],
    allowed_distance: f64,
    max_substitutions: usize,
) -> Reduction {
    let mut tour = tour;
    let mut distance = tour.distance(distances);
    let mut in_tour = vec![false; distances.size()];
    for &key in tour.keys() {
        in_tour[key] = true;
    }

    let mut substitutions = Vec::new();

    while distance > allowed_distance {
        if substitutions.len() >= max_substitutions {
            warn!(max_substitutions, distance, allowed_distance, "substitution cap reached");
            break;
        }
        let Some(swap) = best_substitution(tour.keys(), &in_tour, distances, populations) else {
            debug!(distance, allowed_distance, "no eligible substitution left");
            break;
        };

        tour.keys_mut()[swap.position] = swap.key;
        in_tour[swap.replaced] = false;
        in_tour[swap.key] = true;
        distance -= swap.saving;

        debug!(
            position = swap.position,
            replaced = swap.replaced,
            key = swap.key,
            population = swap.population,
            saving = swap.saving,
            distance,
            "substituted stop"
        );
        substitutions.push(swap);
    }

    Reduction {
        tour,
        distance,
        substitutions,
        budget_met: distance <= allowed_distance,
    }
}

/// Finds the highest-population eligible substitution across all interior
/// positions of `keys`.
///
/// `in_tour` flags the keys already in the tour, indexed by key.
/// Returns `None` if no position has a substitute that shortens it.
///
/// # Panics
///
/// Panics if `in_tour` is shorter than `distances.size()` or a key in
/// `keys` is outside `distances`.
pub fn best_substitution(
    keys: &[usize],
    in_tour: &[bool],
    distances: &DistanceMatrix,
    populations: &[u64],
) -> Option<Substitution> {
    let mut proposal: Option<Substitution> = None;

    for position in 1..keys.len().saturating_sub(1) {
        let (prev, current, next) = (keys[position - 1], keys[position], keys[position + 1]);
        let current_distance = distances.path_distance(&[prev, current, next], false);

        let mut best_here: Option<Substitution> = None;
        for candidate in 0..distances.size() {
            if in_tour[candidate] {
                continue;
            }
            let new_distance = distances.path_distance(&[prev, candidate, next], false);
            if new_distance >= current_distance || new_distance.is_nan() {
                continue;
            }
            let population = populations.get(candidate).copied().unwrap_or(0);
            if best_here.is_none_or(|b| population > b.population) {
                best_here = Some(Substitution {
                    position,
                    replaced: current,
                    key: candidate,
                    population,
                    saving: current_distance - new_distance,
                });
            }
        }

        if let Some(swap) = best_here {
            if swap.saving > 0.0 && proposal.is_none_or(|b| swap.population > b.population) {
                proposal = Some(swap);
            }
        }
    }

    proposal
}
