//! 2-opt improvement of a closed tour.
//!
//! # Algorithm
//!
//! For every start offset `i` in `1..n` and segment length `k` in
//! `1..n-i`, reverse the segment `[i, i+k)` and re-score the closed tour.
//! A strictly shorter tour is adopted on the spot and the pass continues
//! from it (first-improvement). The search ends after a configured number
//! of consecutive passes without an adopted move, or at the pass cap.
//!
//! The first and last keys (the start) never move.
//!
//! # Complexity
//!
//! O(n²) candidate moves per pass, each scored in O(n): O(n³) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use tracing::debug;

use crate::distance::DistanceMatrix;
use crate::models::{Tour, TwoOptOptions};

/// Applies 2-opt segment reversal to a closed tour until it stabilizes.
///
/// Never returns a tour longer than the input.
///
/// # Examples
///
/// ```
/// use geo_route::models::{Location, Tour, TwoOptOptions, Unit};
/// use geo_route::distance::DistanceMatrix;
/// use geo_route::local_search::two_opt;
///
/// let locations = vec![
///     Location::start(0.0, 0.0),
///     Location::new("A", 10, 0.0, 1.0),
///     Location::new("B", 10, 1.0, 1.0),
///     Location::new("C", 10, 1.0, 0.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations, Unit::Miles);
///
/// // The diagonals cross.
/// let crossed = Tour::from_keys(vec![0, 2, 1, 3, 0]).unwrap();
/// let improved = two_opt(crossed, &dm, &TwoOptOptions::default());
/// assert_eq!(improved.keys(), &[0, 1, 2, 3, 0]);
/// ```
pub fn two_opt(tour: Tour, distances: &DistanceMatrix, options: &TwoOptOptions) -> Tour {
    let mut keys = tour.into_keys();
    let n = keys.len();
    let mut best = distances.path_distance(&keys, true);

    if n < 4 {
        return Tour::from_keys_unchecked(keys);
    }

    let initial = best;
    let mut stable_passes = 0;
    let mut passes = 0;
    let mut moves = 0;

    while stable_passes < options.stable_passes && passes < options.max_passes {
        passes += 1;
        let mut improved = false;

        for i in 1..n {
            for k in 1..n - i {
                keys[i..i + k].reverse();
                let candidate = distances.path_distance(&keys, true);
                if candidate < best {
                    best = candidate;
                    improved = true;
                    moves += 1;
                } else {
                    keys[i..i + k].reverse();
                }
            }
        }

        if improved {
            stable_passes = 0;
        } else {
            stable_passes += 1;
        }
    }

    debug!(passes, moves, initial, improved = best, "2-opt finished");
    Tour::from_keys_unchecked(keys)
}
