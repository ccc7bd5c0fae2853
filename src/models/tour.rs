//! Closed tour type.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};

/// A closed walk over location keys.
///
/// The first and last keys are the start; every key in between appears at
/// most once. The shortest tour is the degenerate `start → start`.
///
/// # Examples
///
/// ```
/// use geo_route::models::Tour;
///
/// let tour = Tour::from_keys(vec![4, 1, 2, 4]).unwrap();
/// assert_eq!(tour.start(), 4);
/// assert_eq!(tour.stop_count(), 2);
/// assert_eq!(tour.interior(), &[1, 2]);
///
/// assert!(Tour::from_keys(vec![4, 1, 1, 4]).is_err());
/// assert_eq!(Tour::closed(4).keys(), &[4, 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Tour {
    keys: Vec<usize>,
}

impl Tour {
    /// The degenerate tour that leaves `start` and returns immediately.
    pub fn closed(start: usize) -> Self {
        Self {
            keys: vec![start, start],
        }
    }

    /// Validates and wraps a closed key sequence.
    pub fn from_keys(keys: Vec<usize>) -> Result<Self> {
        let tour = Self { keys };
        if tour.keys.len() < 2 {
            return Err(Error::invalid_input(format!(
                "tour needs at least 2 keys, got {}",
                tour.keys.len()
            )));
        }
        if !tour.is_closed() {
            return Err(Error::invalid_input("tour must start and end at the same key"));
        }
        if !tour.has_unique_stops() {
            return Err(Error::invalid_input("tour visits a location more than once"));
        }
        Ok(tour)
    }

    /// Wraps keys produced by an operator that preserves the invariants.
    pub(crate) fn from_keys_unchecked(keys: Vec<usize>) -> Self {
        debug_assert!(keys.len() >= 2 && keys.first() == keys.last());
        Self { keys }
    }

    pub fn keys(&self) -> &[usize] {
        &self.keys
    }

    pub fn into_keys(self) -> Vec<usize> {
        self.keys
    }

    pub(crate) fn keys_mut(&mut self) -> &mut [usize] {
        &mut self.keys
    }

    /// Key of the start (and end) of the tour.
    pub fn start(&self) -> usize {
        self.keys[0]
    }

    /// Number of keys including both occurrences of the start.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Never true: a tour holds at least the start twice.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of visited locations, excluding the start.
    pub fn stop_count(&self) -> usize {
        self.keys.len().saturating_sub(2)
    }

    /// Keys strictly between the two occurrences of the start.
    pub fn interior(&self) -> &[usize] {
        let n = self.keys.len();
        if n <= 2 {
            return &[];
        }
        &self.keys[1..n - 1]
    }

    pub fn contains(&self, key: usize) -> bool {
        self.keys.contains(&key)
    }

    /// Total closed-tour distance.
    pub fn distance(&self, distances: &DistanceMatrix) -> f64 {
        distances.path_distance(&self.keys, true)
    }

    /// `true` if the first and last keys are equal.
    pub fn is_closed(&self) -> bool {
        self.keys.first() == self.keys.last()
    }

    /// `true` if no key repeats, apart from the closing start.
    pub fn has_unique_stops(&self) -> bool {
        let n = self.keys.len();
        let mut seen = HashSet::with_capacity(n);
        self.keys[..n.saturating_sub(1)]
            .iter()
            .all(|key| seen.insert(*key))
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = Error;

    fn try_from(keys: Vec<usize>) -> Result<Self> {
        Self::from_keys(keys)
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.keys
    }
}
