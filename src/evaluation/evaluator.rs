//! Route evaluator that derives statistics from a tour.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// Summary of a closed tour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteStatistics {
    /// Closed-tour distance.
    pub total_distance: f64,
    /// `total_distance / speed`, in hours.
    pub travel_time: f64,
    /// Sum of the populations of the visited stops.
    pub population_covered: u64,
    /// Visited stops, excluding the start.
    pub stop_count: usize,
}

impl RouteStatistics {
    /// Statistics of `tour` travelled at `speed`.
    pub fn compute(
        tour: &Tour,
        distances: &DistanceMatrix,
        populations: &[u64],
        speed: f64,
    ) -> Self {
        RouteEvaluator::new(distances, populations, speed).statistics(tour)
    }
}

/// Closed-tour distance.
pub fn tour_distance(tour: &Tour, distances: &DistanceMatrix) -> f64 {
    tour.distance(distances)
}

/// Population summed over the interior of the tour.
///
/// The start and its closing repetition are not counted. Keys past the end
/// of `populations` count as 0. The sum saturates at `u64::MAX`.
pub fn population_covered(tour: &Tour, populations: &[u64]) -> u64 {
    tour.interior()
        .iter()
        .map(|&key| populations.get(key).copied().unwrap_or(0))
        .fold(0u64, |acc, p| acc.saturating_add(p))
}

/// Hours needed to cover `distance` at `speed`.
pub fn travel_time(distance: f64, speed: f64) -> f64 {
    distance / speed
}

/// Number of stops, excluding both occurrences of the start.
pub fn stop_count(tour: &Tour) -> usize {
    tour.stop_count()
}

/// Computes [`RouteStatistics`] for tours over one location set.
///
/// # Examples
///
/// ```
/// use geo_route::models::{Location, LocationSet, Tour, Unit};
/// use geo_route::distance::DistanceMatrix;
/// use geo_route::evaluation::RouteEvaluator;
///
/// let set = LocationSet::with_start(
///     vec![
///         Location::new("East", 1200, 0.0, 1.0),
///         Location::new("North", 3400, 1.0, 0.0),
///     ],
///     0.0,
///     0.0,
/// );
/// let dm = DistanceMatrix::from_locations(set.locations(), Unit::Miles);
/// let populations = set.populations();
///
/// let evaluator = RouteEvaluator::new(&dm, &populations, 50.0);
/// let stats = evaluator.statistics(&Tour::from_keys(vec![2, 0, 1, 2]).unwrap());
/// assert_eq!(stats.stop_count, 2);
/// assert_eq!(stats.population_covered, 4600);
/// assert!((stats.travel_time - stats.total_distance / 50.0).abs() < 1e-12);
/// ```
pub struct RouteEvaluator<'a> {
    distances: &'a DistanceMatrix,
    populations: &'a [u64],
    speed: f64,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem data.
    pub fn new(distances: &'a DistanceMatrix, populations: &'a [u64], speed: f64) -> Self {
        Self {
            distances,
            populations,
            speed,
        }
    }

    pub fn statistics(&self, tour: &Tour) -> RouteStatistics {
        let total_distance = tour_distance(tour, self.distances);
        RouteStatistics {
            total_distance,
            travel_time: travel_time(total_distance, self.speed),
            population_covered: population_covered(tour, self.populations),
            stop_count: stop_count(tour),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (DistanceMatrix, Vec<u64>) {
        let dm = DistanceMatrix::from_data(
            4,
            vec![
                0.0, 3.0, 4.0, 5.0, //
                3.0, 0.0, 5.0, 4.0, //
                4.0, 5.0, 0.0, 3.0, //
                5.0, 4.0, 3.0, 0.0,
            ],
        )
        .expect("valid");
        (dm, vec![0, 100, 250, 40])
    }

    #[test]
    fn test_statistics() {
        let (dm, pops) = setup();
        let tour = Tour::from_keys(vec![0, 1, 3, 2, 0]).expect("valid");
        let stats = RouteEvaluator::new(&dm, &pops, 2.0).statistics(&tour);
        assert_eq!(stats.total_distance, 14.0);
        assert_eq!(stats.travel_time, 7.0);
        assert_eq!(stats.population_covered, 390);
        assert_eq!(stats.stop_count, 3);
    }

    #[test]
    fn test_population_excludes_start() {
        let pops = vec![999, 10, 20];
        let tour = Tour::from_keys(vec![0, 1, 2, 0]).expect("valid");
        assert_eq!(population_covered(&tour, &pops), 30);
    }

    #[test]
    fn test_population_missing_keys_count_zero() {
        let tour = Tour::from_keys(vec![0, 1, 5, 0]).expect("valid");
        assert_eq!(population_covered(&tour, &[0, 7]), 7);
    }

    #[test]
    fn test_population_saturates() {
        let big = u64::MAX / 2 + 1;
        let tour = Tour::from_keys(vec![0, 1, 2, 0]).expect("valid");
        assert_eq!(population_covered(&tour, &[0, big, big]), u64::MAX);
    }

    #[test]
    fn test_degenerate_tour() {
        let (dm, pops) = setup();
        let stats = RouteEvaluator::new(&dm, &pops, 10.0).statistics(&Tour::closed(0));
        assert_eq!(stats.total_distance, 0.0);
        assert_eq!(stats.travel_time, 0.0);
        assert_eq!(stats.population_covered, 0);
        assert_eq!(stats.stop_count, 0);
    }

    #[test]
    fn test_compute_matches_evaluator() {
        let (dm, pops) = setup();
        let tour = Tour::from_keys(vec![0, 2, 3, 0]).expect("valid");
        let stats = RouteStatistics::compute(&tour, &dm, &pops, 4.0);
        assert_eq!(stats, RouteEvaluator::new(&dm, &pops, 4.0).statistics(&tour));
        assert_eq!(stats.total_distance, 12.0);
        assert_eq!(stats.population_covered, 290);
    }

    #[test]
    fn test_travel_time() {
        assert_eq!(travel_time(120.0, 40.0), 3.0);
    }
}
