//! Route orchestration.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::constructive::nearest_neighbor;
use crate::distance::{haversine_distance, DistanceMatrix};
use crate::error::Result;
use crate::evaluation::{RouteEvaluator, RouteStatistics};
use crate::local_search::{reduce_to_budget, two_opt, Substitution};
use crate::models::{Location, LocationSet, RouteConfig, Tour, Unit};

/// Whether the final tour fits in the travel budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BudgetStatus {
    Met,
    /// No further substitution could shorten the tour.
    Exceeded {
        /// `time × speed`.
        allowed: f64,
        /// Distance over the budget.
        overshoot: f64,
    },
}

/// A computed round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRoute {
    pub tour: Tour,
    pub statistics: RouteStatistics,
    pub budget: BudgetStatus,
    /// Swaps made to bring the tour towards the budget.
    pub substitutions: Vec<Substitution>,
}

impl PlannedRoute {
    pub fn budget_met(&self) -> bool {
        matches!(self.budget, BudgetStatus::Met)
    }

    /// Location records in visiting order, start included at both ends.
    pub fn locations<'a>(&self, set: &'a LocationSet) -> Vec<&'a Location> {
        self.tour
            .keys()
            .iter()
            .filter_map(|&key| set.get(key))
            .collect()
    }

    /// Like [`PlannedRoute::locations`], paired with each location's
    /// great-circle distance from the start.
    pub fn itinerary<'a>(&self, set: &'a LocationSet, unit: Unit) -> Vec<(&'a Location, f64)> {
        let Some(start) = set.get(set.start()) else {
            return Vec::new();
        };
        self.locations(set)
            .into_iter()
            .map(|location| {
                let from_start =
                    haversine_distance(start.coordinates(), location.coordinates(), unit);
                (location, from_start)
            })
            .collect()
    }
}

/// Result of [`compute_route`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RouteOutcome {
    Planned(PlannedRoute),
    /// The set holds nothing but the start.
    NoRoutePossible,
}

impl RouteOutcome {
    pub fn planned(&self) -> Option<&PlannedRoute> {
        match self {
            RouteOutcome::Planned(route) => Some(route),
            RouteOutcome::NoRoutePossible => None,
        }
    }

    pub fn into_planned(self) -> Option<PlannedRoute> {
        match self {
            RouteOutcome::Planned(route) => Some(route),
            RouteOutcome::NoRoutePossible => None,
        }
    }
}

/// Keys of the `max_visits` most populated non-start locations plus the
/// start, in ascending key order.
///
/// Equal populations keep their order in the set.
///
/// # Examples
///
/// ```
/// use geo_route::models::{Location, LocationSet};
/// use geo_route::planner::select_candidates;
///
/// let set = LocationSet::with_start(
///     vec![
///         Location::new("Small", 10, 0.0, 1.0),
///         Location::new("Big", 900, 0.0, 2.0),
///         Location::new("Medium", 50, 0.0, 3.0),
///     ],
///     0.0,
///     0.0,
/// );
/// assert_eq!(select_candidates(&set, 2), vec![1, 2, 3]);
/// ```
pub fn select_candidates(set: &LocationSet, max_visits: usize) -> Vec<usize> {
    let mut ranked = set.non_start_keys();
    ranked.sort_by_key(|&key| std::cmp::Reverse(set.locations()[key].population()));
    ranked.truncate(max_visits);
    ranked.push(set.start());
    ranked.sort_unstable();
    ranked
}

/// Plans the most populated round trip that fits in `time × speed`.
///
/// Runs, in order: full distance matrix, top-`max_visits` selection by
/// population, nearest-neighbor construction, 2-opt, budget substitution
/// against every location in the set, and a final 2-opt pass.
///
/// # Errors
///
/// [`crate::Error::InvalidInput`] if the configuration or the location set
/// is malformed. A set with only the start yields
/// [`RouteOutcome::NoRoutePossible`]; a tour that cannot be brought within
/// budget is returned with [`BudgetStatus::Exceeded`].
///
/// # Examples
///
/// ```
/// use geo_route::models::{Location, LocationSet, RouteConfig};
/// use geo_route::planner::compute_route;
///
/// let set = LocationSet::with_start(
///     vec![
///         Location::new("Anaheim", 336_265, 33.8366, -117.9143),
///         Location::new("Santa Ana", 310_227, 33.7455, -117.8677),
///         Location::new("Fullerton", 143_617, 33.8704, -117.9242),
///     ],
///     33.807944,
///     -117.951391,
/// );
/// let config = RouteConfig::default().with_speed(30.0).with_time(2.0);
///
/// let outcome = compute_route(&set, &config).unwrap();
/// let route = outcome.planned().unwrap();
/// assert!(route.budget_met());
/// assert_eq!(route.statistics.stop_count, 3);
/// assert_eq!(route.tour.start(), set.start());
/// ```
#[instrument(skip_all, fields(locations = set.len(), max_visits = config.max_visits))]
pub fn compute_route(set: &LocationSet, config: &RouteConfig) -> Result<RouteOutcome> {
    config.validate()?;
    set.validate()?;

    if set.len() < 2 {
        info!("no locations besides the start");
        return Ok(RouteOutcome::NoRoutePossible);
    }

    let allowed = config.allowed_distance();
    let distances = DistanceMatrix::from_locations(set.locations(), config.unit);
    let populations = set.populations();

    let candidates = select_candidates(set, config.max_visits);
    debug!(candidates = candidates.len(), allowed, "selected candidates");

    let tour = nearest_neighbor(&distances, &candidates, set.start())?;
    debug!(distance = tour.distance(&distances), "nearest neighbor tour");

    let tour = two_opt(tour, &distances, &config.two_opt);
    let reduction = reduce_to_budget(
        tour,
        &distances,
        &populations,
        allowed,
        config.max_substitutions,
    );
    let tour = two_opt(reduction.tour, &distances, &config.two_opt);

    let statistics = RouteEvaluator::new(&distances, &populations, config.speed).statistics(&tour);
    let budget = if statistics.total_distance <= allowed {
        BudgetStatus::Met
    } else {
        BudgetStatus::Exceeded {
            allowed,
            overshoot: statistics.total_distance - allowed,
        }
    };

    info!(
        distance = statistics.total_distance,
        stops = statistics.stop_count,
        population = statistics.population_covered,
        substitutions = reduction.substitutions.len(),
        budget_met = matches!(budget, BudgetStatus::Met),
        "route computed"
    );

    Ok(RouteOutcome::Planned(PlannedRoute {
        tour,
        statistics,
        budget,
        substitutions: reduction.substitutions,
    }))
}
