//! Route statistics.
//!
//! Pure queries over a finished tour: distance, travel time, population
//! covered, and stop count.

mod evaluator;

pub use evaluator::{
    population_covered, stop_count, tour_distance, travel_time, RouteEvaluator, RouteStatistics,
};
