//! Great-circle distances.
//!
//! Provides the Haversine formula and a dense pairwise distance matrix.

mod haversine;
mod matrix;

pub use haversine::{haversine_distance, DISTANCE_PRECISION};
pub use matrix::DistanceMatrix;
