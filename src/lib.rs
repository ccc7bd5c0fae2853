//! # geo-route
//!
//! Plans a population-weighted round trip: picks the most populated
//! locations reachable within a travel budget and orders them into a short
//! closed tour that starts and ends at a fixed starting point.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Location, LocationSet, Tour, RouteConfig, Unit)
//! - [`distance`] — Haversine distance and the pairwise distance matrix
//! - [`constructive`] — Initial tour construction (Nearest Neighbor)
//! - [`local_search`] — 2-opt improvement and budget-constrained substitution
//! - [`evaluation`] — Route statistics (distance, time, population, stops)
//! - [`planner`] — End-to-end route computation
//! - [`io`] — Tab-separated location dataset loading and filtering
//! - [`canvas`] — Projection of a tour onto 2-D canvas coordinates

pub mod canvas;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod local_search;
pub mod models;
pub mod planner;

pub use error::{Error, Result};
