//! Domain model types for round-trip planning.
//!
//! Provides the core abstractions: populated locations and the location set
//! they belong to, closed tours over location keys, and the configuration
//! that bounds a route computation.

mod config;
mod location;
mod tour;

pub use config::{RouteConfig, TwoOptOptions, Unit};
pub use location::{Location, LocationSet, STARTING_LOCATION_NAME};
pub use tour::Tour;
