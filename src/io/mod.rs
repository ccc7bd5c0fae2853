//! Location dataset loading.
//!
//! Reads tab-separated city tables and keeps the rows that are populated
//! enough and close enough to the start to fit in a round trip.

mod loader;

pub use loader::{load_locations, read_locations, LocationFilter};
