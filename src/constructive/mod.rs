//! Constructive heuristics for building an initial closed tour.
//!
//! - [`nearest_neighbor`] — Greedy nearest-neighbor walk, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::nearest_neighbor;
