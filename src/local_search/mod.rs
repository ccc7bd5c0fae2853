//! Local search operators for improving a closed tour.
//!
//! - [`two_opt`] — Segment reversal until no shorter tour is found
//! - [`reduce_to_budget`] — Population-aware stop substitution under a
//!   distance budget

mod substitution;
mod two_opt;

pub use substitution::{best_substitution, reduce_to_budget, Reduction, Substitution};
pub use two_opt::two_opt;
