//! End-to-end route computation.
//!
//! Chains the pipeline stages over one location set:
//! distance matrix → top-N selection → nearest neighbor → 2-opt →
//! budget substitution → 2-opt.

mod route;

pub use route::{compute_route, select_candidates, BudgetStatus, PlannedRoute, RouteOutcome};
