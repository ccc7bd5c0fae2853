//! Crate-wide error type.

use thiserror::Error as ThisError;

/// Errors raised before or outside the route pipeline.
///
/// Over-budget routes and inputs too small to form a tour are not errors;
/// see [`crate::planner::RouteOutcome`] and [`crate::planner::BudgetStatus`].
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }
}
