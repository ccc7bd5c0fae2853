//! Route configuration and distance units.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Unit of distance. Each unit maps to an Earth radius for the Haversine
/// formula; speeds and budgets are expressed in the same unit.
///
/// # Examples
///
/// ```
/// use geo_route::models::Unit;
///
/// assert_eq!(Unit::Miles.earth_radius(), 3959.0);
/// assert_eq!(Unit::Kilometers.earth_radius(), 6371.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Miles,
    Kilometers,
}

impl Unit {
    /// Mean Earth radius in this unit.
    pub fn earth_radius(self) -> f64 {
        match self {
            Unit::Miles => 3959.0,
            Unit::Kilometers => 6371.0,
        }
    }
}

/// Termination policy for 2-opt improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoOptOptions {
    /// Consecutive passes without an improving move before stopping.
    pub stable_passes: usize,
    /// Hard cap on the number of passes.
    pub max_passes: usize,
}

impl Default for TwoOptOptions {
    fn default() -> Self {
        Self {
            stable_passes: 3,
            max_passes: 1000,
        }
    }
}

/// Parameters of a route computation.
///
/// The travel budget is `time × speed`, in [`Unit`]s.
///
/// # Examples
///
/// ```
/// use geo_route::models::{RouteConfig, Unit};
///
/// let config = RouteConfig::default()
///     .with_speed(50.0)
///     .with_time(4.0)
///     .with_max_visits(10);
/// assert_eq!(config.allowed_distance(), 200.0);
/// assert_eq!(config.unit, Unit::Miles);
/// assert!(config.validate().is_ok());
///
/// assert!(RouteConfig::default().with_speed(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub unit: Unit,
    /// Average speed, distance units per hour.
    pub speed: f64,
    /// Hours available for the whole round trip.
    pub time: f64,
    /// Maximum number of stops, excluding the start.
    pub max_visits: usize,
    /// Smallest population a location needs to be considered.
    pub min_population: u64,
    pub two_opt: TwoOptOptions,
    /// Safety cap on budget substitutions per computation.
    pub max_substitutions: usize,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            unit: Unit::Miles,
            speed: 5.0,
            time: 12.0,
            max_visits: 20,
            min_population: 1000,
            two_opt: TwoOptOptions::default(),
            max_substitutions: 10_000,
        }
    }
}

impl RouteConfig {
    /// Sets the distance unit for distances, speed and budget.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the average travel speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the hours available for the round trip.
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Sets the maximum number of stops.
    pub fn with_max_visits(mut self, max_visits: usize) -> Self {
        self.max_visits = max_visits;
        self
    }

    /// Sets the loader's population threshold.
    pub fn with_min_population(mut self, min_population: u64) -> Self {
        self.min_population = min_population;
        self
    }

    /// Sets the 2-opt termination policy.
    pub fn with_two_opt(mut self, two_opt: TwoOptOptions) -> Self {
        self.two_opt = two_opt;
        self
    }

    /// Sets the cap on budget substitutions.
    pub fn with_max_substitutions(mut self, max_substitutions: usize) -> Self {
        self.max_substitutions = max_substitutions;
        self
    }

    /// Maximum round-trip distance: `time × speed`.
    pub fn allowed_distance(&self) -> f64 {
        self.time * self.speed
    }

    /// Rejects values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(Error::invalid_input(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        if !self.time.is_finite() || self.time <= 0.0 {
            return Err(Error::invalid_input(format!(
                "time must be positive, got {}",
                self.time
            )));
        }
        if self.max_visits == 0 {
            return Err(Error::invalid_input("max_visits must be at least 1"));
        }
        if self.two_opt.stable_passes == 0 || self.two_opt.max_passes == 0 {
            return Err(Error::invalid_input(
                "2-opt stable_passes and max_passes must be at least 1",
            ));
        }
        Ok(())
    }
}
