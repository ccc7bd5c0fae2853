//! Location and location set types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name given to the start entry appended by [`LocationSet::with_start`].
pub const STARTING_LOCATION_NAME: &str = "Starting Location";

/// A populated place with geographic coordinates in degrees.
///
/// # Examples
///
/// ```
/// use geo_route::models::Location;
///
/// let anaheim = Location::new("Anaheim", 336_265, 33.8366, -117.9143);
/// assert_eq!(anaheim.population(), 336_265);
/// assert_eq!(anaheim.coordinates(), (33.8366, -117.9143));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    name: String,
    population: u64,
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Creates a new location.
    pub fn new(name: impl Into<String>, population: u64, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            population,
            latitude,
            longitude,
        }
    }

    /// Creates the zero-population starting location.
    pub fn start(latitude: f64, longitude: f64) -> Self {
        Self::new(STARTING_LOCATION_NAME, 0, latitude, longitude)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// `(latitude, longitude)` in degrees.
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// An ordered collection of locations with one designated start.
///
/// The key of a location is its index in the set, so keys are unique by
/// construction and stay stable for the lifetime of the set. The start
/// entry has population 0 and is part of every tour.
///
/// # Examples
///
/// ```
/// use geo_route::models::{Location, LocationSet};
///
/// let set = LocationSet::with_start(
///     vec![
///         Location::new("Anaheim", 336_265, 33.8366, -117.9143),
///         Location::new("Irvine", 307_670, 33.6846, -117.8265),
///     ],
///     33.807944,
///     -117.951391,
/// );
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.start(), 2);
/// assert_eq!(set.non_start_keys(), vec![0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSet {
    locations: Vec<Location>,
    start: usize,
}

impl LocationSet {
    /// Appends a starting location at the given coordinates.
    ///
    /// The start becomes the last key of the set.
    pub fn with_start(mut locations: Vec<Location>, latitude: f64, longitude: f64) -> Self {
        locations.push(Location::start(latitude, longitude));
        let start = locations.len() - 1;
        Self { locations, start }
    }

    /// Wraps locations whose start entry is already present at key `start`.
    ///
    /// Fails if the set is empty, `start` is out of range, the start has a
    /// non-zero population, or any coordinate is not finite.
    pub fn new(locations: Vec<Location>, start: usize) -> Result<Self> {
        let set = Self { locations, start };
        set.validate()?;
        Ok(set)
    }

    /// Checks the set invariants: non-empty, start in range with
    /// population 0, and finite coordinates everywhere.
    pub fn validate(&self) -> Result<()> {
        if self.locations.is_empty() {
            return Err(Error::invalid_input("location set is empty"));
        }
        let Some(start_location) = self.locations.get(self.start) else {
            return Err(Error::invalid_input(format!(
                "start key {} is out of range for {} locations",
                self.start,
                self.locations.len()
            )));
        };
        if start_location.population() != 0 {
            return Err(Error::invalid_input(format!(
                "start location must have population 0, got {}",
                start_location.population()
            )));
        }
        if let Some((key, bad)) = self
            .locations
            .iter()
            .enumerate()
            .find(|(_, l)| !l.latitude().is_finite() || !l.longitude().is_finite())
        {
            return Err(Error::invalid_input(format!(
                "location {key} ({}) has non-finite coordinates",
                bad.name()
            )));
        }
        Ok(())
    }

    /// Key of the starting location.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Always `false` for a constructed set; the start is always present.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn get(&self, key: usize) -> Option<&Location> {
        self.locations.get(key)
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Population of every location, indexed by key.
    pub fn populations(&self) -> Vec<u64> {
        self.locations.iter().map(Location::population).collect()
    }

    /// All keys except the start, in set order.
    pub fn non_start_keys(&self) -> Vec<usize> {
        (0..self.locations.len())
            .filter(|&key| key != self.start)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> Vec<Location> {
        vec![
            Location::new("A", 10, 1.0, 1.0),
            Location::new("B", 20, 2.0, 2.0),
        ]
    }

    #[test]
    fn test_with_start_appends_once() {
        let set = LocationSet::with_start(cities(), 0.5, 0.5);
        assert_eq!(set.len(), 3);
        assert_eq!(set.start(), 2);
        let start = set.get(2).expect("start");
        assert_eq!(start.name(), STARTING_LOCATION_NAME);
        assert_eq!(start.population(), 0);
        assert_eq!(start.coordinates(), (0.5, 0.5));
    }

    #[test]
    fn test_new_valid() {
        let mut locations = cities();
        locations.insert(0, Location::start(0.0, 0.0));
        let set = LocationSet::new(locations, 0).expect("valid");
        assert_eq!(set.start(), 0);
        assert_eq!(set.non_start_keys(), vec![1, 2]);
        assert_eq!(set.populations(), vec![0, 10, 20]);
    }

    #[test]
    fn test_new_empty() {
        assert!(matches!(
            LocationSet::new(Vec::new(), 0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_new_start_out_of_range() {
        assert!(LocationSet::new(cities(), 5).is_err());
    }

    #[test]
    fn test_new_start_with_population() {
        assert!(LocationSet::new(cities(), 0).is_err());
    }

    #[test]
    fn test_new_non_finite_coordinates() {
        let locations = vec![
            Location::start(0.0, 0.0),
            Location::new("Nowhere", 5, f64::NAN, 0.0),
        ];
        assert!(LocationSet::new(locations, 0).is_err());
    }

    #[test]
    fn test_with_start_non_finite_fails_validation() {
        let set = LocationSet::with_start(cities(), f64::INFINITY, 0.0);
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_location_serde() {
        let loc = Location::new("Fullerton", 143_617, 33.8704, -117.9242);
        let json = serde_json::to_string(&loc).expect("serialize");
        let back: Location = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(loc, back);
    }
}
