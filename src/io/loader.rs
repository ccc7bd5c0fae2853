//! Tab-separated location reader.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::distance::haversine_distance;
use crate::error::{Error, Result};
use crate::models::{Location, RouteConfig, Unit};

const REQUIRED_COLUMNS: [&str; 4] = ["city", "pop", "lat", "lon"];

/// Which dataset rows are worth planning with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFilter {
    /// `(latitude, longitude)` of the start.
    pub origin: (f64, f64),
    pub min_population: u64,
    /// Round-trip distance; rows must lie within half of it.
    pub max_distance: f64,
    pub unit: Unit,
}

impl LocationFilter {
    /// Filter for a route from `origin` under `config`.
    pub fn from_config(origin: (f64, f64), config: &RouteConfig) -> Self {
        Self {
            origin,
            min_population: config.min_population,
            max_distance: config.allowed_distance(),
            unit: config.unit,
        }
    }

    /// `true` if the location could be part of a round trip from `origin`.
    pub fn accepts(&self, location: &Location) -> bool {
        location.population() >= self.min_population
            && haversine_distance(self.origin, location.coordinates(), self.unit)
                < self.max_distance / 2.0
    }
}

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "city")]
    name: String,
    #[serde(rename = "pop")]
    population: u64,
    lat: f64,
    lon: f64,
}

/// Reads a tab-separated table with at least the `city`, `pop`, `lat` and
/// `lon` columns, in any order.
///
/// Rows with missing or unparsable fields are skipped. Rows rejected by
/// `filter` are dropped.
///
/// # Errors
///
/// [`Error::InvalidData`] if a required column is missing from the header,
/// [`Error::Csv`] if the input cannot be read.
///
/// # Examples
///
/// ```
/// use geo_route::io::{read_locations, LocationFilter};
/// use geo_route::models::Unit;
///
/// let data = "city\tpop\tlat\tlon\n\
///             Anaheim\t336265\t33.8366\t-117.9143\n\
///             San Diego\t1386932\t32.7157\t-117.1611\n";
/// let filter = LocationFilter {
///     origin: (33.807944, -117.951391),
///     min_population: 1000,
///     max_distance: 60.0,
///     unit: Unit::Miles,
/// };
/// let locations = read_locations(data.as_bytes(), &filter).unwrap();
/// assert_eq!(locations.len(), 1);
/// assert_eq!(locations[0].name(), "Anaheim");
/// ```
pub fn read_locations<R: std::io::Read>(
    reader: R,
    filter: &LocationFilter,
) -> Result<Vec<Location>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::invalid_data(format!("missing column '{column}'")));
        }
    }

    let mut locations = Vec::new();
    let mut skipped = 0usize;
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let row: Row = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(e) => {
                warn!(line = line + 2, error = %e, "skipping malformed row");
                skipped += 1;
                continue;
            }
        };
        if !row.lat.is_finite() || !row.lon.is_finite() {
            warn!(line = line + 2, "skipping row with non-finite coordinates");
            skipped += 1;
            continue;
        }

        let location = Location::new(row.name, row.population, row.lat, row.lon);
        if filter.accepts(&location) {
            locations.push(location);
        }
    }

    debug!(kept = locations.len(), skipped, "read locations");
    Ok(locations)
}

/// Opens `path` and reads it with [`read_locations`].
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be opened, otherwise as
/// [`read_locations`].
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_locations(path: impl AsRef<Path>, filter: &LocationFilter) -> Result<Vec<Location>> {
    let file = File::open(path.as_ref())?;
    read_locations(file, filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: (f64, f64) = (33.807944, -117.951391);

    fn filter(min_population: u64, max_distance: f64) -> LocationFilter {
        LocationFilter {
            origin: ORIGIN,
            min_population,
            max_distance,
            unit: Unit::Miles,
        }
    }

    fn names(locations: &[Location]) -> Vec<&str> {
        locations.iter().map(|l| l.name()).collect()
    }

    const TABLE: &str = "\
state\tcity\tpop\tlat\tlon
CA\tAnaheim\t336265\t33.8366\t-117.9143
CA\tIrvine\t307670\t33.6846\t-117.8265
CA\tLos Angeles\t3898747\t34.0522\t-118.2437
CA\tSan Diego\t1386932\t32.7157\t-117.1611
CA\tTinytown\t500\t33.8100\t-117.9500
";

    #[test]
    fn test_filters_by_population_and_distance() {
        let locations = read_locations(TABLE.as_bytes(), &filter(1000, 60.0)).expect("valid");
        assert_eq!(names(&locations), vec!["Anaheim", "Irvine", "Los Angeles"]);
        assert_eq!(locations[0].population(), 336_265);
        assert_eq!(locations[0].coordinates(), (33.8366, -117.9143));
    }

    #[test]
    fn test_distance_limit_is_half_the_round_trip() {
        // Los Angeles is 23.784 miles out.
        let near = read_locations(TABLE.as_bytes(), &filter(1000, 40.0)).expect("valid");
        assert_eq!(names(&near), vec!["Anaheim", "Irvine"]);
        let far = read_locations(TABLE.as_bytes(), &filter(1000, 200.0)).expect("valid");
        assert_eq!(far.len(), 4);
    }

    #[test]
    fn test_min_population_is_inclusive() {
        let locations = read_locations(TABLE.as_bytes(), &filter(500, 60.0)).expect("valid");
        assert!(names(&locations).contains(&"Tinytown"));
        let locations = read_locations(TABLE.as_bytes(), &filter(501, 60.0)).expect("valid");
        assert!(!names(&locations).contains(&"Tinytown"));
    }

    #[test]
    fn test_columns_in_any_order_with_padding() {
        let data = "lon\t lat \tpop\tcity\n-117.9143\t33.8366\t 336265 \t Anaheim \n";
        let locations = read_locations(data.as_bytes(), &filter(1000, 60.0)).expect("valid");
        assert_eq!(names(&locations), vec!["Anaheim"]);
        assert_eq!(locations[0].population(), 336_265);
    }

    #[test]
    fn test_missing_column_is_invalid_data() {
        let data = "city\tpopulation\tlat\tlon\nAnaheim\t336265\t33.8366\t-117.9143\n";
        let err = read_locations(data.as_bytes(), &filter(1000, 60.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(err.to_string().contains("pop"));
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let data = "\
city\tpop\tlat\tlon
Anaheim\t336265\t33.8366\t-117.9143
Truncated\t1000
Unparsable\tmany\t33.8\t-117.9
Irvine\t307670\t33.6846\t-117.8265
";
        let locations = read_locations(data.as_bytes(), &filter(1000, 60.0)).expect("valid");
        assert_eq!(names(&locations), vec!["Anaheim", "Irvine"]);
    }

    #[test]
    fn test_quotes_are_literal() {
        let data = "city\tpop\tlat\tlon\n\"Old\" Town\t5000\t33.8\t-117.9\n";
        let locations = read_locations(data.as_bytes(), &filter(1000, 60.0)).expect("valid");
        assert_eq!(names(&locations), vec!["\"Old\" Town"]);
    }

    #[test]
    fn test_from_config() {
        let config = RouteConfig::default()
            .with_speed(30.0)
            .with_time(2.0)
            .with_min_population(2000)
            .with_unit(Unit::Kilometers);
        let f = LocationFilter::from_config(ORIGIN, &config);
        assert_eq!(f.max_distance, 60.0);
        assert_eq!(f.min_population, 2000);
        assert_eq!(f.unit, Unit::Kilometers);
        assert_eq!(f.origin, ORIGIN);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_locations("/nonexistent/cities.tsv", &filter(1000, 60.0)).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("geo-route-{}.tsv", std::process::id()));
        std::fs::write(&path, TABLE).expect("write");
        let locations = load_locations(&path, &filter(1000, 60.0));
        std::fs::remove_file(&path).ok();
        assert_eq!(locations.expect("valid").len(), 3);
    }
}
