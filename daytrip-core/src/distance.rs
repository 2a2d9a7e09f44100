//! Great-circle distances and the clock arithmetic built on them.
//!
//! Distances are straight-line haversine kilometres; travel time assumes a
//! constant speed, slower than road traffic to compensate for the straight
//! line. The [`DistanceMatrix`] is computed once per catalog and shared
//! read-only by every rollout.
#![expect(
    clippy::float_arithmetic,
    reason = "haversine distances and travel durations are floating-point quantities"
)]

use geo::Coord;

use crate::{Catalog, ConfigError};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default travel speed in km/h.
pub const DEFAULT_SPEED_KMH: f64 = 30.0;

/// Haversine distance in kilometres between two WGS84 coordinates.
///
/// `x` is longitude and `y` is latitude, both in degrees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::distance::haversine_km;
///
/// let a = Coord { x: 126.53, y: 33.50 };
/// let b = Coord { x: 126.56, y: 33.25 };
/// assert_eq!(haversine_km(a, a), 0.0);
/// assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-12);
/// ```
#[must_use]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat1 = from.y.to_radians();
    let lat2 = to.y.to_radians();
    let delta_lat = (to.y - from.y).to_radians();
    let delta_lon = (to.x - from.x).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Minutes needed to cover `distance_km` at `speed_kmh`.
///
/// # Examples
/// ```
/// use daytrip_core::distance::{DEFAULT_SPEED_KMH, travel_minutes};
///
/// assert_eq!(travel_minutes(15.0, DEFAULT_SPEED_KMH), 30.0);
/// assert_eq!(travel_minutes(0.0, DEFAULT_SPEED_KMH), 0.0);
/// ```
#[must_use]
pub fn travel_minutes(distance_km: f64, speed_kmh: f64) -> f64 {
    distance_km / (speed_kmh / 60.0)
}

/// Format minutes since midnight as `HH:MM`.
///
/// Fractional minutes are truncated. Hours do not wrap at midnight, so
/// `1500.0` formats as `25:00`. Negative and non-finite inputs format as
/// `00:00`.
///
/// # Examples
/// ```
/// use daytrip_core::distance::format_clock;
///
/// assert_eq!(format_clock(720.0), "12:00");
/// assert_eq!(format_clock(782.9), "13:02");
/// assert_eq!(format_clock(1500.0), "25:00");
/// ```
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "clock values are truncated to whole non-negative minutes"
)]
pub fn format_clock(minutes: f64) -> String {
    let whole = if minutes.is_finite() && minutes > 0.0 {
        minutes.trunc() as u64
    } else {
        0
    };
    let hours = whole.div_euclid(60);
    let mins = whole.rem_euclid(60);
    format!("{hours:02}:{mins:02}")
}

/// Square, symmetric matrix of kilometre distances over catalog indices.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::{Catalog, Category, DistanceMatrix, PointOfInterest};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = Catalog::new(vec![
///     PointOfInterest::new(1, "Pier", Category::Sight, Coord { x: 0.0, y: 0.0 }),
///     PointOfInterest::new(2, "Inn", Category::Accommodation, Coord { x: 0.0, y: 0.01 }),
/// ])?;
/// let matrix = DistanceMatrix::from_catalog(&catalog);
/// assert_eq!(matrix.size(), 2);
/// assert_eq!(matrix.distance_km(0, 0), 0.0);
/// assert_eq!(matrix.distance_km(0, 1), matrix.distance_km(1, 0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl DistanceMatrix {
    /// Compute pairwise haversine distances for every POI in `catalog`.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let size = catalog.len();
        let mut cells = vec![0.0; size * size];
        for (i, from) in catalog.pois().iter().enumerate() {
            for (j, to) in catalog.pois().iter().enumerate().skip(i + 1) {
                let km = haversine_km(from.location, to.location);
                if let Some(cell) = cells.get_mut(i * size + j) {
                    *cell = km;
                }
                if let Some(cell) = cells.get_mut(j * size + i) {
                    *cell = km;
                }
            }
        }
        Self { size, cells }
    }

    /// Build a matrix from explicit rows, e.g. a precomputed road distance
    /// table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DistanceMatrixNotSquare`] when a row length
    /// differs from the row count and [`ConfigError::InvalidDistance`] when a
    /// cell is negative or non-finite, the diagonal is non-zero, or the
    /// matrix is not symmetric.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ConfigError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(ConfigError::DistanceMatrixNotSquare {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }
        let matrix = Self { size, cells };
        matrix.validate()?;
        Ok(matrix)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for row in 0..self.size {
            for column in 0..self.size {
                let value = self.cell(row, column);
                let mirrored = self.cell(column, row);
                let valid = value.is_some_and(|km| km.is_finite() && km >= 0.0)
                    && value == mirrored
                    && (row != column || value == Some(0.0));
                if !valid {
                    return Err(ConfigError::InvalidDistance { row, column });
                }
            }
        }
        Ok(())
    }

    fn cell(&self, from: usize, to: usize) -> Option<f64> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.cells.get(from * self.size + to).copied()
    }

    /// Number of rows (and columns).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Distance in kilometres between catalog indices `from` and `to`.
    ///
    /// Out-of-range indices indicate a caller bug; they are logged and
    /// treated as zero distance.
    #[must_use]
    pub fn distance_km(&self, from: usize, to: usize) -> f64 {
        self.cell(from, to).unwrap_or_else(|| {
            log::warn!(
                "distance lookup from index {from} to index {to} is outside a {size}x{size} matrix; falling back to zero",
                size = self.size
            );
            0.0
        })
    }
}
