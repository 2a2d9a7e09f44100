//! Builders for small catalogs, distance matrices and decision tables.
//!
//! Unit tests, behaviour tests and benchmarks share these helpers so that
//! scenarios read in terms of categories and preferences rather than raw
//! vectors.

use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    Catalog, CatalogError, Category, ConfigError, DecisionTable, DistanceMatrix, PointOfInterest,
    TagSet,
};

/// Construct a POI at the origin named `poi-{id}`.
///
/// # Examples
/// ```rust
/// use daytrip_core::Category;
/// use daytrip_core::test_support::poi;
///
/// let poi = poi(2, Category::Restaurant, 1, &[5]);
/// assert_eq!(poi.name, "poi-2");
/// assert!(poi.tags.contains(&5));
/// ```
#[must_use]
pub fn poi(id: u64, category: Category, duration_hours: u32, tags: &[u32]) -> PointOfInterest {
    PointOfInterest::new(id, format!("poi-{id}"), category, Coord { x: 0.0, y: 0.0 })
        .with_duration_hours(duration_hours)
        .with_tags(tags.iter().copied().collect::<TagSet>())
}

/// Three-POI catalog: a one-hour sight (id 1), a one-hour restaurant tagged
/// `5` (id 2) and an accommodation (id 3).
///
/// # Errors
///
/// Never fails in practice; the error type mirrors [`Catalog::new`].
pub fn scenario_catalog() -> Result<Catalog, CatalogError> {
    Catalog::new(vec![
        poi(1, Category::Sight, 1, &[]),
        poi(2, Category::Restaurant, 1, &[5]),
        poi(3, Category::Accommodation, 0, &[]),
    ])
}

/// Matrix where every distinct pair is `km` apart.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDistance`] when `km` is negative or not
/// finite.
pub fn uniform_distances(size: usize, km: f64) -> Result<DistanceMatrix, ConfigError> {
    let mut rows = vec![vec![km; size]; size];
    for (idx, row) in rows.iter_mut().enumerate() {
        if let Some(cell) = row.get_mut(idx) {
            *cell = 0.0;
        }
    }
    DistanceMatrix::from_rows(rows)
}

/// Table scoring `1.0` for each `(from, to)` preference and `0.0` elsewhere.
///
/// # Examples
/// ```rust
/// use daytrip_core::test_support::preference_table;
///
/// let table = preference_table(3, &[(0, 1), (1, 2)]).expect("table");
/// assert_eq!(table.best_action(0), Some(1));
/// assert_eq!(table.best_action(1), Some(2));
/// ```
///
/// # Errors
///
/// Never fails for in-range preferences; out-of-range pairs are ignored.
pub fn preference_table(
    size: usize,
    preferences: &[(usize, usize)],
) -> Result<DecisionTable, ConfigError> {
    let mut rows = vec![vec![0.0; size]; size];
    for &(from, to) in preferences {
        if let Some(cell) = rows.get_mut(from).and_then(|row| row.get_mut(to)) {
            *cell = 1.0;
        }
    }
    DecisionTable::new(rows)
}

/// Deterministic catalog of `size` POIs scattered around Jeju City.
///
/// Index `0` is always an accommodation and index `1` a sight; the rest draw
/// categories, stays of zero to two hours, and tags `1..=6` from `seed`.
///
/// # Errors
///
/// Returns [`CatalogError::NoStartCandidate`] when `size < 2`.
#[expect(
    clippy::float_arithmetic,
    reason = "coordinates are offset from a fixed centre"
)]
pub fn synthetic_catalog(size: usize, seed: u64) -> Result<Catalog, CatalogError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let pois = (0..size)
        .map(|idx| {
            let category = match idx {
                0 => Category::Accommodation,
                1 => Category::Sight,
                _ => Category::from_code(rng.gen_range(0..4)),
            };
            let tags: TagSet = (0..rng.gen_range(0..3))
                .map(|_| rng.gen_range(1..=6))
                .collect();
            let location = Coord {
                x: 126.53 + rng.gen_range(-0.08..0.08),
                y: 33.50 + rng.gen_range(-0.05..0.05),
            };
            PointOfInterest::new(idx as u64 + 1, format!("poi-{idx}"), category, location)
                .with_duration_hours(rng.gen_range(0..=2))
                .with_tags(tags)
        })
        .collect();
    Catalog::new(pois)
}

/// Random finite decision table of `size` rows drawn from `seed`.
///
/// # Errors
///
/// Never fails in practice; the error type mirrors [`DecisionTable::new`].
pub fn synthetic_table(size: usize, seed: u64) -> Result<DecisionTable, ConfigError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let rows = (0..size)
        .map(|_| (0..size).map(|_| rng.gen_range(0.0..1.0)).collect())
        .collect();
    DecisionTable::new(rows)
}
