//! Validated, immutable POI catalogs.
//!
//! A [`Catalog`] owns the points of interest for a planning run and exposes
//! them by index. Construction rejects catalogs the trip rules cannot work
//! with: empty ones, duplicate identifiers, no accommodation to close a day
//! at, or nothing that is not an accommodation to start from.

use std::collections::HashSet;

use thiserror::Error;

use crate::{Category, PointOfInterest};

/// Errors returned by [`Catalog::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No points of interest were supplied.
    #[error("catalog must contain at least one point of interest")]
    Empty,
    /// Two records share an identifier.
    #[error("point of interest id {id} appears more than once")]
    DuplicatePoiId {
        /// The repeated identifier.
        id: u64,
    },
    /// No accommodation exists for the final leg of a day.
    #[error("catalog contains no accommodation to end a day at")]
    NoAccommodationAvailable,
    /// Every POI is an accommodation, so no day can start.
    #[error("catalog contains no non-accommodation point of interest to start from")]
    NoStartCandidate,
}

/// Ordered, validated collection of points of interest.
///
/// Indices into the catalog are the state and action space of the trip
/// simulator and the decision table.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::{Catalog, Category, PointOfInterest};
///
/// # fn main() -> Result<(), daytrip_core::CatalogError> {
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let catalog = Catalog::new(vec![
///     PointOfInterest::new(10, "Tower", Category::Sight, origin),
///     PointOfInterest::new(11, "Inn", Category::Accommodation, origin),
/// ])?;
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.index_of(11), Some(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pois: Vec<PointOfInterest>,
    accommodations: Vec<usize>,
    start_candidates: Vec<usize>,
}

impl Catalog {
    /// Validate and construct a catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the catalog is empty, contains duplicate
    /// identifiers, lacks an accommodation, or consists only of accommodations.
    pub fn new(pois: Vec<PointOfInterest>) -> Result<Self, CatalogError> {
        if pois.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(pois.len());
        if let Some(poi) = pois.iter().find(|poi| !seen.insert(poi.id)) {
            return Err(CatalogError::DuplicatePoiId { id: poi.id });
        }

        let (accommodations, start_candidates): (Vec<usize>, Vec<usize>) = (0..pois.len())
            .partition(|&idx| {
                pois.get(idx)
                    .is_some_and(|poi| poi.category == Category::Accommodation)
            });
        if accommodations.is_empty() {
            return Err(CatalogError::NoAccommodationAvailable);
        }
        if start_candidates.is_empty() {
            return Err(CatalogError::NoStartCandidate);
        }

        Ok(Self {
            pois,
            accommodations,
            start_candidates,
        })
    }

    /// Number of POIs in the catalog.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pois.len()
    }

    /// Always `false`; an empty catalog cannot be constructed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    /// Look up a POI by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PointOfInterest> {
        self.pois.get(index)
    }

    /// Find the index of the POI with identifier `id`.
    #[must_use]
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.pois.iter().position(|poi| poi.id == id)
    }

    /// All POIs in catalog order.
    #[must_use]
    pub fn pois(&self) -> &[PointOfInterest] {
        &self.pois
    }

    /// Indices of accommodation POIs, ascending.
    #[must_use]
    pub fn accommodations(&self) -> &[usize] {
        &self.accommodations
    }

    /// Indices of POIs a day may start at, ascending.
    #[must_use]
    pub fn start_candidates(&self) -> &[usize] {
        &self.start_candidates
    }

    /// Category of the POI at `index`, if it exists.
    #[must_use]
    pub fn category(&self, index: usize) -> Option<Category> {
        self.pois.get(index).map(|poi| poi.category)
    }
}
