use std::collections::BTreeSet;

use geo::Coord;

use crate::Category;

/// Ordered set of integer tag codes.
pub type TagSet = BTreeSet<u32>;

/// A location worth visiting.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
/// `duration_hours` is the stay length charged when the POI is visited.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::{Category, PointOfInterest, TagSet};
///
/// let poi = PointOfInterest::new(1, "Harbour", Category::Sight, Coord { x: 126.5, y: 33.5 })
///     .with_duration_hours(2)
///     .with_tags(TagSet::from([5]));
///
/// assert_eq!(poi.id, 1);
/// assert_eq!(poi.visit_minutes(), 120);
/// assert!(poi.tags.contains(&5));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointOfInterest {
    /// Unique identifier within a catalog.
    pub id: u64,
    /// Human-readable name used in stop details.
    pub name: String,
    /// Category driving the trip rules.
    pub category: Category,
    /// Stay length in whole hours.
    pub duration_hours: u32,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Tag codes matched against the visitor's selection.
    pub tags: TagSet,
}

impl PointOfInterest {
    /// Construct a `PointOfInterest` with no stay and no tags.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use daytrip_core::{Category, PointOfInterest};
    ///
    /// let poi = PointOfInterest::new(7, "Inn", Category::Accommodation, Coord { x: 0.0, y: 0.0 });
    /// assert_eq!(poi.duration_hours, 0);
    /// assert!(poi.tags.is_empty());
    /// ```
    pub fn new(id: u64, name: impl Into<String>, category: Category, location: Coord<f64>) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            duration_hours: 0,
            location,
            tags: TagSet::new(),
        }
    }

    /// Set the stay length while returning `self` for chaining.
    #[must_use]
    pub const fn with_duration_hours(mut self, hours: u32) -> Self {
        self.duration_hours = hours;
        self
    }

    /// Replace the tag set while returning `self` for chaining.
    #[must_use]
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    /// Stay length in minutes.
    #[must_use]
    pub const fn visit_minutes(&self) -> u32 {
        self.duration_hours.saturating_mul(60)
    }

    /// Whether the POI carries at least one of `selected`.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use daytrip_core::{Category, PointOfInterest, TagSet};
    ///
    /// let poi = PointOfInterest::new(1, "Beach", Category::Leisure, Coord { x: 0.0, y: 0.0 })
    ///     .with_tags(TagSet::from([1, 3]));
    /// assert!(poi.matches_any(&TagSet::from([3, 9])));
    /// assert!(!poi.matches_any(&TagSet::from([9])));
    /// ```
    #[must_use]
    pub fn matches_any(&self, selected: &TagSet) -> bool {
        !self.tags.is_disjoint(selected)
    }
}
