//! POI categories driving diversity and termination rules.
//!
//! Categories travel as integer codes in catalog records and decision table
//! tooling. Known codes map to named variants; anything else is preserved as
//! [`Category::Other`] so a catalog never loses information on a round trip.
//!
//! # Examples
//! ```
//! use daytrip_core::Category;
//!
//! assert_eq!(Category::from_code(3), Category::Accommodation);
//! assert_eq!(Category::Restaurant.code(), 1);
//! assert_eq!(Category::Leisure.to_string(), "leisure");
//! ```

/// Classification of a point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "u8", into = "u8")
)]
pub enum Category {
    /// Sightseeing spots and landmarks.
    Sight,
    /// Places to eat. Capped per day.
    Restaurant,
    /// Leisure and activity venues.
    Leisure,
    /// Overnight stays. Every day ends at one.
    Accommodation,
    /// A catalog code without a named variant.
    Other(u8),
}

impl Category {
    /// Map a catalog code onto a category.
    ///
    /// # Examples
    /// ```
    /// use daytrip_core::Category;
    ///
    /// assert_eq!(Category::from_code(0), Category::Sight);
    /// assert_eq!(Category::from_code(9), Category::Other(9));
    /// ```
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Sight,
            1 => Self::Restaurant,
            2 => Self::Leisure,
            3 => Self::Accommodation,
            other => Self::Other(other),
        }
    }

    /// Return the catalog code for this category.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Sight => 0,
            Self::Restaurant => 1,
            Self::Leisure => 2,
            Self::Accommodation => 3,
            Self::Other(code) => code,
        }
    }

    /// Whether the category closes out a day.
    #[must_use]
    pub const fn is_accommodation(self) -> bool {
        matches!(self, Self::Accommodation)
    }
}

impl From<u8> for Category {
    fn from(code: u8) -> Self {
        Self::from_code(code)
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> Self {
        category.code()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sight => f.write_str("sight"),
            Self::Restaurant => f.write_str("restaurant"),
            Self::Leisure => f.write_str("leisure"),
            Self::Accommodation => f.write_str("accommodation"),
            Self::Other(code) => write!(f, "category-{code}"),
        }
    }
}
