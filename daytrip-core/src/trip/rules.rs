//! Terminal rules checked before a visit is attempted.
//!
//! Rules are evaluated in [`Violation::ORDER`]; the first match ends the day
//! and no later rule is consulted.

use crate::{Category, PointOfInterest};

use super::reward::{RewardOutcome, RewardReason, VIOLATION_PENALTY};
use super::TripState;

/// Maximum restaurants per day.
pub const MAX_RESTAURANT_VISITS: u32 = 3;

/// A rule that rejects an action outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Accommodation chosen before `end_time - accommodation_window`.
    EarlyAccommodation,
    /// Action already visited or outside the catalog.
    RepeatOrInvalid,
    /// Restaurant chosen after [`MAX_RESTAURANT_VISITS`] restaurants.
    RestaurantCap,
    /// Action shares the previous stop's category.
    SameCategory,
}

/// Facts about the current state the rules consult.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// State before the action is applied.
    pub state: &'a TripState,
    /// Category of the most recently visited POI.
    pub last_category: Option<Category>,
    /// Latest time an accommodation counts as early, in minutes.
    pub accommodation_opens_at: f64,
}

impl Violation {
    /// Evaluation order; first match wins.
    pub const ORDER: [Self; 4] = [
        Self::EarlyAccommodation,
        Self::RepeatOrInvalid,
        Self::RestaurantCap,
        Self::SameCategory,
    ];

    /// Return the first rule `candidate` breaks.
    ///
    /// `candidate` is `None` when `action` lies outside the catalog. Such an
    /// action has no category, so only [`Violation::RepeatOrInvalid`] can
    /// match it.
    #[must_use]
    pub fn first_match(
        context: &RuleContext<'_>,
        action: usize,
        candidate: Option<&PointOfInterest>,
    ) -> Option<Self> {
        Self::ORDER
            .into_iter()
            .find(|rule| rule.applies(context, action, candidate))
    }

    /// Whether this rule rejects `action`.
    #[must_use]
    pub fn applies(
        self,
        context: &RuleContext<'_>,
        action: usize,
        candidate: Option<&PointOfInterest>,
    ) -> bool {
        let state = context.state;
        match (self, candidate) {
            (Self::RepeatOrInvalid, None) => true,
            (_, None) => false,
            (Self::EarlyAccommodation, Some(poi)) => {
                poi.category.is_accommodation()
                    && state.current_time() < context.accommodation_opens_at
            }
            (Self::RepeatOrInvalid, Some(_)) => state.has_visited(action),
            (Self::RestaurantCap, Some(poi)) => {
                poi.category == Category::Restaurant
                    && state.restaurant_visits() >= MAX_RESTAURANT_VISITS
            }
            (Self::SameCategory, Some(poi)) => context.last_category == Some(poi.category),
        }
    }

    /// Reason recorded when this rule fires.
    #[must_use]
    pub const fn reason(self) -> RewardReason {
        match self {
            Self::EarlyAccommodation => RewardReason::AccommodationTooEarly,
            Self::RepeatOrInvalid => RewardReason::AlreadyVisited,
            Self::RestaurantCap => RewardReason::RestaurantLimit,
            Self::SameCategory => RewardReason::ConsecutiveCategory,
        }
    }

    /// Terminal outcome carrying the violation penalty.
    #[must_use]
    pub fn outcome(self) -> RewardOutcome {
        RewardOutcome::terminal(self.reason(), VIOLATION_PENALTY)
    }
}
