//! Day simulation state machine.
//!
//! A [`TripSimulator`] owns no mutable state. [`TripSimulator::reset`]
//! produces a fresh [`TripState`] and [`TripSimulator::step`] consumes a state
//! and an action, returning the next state with its [`RewardOutcome`]. Every
//! terminating step closes the day at the nearest accommodation, so a
//! finished day always ends at one.
#![expect(
    clippy::float_arithmetic,
    reason = "the simulated clock advances by fractional travel minutes"
)]

mod reward;
mod rules;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::distance::{DEFAULT_SPEED_KMH, travel_minutes};
use crate::{
    Catalog, Category, ConfigError, DistanceMatrix, PlanRequestError, PointOfInterest, TagSet,
};

pub use reward::{
    EFFICIENT_TRAVEL_MINUTES, EFFICIENT_TRAVEL_REWARD, FINAL_ACCOMMODATION_REWARD,
    LONG_TRAVEL_MINUTES, LONG_TRAVEL_PENALTY, NEARBY_DISTANCE_KM, NEARBY_REWARD,
    POI_VISIT_REWARD, RewardEntry, RewardOutcome, RewardReason, TAG_MATCH_REWARD,
    VIOLATION_PENALTY,
};
pub use rules::{MAX_RESTAURANT_VISITS, RuleContext, Violation};

/// Daily window and travel model for the simulator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripConfig {
    /// Start of the day in minutes since midnight.
    pub start_time: u32,
    /// End of the day in minutes since midnight.
    pub end_time: u32,
    /// Constant travel speed in km/h.
    pub speed_kmh: f64,
    /// Minutes before `end_time` from which an accommodation may be chosen.
    pub accommodation_window: u32,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            start_time: 12 * 60,
            end_time: 21 * 60,
            speed_kmh: DEFAULT_SPEED_KMH,
            accommodation_window: 30,
        }
    }
}

impl TripConfig {
    /// Check that the window is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`PlanRequestError::EmptyTimeWindow`] when `start_time` is not
    /// before `end_time`.
    pub const fn validate(&self) -> Result<(), PlanRequestError> {
        if self.start_time >= self.end_time {
            return Err(PlanRequestError::EmptyTimeWindow {
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }
}

/// Simulation state for one day.
///
/// Only [`TripSimulator`] advances a state; callers read it through the
/// accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct TripState {
    current_time: f64,
    current_location: usize,
    visited: Vec<usize>,
    restaurant_visits: u32,
    selected_tags: TagSet,
}

impl TripState {
    /// Minutes since midnight.
    #[must_use]
    pub const fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Catalog index of the current POI.
    #[must_use]
    pub const fn current_location(&self) -> usize {
        self.current_location
    }

    /// Catalog indices visited so far, in order.
    #[must_use]
    pub fn visited(&self) -> &[usize] {
        &self.visited
    }

    /// Restaurants visited so far.
    #[must_use]
    pub const fn restaurant_visits(&self) -> u32 {
        self.restaurant_visits
    }

    /// Tags the visitor selected.
    #[must_use]
    pub const fn selected_tags(&self) -> &TagSet {
        &self.selected_tags
    }

    /// Whether `index` has been visited.
    #[must_use]
    pub fn has_visited(&self, index: usize) -> bool {
        self.visited.contains(&index)
    }

    /// Spend `minutes` at the current location.
    pub(crate) fn linger(&mut self, minutes: f64) {
        self.current_time += minutes;
    }

    fn move_to(&mut self, index: usize, travel: f64) {
        self.current_time += travel;
        self.current_location = index;
        self.visited.push(index);
    }
}

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// State after the action.
    pub state: TripState,
    /// Reward entries and termination flag.
    pub outcome: RewardOutcome,
}

/// Day simulator over a catalog and its distance matrix.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::{Catalog, Category, DistanceMatrix, PointOfInterest, TagSet, TripConfig, TripSimulator};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let catalog = Catalog::new(vec![
///     PointOfInterest::new(1, "Museum", Category::Sight, origin).with_duration_hours(1),
///     PointOfInterest::new(2, "Inn", Category::Accommodation, origin),
/// ])?;
/// let distances = DistanceMatrix::from_catalog(&catalog);
/// let simulator = TripSimulator::new(&catalog, &distances, TripConfig::default())?;
///
/// let state = simulator.reset_at(0, TagSet::new()).ok_or("start")?;
/// let transition = simulator.step(state, 1);
/// assert!(transition.outcome.is_done());
/// assert_eq!(transition.state.visited(), &[0, 1]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TripSimulator<'a> {
    catalog: &'a Catalog,
    distances: &'a DistanceMatrix,
    config: TripConfig,
}

impl<'a> TripSimulator<'a> {
    /// Construct a simulator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DistanceMatrixMismatch`] when the matrix does
    /// not cover exactly the catalog.
    pub fn new(
        catalog: &'a Catalog,
        distances: &'a DistanceMatrix,
        config: TripConfig,
    ) -> Result<Self, ConfigError> {
        if distances.size() != catalog.len() {
            return Err(ConfigError::DistanceMatrixMismatch {
                matrix: distances.size(),
                catalog: catalog.len(),
            });
        }
        Ok(Self {
            catalog,
            distances,
            config,
        })
    }

    /// Catalog the simulator walks.
    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Window and travel model in use.
    #[must_use]
    pub const fn config(&self) -> &TripConfig {
        &self.config
    }

    /// Start a day at a uniformly random non-accommodation POI.
    pub fn reset<R>(&self, selected_tags: TagSet, rng: &mut R) -> TripState
    where
        R: Rng + ?Sized,
    {
        let candidates = self.catalog.start_candidates();
        // `Catalog::new` guarantees at least one candidate.
        let start = candidates.choose(rng).copied().unwrap_or_default();
        self.fresh_state(start, selected_tags)
    }

    /// Start a day at `start`.
    ///
    /// Returns `None` when `start` is outside the catalog or is an
    /// accommodation.
    #[must_use]
    pub fn reset_at(&self, start: usize, selected_tags: TagSet) -> Option<TripState> {
        self.catalog
            .category(start)
            .filter(|category| !category.is_accommodation())
            .map(|_| self.fresh_state(start, selected_tags))
    }

    fn fresh_state(&self, start: usize, selected_tags: TagSet) -> TripState {
        TripState {
            current_time: f64::from(self.config.start_time),
            current_location: start,
            visited: vec![start],
            restaurant_visits: 0,
            selected_tags,
        }
    }

    /// Apply `action` to `state`.
    ///
    /// Terminal rules are checked first (see [`Violation::ORDER`]); otherwise
    /// the visit is committed if it finishes by `end_time`, or the day times
    /// out. A terminating step always closes the day at the nearest
    /// accommodation.
    #[must_use]
    pub fn step(&self, mut state: TripState, action: usize) -> Transition {
        let candidate = self.catalog.get(action);
        let violation = Violation::first_match(&self.rule_context(&state), action, candidate);
        let mut outcome = match (violation, candidate) {
            (Some(rule), _) => rule.outcome(),
            (None, Some(poi)) => self.visit(&mut state, action, poi),
            (None, None) => Violation::RepeatOrInvalid.outcome(),
        };

        if outcome.is_done() {
            self.close_day(&mut state, &mut outcome);
        }
        Transition { state, outcome }
    }

    /// End the day without another action, moving to the nearest
    /// accommodation if the current POI is not one.
    #[must_use]
    pub fn finish(&self, mut state: TripState) -> Transition {
        let mut outcome = RewardOutcome::ongoing();
        outcome.finish();
        self.close_day(&mut state, &mut outcome);
        Transition { state, outcome }
    }

    fn rule_context<'s>(&self, state: &'s TripState) -> RuleContext<'s> {
        let opens_at =
            f64::from(self.config.end_time) - f64::from(self.config.accommodation_window);
        RuleContext {
            state,
            last_category: state
                .visited
                .last()
                .and_then(|&index| self.catalog.category(index)),
            accommodation_opens_at: opens_at,
        }
    }

    fn visit(&self, state: &mut TripState, action: usize, poi: &PointOfInterest) -> RewardOutcome {
        let distance = self.distances.distance_km(state.current_location, action);
        let travel = travel_minutes(distance, self.config.speed_kmh);
        let stay = f64::from(poi.visit_minutes());
        let category = poi.category;
        let tag_match = poi.matches_any(&state.selected_tags);

        if state.current_time + travel + stay > f64::from(self.config.end_time) {
            return RewardOutcome::terminal(RewardReason::TimeOut, 0);
        }

        state.move_to(action, travel);
        state.linger(stay);
        if category == Category::Restaurant {
            state.restaurant_visits += 1;
        }

        let mut outcome = RewardOutcome::ongoing();
        outcome.push(RewardReason::PoiVisit, POI_VISIT_REWARD);
        if tag_match {
            outcome.push(RewardReason::TagMatch, TAG_MATCH_REWARD);
        }
        if distance < NEARBY_DISTANCE_KM {
            outcome.push(RewardReason::NearbyPoi, NEARBY_REWARD);
        }
        if travel < EFFICIENT_TRAVEL_MINUTES {
            outcome.push(RewardReason::EfficientTravel, EFFICIENT_TRAVEL_REWARD);
        }
        if travel > LONG_TRAVEL_MINUTES {
            outcome.push(RewardReason::LongTravel, LONG_TRAVEL_PENALTY);
        }
        // Arriving at an accommodation closes the day.
        if category.is_accommodation() {
            outcome.finish();
        }
        outcome
    }

    fn close_day(&self, state: &mut TripState, outcome: &mut RewardOutcome) {
        let at_accommodation = self
            .catalog
            .category(state.current_location)
            .is_some_and(Category::is_accommodation);
        if at_accommodation {
            return;
        }
        let Some(nearest) = self.nearest_accommodation(state.current_location) else {
            return;
        };
        let distance = self.distances.distance_km(state.current_location, nearest);
        state.move_to(nearest, travel_minutes(distance, self.config.speed_kmh));
        outcome.push(RewardReason::FinalAccommodation, FINAL_ACCOMMODATION_REWARD);
    }

    /// Closest accommodation to `from`; ties go to the lowest index.
    #[must_use]
    pub fn nearest_accommodation(&self, from: usize) -> Option<usize> {
        self.catalog
            .accommodations()
            .iter()
            .copied()
            .min_by(|&lhs, &rhs| {
                self.distances
                    .distance_km(from, lhs)
                    .total_cmp(&self.distances.distance_km(from, rhs))
            })
    }
}
