//! Core domain types and planning for the daytrip itinerary engine.
//!
//! A [`Catalog`] of points of interest, a [`DistanceMatrix`] and a
//! precomputed [`DecisionTable`] feed the [`TripSimulator`], a pure state
//! machine that applies the day's constraints and rewards. The
//! [`ItineraryPlanner`] walks the simulator greedily and retries each day
//! until a rollout clears the acceptance threshold.
//!
//! Constructors return `Result` so that inconsistent inputs are reported
//! before any simulation starts.

#![forbid(unsafe_code)]

mod catalog;
mod category;
mod decision;
pub mod distance;
mod error;
mod planner;
mod poi;
pub mod test_support;
mod trip;

pub use catalog::{Catalog, CatalogError};
pub use category::Category;
pub use decision::DecisionTable;
pub use distance::DistanceMatrix;
pub use error::{ConfigError, PlanError, PlanRequestError};
pub use planner::{
    DEFAULT_ACCEPTANCE_THRESHOLD, DEFAULT_MAX_ATTEMPTS, DayDiagnostics, DayPlan, Diagnostics,
    Itinerary, ItineraryPlanner, PlanRequest, Planner, PlannerConfig, StopDetail,
    TAG_SCORE_PER_STOP,
};
pub use poi::{PointOfInterest, TagSet};
pub use trip::{
    EFFICIENT_TRAVEL_MINUTES, EFFICIENT_TRAVEL_REWARD, FINAL_ACCOMMODATION_REWARD,
    LONG_TRAVEL_MINUTES, LONG_TRAVEL_PENALTY, MAX_RESTAURANT_VISITS, NEARBY_DISTANCE_KM,
    NEARBY_REWARD, POI_VISIT_REWARD, RewardEntry, RewardOutcome, RewardReason, RuleContext,
    TAG_MATCH_REWARD, Transition, TripConfig, TripSimulator, TripState, VIOLATION_PENALTY,
    Violation,
};
