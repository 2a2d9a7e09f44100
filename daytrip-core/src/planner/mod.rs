//! Multi-day itinerary planning by greedy rollouts with acceptance-by-retry.
//!
//! Each day is walked greedily from a random start until a rollout's summed
//! reward reaches the acceptance threshold. Failed rollouts are discarded and
//! retried from a fresh start, up to [`PlannerConfig::max_attempts`] times.

mod itinerary;
mod rollout;

use std::collections::BTreeMap;
use std::time::Instant;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    Catalog, ConfigError, DecisionTable, DistanceMatrix, PlanError, PlanRequestError, TagSet,
    TripConfig, TripSimulator,
};

pub use itinerary::{DayDiagnostics, DayPlan, Diagnostics, Itinerary, StopDetail, TAG_SCORE_PER_STOP};

/// Default minimum summed reward for a rollout to be accepted.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: i32 = 90;
/// Default cap on rollouts per day.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Planner settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Daily window and travel model.
    pub trip: TripConfig,
    /// Minimum summed reward for a rollout to become a day.
    pub acceptance_threshold: i32,
    /// Rollouts tried per day before giving up.
    pub max_attempts: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            trip: TripConfig::default(),
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl PlannerConfig {
    /// Check the window and the attempt cap.
    ///
    /// # Errors
    ///
    /// Returns [`PlanRequestError::EmptyTimeWindow`] or
    /// [`PlanRequestError::ZeroAttempts`].
    pub const fn validate(&self) -> Result<(), PlanRequestError> {
        if let Err(err) = self.trip.validate() {
            return Err(err);
        }
        if self.max_attempts == 0 {
            return Err(PlanRequestError::ZeroAttempts);
        }
        Ok(())
    }
}

/// Parameters for one planning run.
///
/// # Examples
/// ```rust
/// use daytrip_core::{PlanRequest, TagSet};
///
/// let request = PlanRequest::new(2, TagSet::from([5])).with_seed(7);
/// assert_eq!(request.days, 2);
/// assert_eq!(request.seed, 7);
/// assert!(request.start_poi.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    /// Number of days to plan.
    pub days: u32,
    /// Tag codes the visitor cares about.
    pub selected_tags: TagSet,
    /// Seed for start selection.
    pub seed: u64,
    /// Identifier of a POI every rollout starts from, instead of a random one.
    pub start_poi: Option<u64>,
}

impl PlanRequest {
    /// Request `days` days for `selected_tags` with seed `0`.
    #[must_use]
    pub const fn new(days: u32, selected_tags: TagSet) -> Self {
        Self {
            days,
            selected_tags,
            seed: 0,
            start_poi: None,
        }
    }

    /// Set the seed while returning `self` for chaining.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Pin the start POI while returning `self` for chaining.
    #[must_use]
    pub const fn with_start_poi(mut self, id: u64) -> Self {
        self.start_poi = Some(id);
        self
    }

    /// Reject requests that plan nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PlanRequestError::ZeroDays`] when `days` is zero.
    pub const fn validate(&self) -> Result<(), PlanRequestError> {
        if self.days == 0 {
            return Err(PlanRequestError::ZeroDays);
        }
        Ok(())
    }
}

/// Produce an itinerary for a request.
///
/// Implementations are `Send + Sync` so one planner can serve concurrent
/// requests over shared read-only inputs.
pub trait Planner: Send + Sync {
    /// Plan every requested day, or report why that is impossible.
    ///
    /// # Errors
    ///
    /// Returns a [`PlanError`] for invalid requests and for days that never
    /// reach the acceptance threshold.
    fn plan(&self, request: &PlanRequest) -> Result<Itinerary, PlanError>;
}

/// Greedy rollout planner over a catalog, distance matrix and decision table.
///
/// # Examples
/// ```rust
/// use daytrip_core::test_support::{preference_table, scenario_catalog, uniform_distances};
/// use daytrip_core::{ItineraryPlanner, PlanRequest, Planner, PlannerConfig, TagSet};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = scenario_catalog()?;
/// let distances = uniform_distances(3, 1.0)?;
/// let table = preference_table(3, &[(0, 1), (1, 2)])?;
/// let config = PlannerConfig {
///     acceptance_threshold: 50,
///     ..PlannerConfig::default()
/// };
/// let planner = ItineraryPlanner::new(&catalog, &distances, &table, config)?;
///
/// let itinerary = planner.plan(&PlanRequest::new(1, TagSet::from([5])).with_start_poi(1))?;
/// let day = itinerary.day(1).ok_or("day one")?;
/// assert_eq!(day.route, vec![1, 2, 3]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ItineraryPlanner<'a> {
    simulator: TripSimulator<'a>,
    table: &'a DecisionTable,
    config: PlannerConfig,
}

impl<'a> ItineraryPlanner<'a> {
    /// Construct a planner after checking the inputs agree in size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DecisionTableMismatch`] or
    /// [`ConfigError::DistanceMatrixMismatch`] when a table does not cover
    /// exactly the catalog.
    pub fn new(
        catalog: &'a Catalog,
        distances: &'a DistanceMatrix,
        table: &'a DecisionTable,
        config: PlannerConfig,
    ) -> Result<Self, ConfigError> {
        if table.size() != catalog.len() {
            return Err(ConfigError::DecisionTableMismatch {
                table: table.size(),
                catalog: catalog.len(),
            });
        }
        let simulator = TripSimulator::new(catalog, distances, config.trip.clone())?;
        Ok(Self {
            simulator,
            table,
            config,
        })
    }

    /// Settings in use.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan with a caller-supplied random source instead of the request seed.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidRequest`] for invalid parameters,
    /// [`PlanError::UnknownStartPoi`] when the pinned start is missing or is
    /// an accommodation, and [`PlanError::ItineraryUnattainable`] when a day
    /// exhausts its attempts.
    pub fn plan_with_rng<R>(&self, request: &PlanRequest, rng: &mut R) -> Result<Itinerary, PlanError>
    where
        R: Rng + ?Sized,
    {
        request.validate()?;
        self.config.validate()?;
        let start = self.pinned_start(request)?;
        let started_at = Instant::now();

        let catalog = self.simulator.catalog();
        let mut tag_scores: BTreeMap<u32, u32> = request
            .selected_tags
            .iter()
            .map(|&tag| (tag, 0))
            .collect();
        let mut itinerary = Itinerary::default();

        for day in 1..=request.days {
            let (mut plan, stats) = self.plan_day(day, request, start, rng)?;
            for poi in plan.route.iter().filter_map(|&id| {
                catalog.index_of(id).and_then(|index| catalog.get(index))
            }) {
                for tag in poi.tags.intersection(&request.selected_tags) {
                    let score = tag_scores.entry(*tag).or_default();
                    *score = score.saturating_add(TAG_SCORE_PER_STOP);
                }
            }
            plan.tag_scores.clone_from(&tag_scores);
            info!(
                "day {day} accepted after {} attempt(s) with reward {} over {} stops",
                stats.attempts,
                stats.reward,
                plan.route.len()
            );
            itinerary.days.insert(day, plan);
            itinerary.diagnostics.days.insert(day, stats);
        }

        itinerary.diagnostics.plan_time = started_at.elapsed();
        Ok(itinerary)
    }

    fn pinned_start(&self, request: &PlanRequest) -> Result<Option<usize>, PlanError> {
        let Some(id) = request.start_poi else {
            return Ok(None);
        };
        let catalog = self.simulator.catalog();
        catalog
            .index_of(id)
            .filter(|&index| {
                catalog
                    .category(index)
                    .is_some_and(|category| !category.is_accommodation())
            })
            .map(Some)
            .ok_or(PlanError::UnknownStartPoi { id })
    }

    fn plan_day<R>(
        &self,
        day: u32,
        request: &PlanRequest,
        start: Option<usize>,
        rng: &mut R,
    ) -> Result<(DayPlan, DayDiagnostics), PlanError>
    where
        R: Rng + ?Sized,
    {
        let mut best_reward = i32::MIN;
        for attempt in 1..=self.config.max_attempts {
            let state = match start {
                Some(index) => self
                    .simulator
                    .reset_at(index, request.selected_tags.clone())
                    .ok_or(PlanError::UnknownStartPoi {
                        id: request.start_poi.unwrap_or_default(),
                    })?,
                None => self.simulator.reset(request.selected_tags.clone(), rng),
            };
            let rollout = rollout::walk(&self.simulator, self.table, state);
            if rollout.reward >= self.config.acceptance_threshold {
                let stats = DayDiagnostics {
                    attempts: attempt,
                    reward: rollout.reward,
                };
                return Ok((rollout.plan, stats));
            }
            debug!(
                "day {day} attempt {attempt} rejected with reward {}",
                rollout.reward
            );
            best_reward = best_reward.max(rollout.reward);
            // A pinned start replays the same rollout every time.
            if start.is_some() {
                return Err(PlanError::ItineraryUnattainable {
                    day,
                    attempts: attempt,
                    best_reward,
                });
            }
        }
        Err(PlanError::ItineraryUnattainable {
            day,
            attempts: self.config.max_attempts,
            best_reward,
        })
    }
}

impl Planner for ItineraryPlanner<'_> {
    fn plan(&self, request: &PlanRequest) -> Result<Itinerary, PlanError> {
        let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
        self.plan_with_rng(request, &mut rng)
    }
}
