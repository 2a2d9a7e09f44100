//! Reward bookkeeping for a single simulator step.

use std::fmt;

/// Penalty applied by every terminal rule violation.
pub const VIOLATION_PENALTY: i32 = -10;
/// Base reward for committing a visit.
pub const POI_VISIT_REWARD: i32 = 10;
/// Bonus when the visited POI carries a selected tag.
pub const TAG_MATCH_REWARD: i32 = 30;
/// Bonus when the leg is shorter than [`NEARBY_DISTANCE_KM`].
pub const NEARBY_REWARD: i32 = 10;
/// Bonus when the leg is quicker than [`EFFICIENT_TRAVEL_MINUTES`].
pub const EFFICIENT_TRAVEL_REWARD: i32 = 5;
/// Penalty when the leg takes longer than [`LONG_TRAVEL_MINUTES`].
pub const LONG_TRAVEL_PENALTY: i32 = -15;
/// Reward for the closing accommodation leg.
pub const FINAL_ACCOMMODATION_REWARD: i32 = 10;

/// Legs shorter than this many kilometres count as nearby.
pub const NEARBY_DISTANCE_KM: f64 = 5.0;
/// Legs quicker than this many minutes count as efficient.
pub const EFFICIENT_TRAVEL_MINUTES: f64 = 10.0;
/// Legs longer than this many minutes are penalised.
pub const LONG_TRAVEL_MINUTES: f64 = 60.0;

/// Why a reward delta was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RewardReason {
    /// An accommodation was chosen before the closing window.
    AccommodationTooEarly,
    /// The action was visited before or lies outside the catalog.
    AlreadyVisited,
    /// The daily restaurant cap was reached.
    RestaurantLimit,
    /// The action repeats the previous stop's category.
    ConsecutiveCategory,
    /// The visit would finish after the end of the day.
    TimeOut,
    /// A visit was committed.
    PoiVisit,
    /// The visited POI carries a selected tag.
    TagMatch,
    /// The leg was short.
    NearbyPoi,
    /// The leg was quick.
    EfficientTravel,
    /// The leg was slow.
    LongTravel,
    /// The day was closed at the nearest accommodation.
    FinalAccommodation,
}

impl RewardReason {
    /// Human-readable label for traces and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccommodationTooEarly => "accommodation selected too early",
            Self::AlreadyVisited => "already visited or invalid action",
            Self::RestaurantLimit => "too many restaurants visited",
            Self::ConsecutiveCategory => "consecutive same category POI",
            Self::TimeOut => "time out",
            Self::PoiVisit => "POI Visit",
            Self::TagMatch => "Tag Match",
            Self::NearbyPoi => "Nearby POI",
            Self::EfficientTravel => "Efficient Travel",
            Self::LongTravel => "Long Travel Penalty",
            Self::FinalAccommodation => "Final Accommodation Visit",
        }
    }
}

impl fmt::Display for RewardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reward delta and the reason it was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardEntry {
    /// Why the delta applies.
    pub reason: RewardReason,
    /// Signed reward contribution.
    pub delta: i32,
}

/// Ordered reward entries produced by one step, plus the termination flag.
///
/// # Examples
/// ```
/// use daytrip_core::{RewardOutcome, RewardReason};
///
/// let mut outcome = RewardOutcome::terminal(RewardReason::AlreadyVisited, -10);
/// outcome.push(RewardReason::FinalAccommodation, 10);
/// assert!(outcome.is_done());
/// assert_eq!(outcome.reward(), 0);
/// assert_eq!(outcome.to_string(), "already visited or invalid action, Final Accommodation Visit");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardOutcome {
    entries: Vec<RewardEntry>,
    done: bool,
}

impl RewardOutcome {
    /// An outcome that lets the day continue.
    #[must_use]
    pub const fn ongoing() -> Self {
        Self {
            entries: Vec::new(),
            done: false,
        }
    }

    /// An outcome that ends the day with a single entry.
    #[must_use]
    pub fn terminal(reason: RewardReason, delta: i32) -> Self {
        Self {
            entries: vec![RewardEntry { reason, delta }],
            done: true,
        }
    }

    /// Append an entry.
    pub fn push(&mut self, reason: RewardReason, delta: i32) {
        self.entries.push(RewardEntry { reason, delta });
    }

    /// Mark the outcome as ending the day.
    pub const fn finish(&mut self) {
        self.done = true;
    }

    /// Whether the day ends with this step.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Net reward of the step.
    #[must_use]
    pub fn reward(&self) -> i32 {
        self.entries.iter().map(|entry| entry.delta).sum()
    }

    /// Entries in the order they were applied.
    #[must_use]
    pub fn entries(&self) -> &[RewardEntry] {
        &self.entries
    }

    /// Reasons in the order they were applied.
    pub fn reasons(&self) -> impl Iterator<Item = RewardReason> + '_ {
        self.entries.iter().map(|entry| entry.reason)
    }

    /// Whether `reason` contributed to the step.
    #[must_use]
    pub fn has_reason(&self, reason: RewardReason) -> bool {
        self.reasons().any(|applied| applied == reason)
    }
}

impl fmt::Display for RewardOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            f.write_str(entry.reason.as_str())?;
        }
        Ok(())
    }
}
