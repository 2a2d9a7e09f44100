//! Accepted days and the itinerary that collects them.

use std::collections::BTreeMap;
use std::time::Duration;

/// Points added to a selected tag for each accepted stop that carries it.
pub const TAG_SCORE_PER_STOP: u32 = 20;

/// Timing for one stop of an accepted day.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopDetail {
    /// Catalog identifier of the stop.
    pub poi_id: u64,
    /// Display name of the stop.
    pub poi_name: String,
    /// Arrival as `HH:MM`.
    pub arrival_time: String,
    /// Departure as `HH:MM`; absent for the closing accommodation.
    pub departure_time: Option<String>,
}

/// One accepted day.
///
/// Serialises with the camel-case keys `route`, `formattedTimes`, `detail`
/// and `tagScores`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DayPlan {
    /// POI identifiers in visiting order.
    pub route: Vec<u64>,
    /// Departure from the start, then arrival/departure pairs, ending with the
    /// arrival at the accommodation.
    pub formatted_times: Vec<String>,
    /// Per-stop timing records, one per route entry.
    pub detail: Vec<StopDetail>,
    /// Running tag scores up to and including this day.
    pub tag_scores: BTreeMap<u32, u32>,
}

impl DayPlan {
    /// Identifier of the final stop.
    #[must_use]
    pub fn last_stop(&self) -> Option<u64> {
        self.route.last().copied()
    }
}

/// How a single day was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayDiagnostics {
    /// Rollouts tried, including the accepted one.
    pub attempts: u32,
    /// Summed reward of the accepted rollout.
    pub reward: i32,
}

/// Planning statistics kept alongside the itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagnostics {
    /// Wall-clock time spent planning.
    pub plan_time: Duration,
    /// Per-day statistics keyed by day number.
    pub days: BTreeMap<u32, DayDiagnostics>,
}

impl Diagnostics {
    /// Rollouts tried across every day.
    #[must_use]
    pub fn total_attempts(&self) -> u32 {
        self.days
            .values()
            .fold(0_u32, |total, day| total.saturating_add(day.attempts))
    }
}

/// Accepted days keyed by day number, starting at `1`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Itinerary {
    /// Day plans keyed by one-based day number.
    pub days: BTreeMap<u32, DayPlan>,
    /// Statistics about how the days were found.
    pub diagnostics: Diagnostics,
}

impl Itinerary {
    /// Plan for `day`, counted from `1`.
    #[must_use]
    pub fn day(&self, day: u32) -> Option<&DayPlan> {
        self.days.get(&day)
    }

    /// Tag totals after the final day.
    #[must_use]
    pub fn tag_scores(&self) -> BTreeMap<u32, u32> {
        self.days
            .values()
            .next_back()
            .map(|plan| plan.tag_scores.clone())
            .unwrap_or_default()
    }
}
