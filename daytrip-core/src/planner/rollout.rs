//! A single greedy walk through the simulator.
//!
//! The walk charges the start stay, then repeatedly takes the decision
//! table's best action until the simulator reports the day done. When the
//! clock runs out before that, the day is closed with
//! [`TripSimulator::finish`].
#![expect(
    clippy::float_arithmetic,
    reason = "stop timings are derived from the simulator clock"
)]

use std::collections::BTreeMap;

use log::{Level, debug, log_enabled};

use crate::distance::format_clock;
use crate::{
    Catalog, DecisionTable, PointOfInterest, RewardReason, Transition, TripSimulator, TripState,
};

use super::itinerary::{DayPlan, StopDetail};

/// Result of one walk, before acceptance.
#[derive(Debug, Clone)]
pub(super) struct Rollout {
    /// Route, timings and details; tag scores are left empty.
    pub(super) plan: DayPlan,
    /// Summed step rewards.
    pub(super) reward: i32,
}

/// Walk `state` forward until the day ends.
pub(super) fn walk(
    simulator: &TripSimulator<'_>,
    table: &DecisionTable,
    mut state: TripState,
) -> Rollout {
    let catalog = simulator.catalog();
    let end_time = f64::from(simulator.config().end_time);
    let mut stops = StopLog::default();

    let start = state.current_location();
    let arrival = state.current_time();
    let stay = catalog.get(start).map_or(0, PointOfInterest::visit_minutes);
    state.linger(f64::from(stay));
    stops.record_start(catalog, start, arrival, state.current_time());

    let mut reward = 0_i32;
    loop {
        let known = state.visited().len();
        let best = table.best_action(state.current_location());
        let Transition {
            state: next,
            outcome,
        } = match best {
            Some(action) if state.current_time() < end_time => simulator.step(state, action),
            _ => simulator.finish(state),
        };
        state = next;
        reward = reward.saturating_add(outcome.reward());
        stops.record_moves(
            catalog,
            &state,
            known,
            outcome.has_reason(RewardReason::PoiVisit),
        );

        if log_enabled!(Level::Debug) {
            debug!(
                "{} reward {} [{}] route {}",
                format_clock(state.current_time()),
                outcome.reward(),
                outcome,
                route_names(catalog, &state),
            );
        }
        if outcome.is_done() {
            break;
        }
    }

    Rollout {
        plan: stops.into_plan(),
        reward,
    }
}

fn route_names(catalog: &Catalog, state: &TripState) -> String {
    state
        .visited()
        .iter()
        .filter_map(|&index| catalog.get(index))
        .map(|poi| poi.name.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[derive(Debug, Default)]
struct StopLog {
    route: Vec<u64>,
    formatted_times: Vec<String>,
    detail: Vec<StopDetail>,
}

impl StopLog {
    fn record_start(&mut self, catalog: &Catalog, start: usize, arrival: f64, departure: f64) {
        let Some(poi) = catalog.get(start) else {
            return;
        };
        let leaves_at = format_clock(departure);
        self.route.push(poi.id);
        self.formatted_times.push(leaves_at.clone());
        self.detail.push(StopDetail {
            poi_id: poi.id,
            poi_name: poi.name.clone(),
            arrival_time: format_clock(arrival),
            departure_time: Some(leaves_at),
        });
    }

    /// Record stops appended to `state` since it held `known` entries.
    ///
    /// A committed visit has already charged its stay, so arrival is the
    /// clock minus the stay. A closing leg charges none.
    fn record_moves(&mut self, catalog: &Catalog, state: &TripState, known: usize, committed: bool) {
        for &index in state.visited().iter().skip(known) {
            let Some(poi) = catalog.get(index) else {
                continue;
            };
            let stay = if committed { poi.visit_minutes() } else { 0 };
            let now = state.current_time();
            let arrival = format_clock(now - f64::from(stay));
            let departure = (!poi.category.is_accommodation()).then(|| format_clock(now));

            self.route.push(poi.id);
            self.formatted_times.push(arrival.clone());
            self.formatted_times.extend(departure.iter().cloned());
            self.detail.push(StopDetail {
                poi_id: poi.id,
                poi_name: poi.name.clone(),
                arrival_time: arrival,
                departure_time: departure,
            });
        }
    }

    fn into_plan(self) -> DayPlan {
        DayPlan {
            route: self.route,
            formatted_times: self.formatted_times,
            detail: self.detail,
            tag_scores: BTreeMap::new(),
        }
    }
}
