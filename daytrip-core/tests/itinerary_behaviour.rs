#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for multi-day itinerary planning.

use std::cell::RefCell;

use daytrip_core::test_support::{preference_table, scenario_catalog, uniform_distances};
use daytrip_core::{
    Catalog, DecisionTable, DistanceMatrix, Itinerary, ItineraryPlanner, PlanError, PlanRequest,
    Planner, PlannerConfig, TagSet,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const SIGHT_ID: u64 = 1;

/// Planner inputs and the planning result for one scenario.
pub struct ItineraryWorld {
    catalog: RefCell<Option<Catalog>>,
    distances: RefCell<Option<DistanceMatrix>>,
    table: RefCell<Option<DecisionTable>>,
    selected_tags: RefCell<TagSet>,
    config: RefCell<PlannerConfig>,
    result: RefCell<Option<Result<Itinerary, PlanError>>>,
}

#[fixture]
/// Empty world; steps supply the inputs.
pub fn world() -> ItineraryWorld {
    ItineraryWorld {
        catalog: RefCell::new(None),
        distances: RefCell::new(None),
        table: RefCell::new(None),
        selected_tags: RefCell::new(TagSet::new()),
        config: RefCell::new(PlannerConfig::default()),
        result: RefCell::new(None),
    }
}

#[given("a sight, a tagged restaurant and an accommodation one kilometre apart")]
fn three_poi_catalog(world: &ItineraryWorld) {
    *world.catalog.borrow_mut() = Some(scenario_catalog().expect("scenario catalog"));
    *world.distances.borrow_mut() = Some(uniform_distances(3, 1.0).expect("uniform distances"));
}

#[given("a decision table preferring the restaurant then the accommodation")]
fn preferring_table(world: &ItineraryWorld) {
    *world.table.borrow_mut() =
        Some(preference_table(3, &[(0, 1), (1, 2)]).expect("preference table"));
}

#[given("the visitor selects tag 5")]
fn selects_matching_tag(world: &ItineraryWorld) {
    *world.selected_tags.borrow_mut() = TagSet::from([5]);
}

#[given("the visitor selects tag 9")]
fn selects_unmatched_tag(world: &ItineraryWorld) {
    *world.selected_tags.borrow_mut() = TagSet::from([9]);
}

#[given("an acceptance threshold of 50")]
fn threshold_fifty(world: &ItineraryWorld) {
    world.config.borrow_mut().acceptance_threshold = 50;
}

#[given("an acceptance threshold of 20")]
fn threshold_twenty(world: &ItineraryWorld) {
    world.config.borrow_mut().acceptance_threshold = 20;
}

#[given("the default acceptance threshold")]
fn default_threshold(world: &ItineraryWorld) {
    *world.config.borrow_mut() = PlannerConfig::default();
}

#[when("one day is planned from the sight")]
fn plan_one_day(world: &ItineraryWorld) {
    let catalog = world.catalog.borrow();
    let distances = world.distances.borrow();
    let table = world.table.borrow();
    let planner = ItineraryPlanner::new(
        catalog.as_ref().expect("catalog"),
        distances.as_ref().expect("distances"),
        table.as_ref().expect("decision table"),
        world.config.borrow().clone(),
    )
    .expect("planner");
    let request =
        PlanRequest::new(1, world.selected_tags.borrow().clone()).with_start_poi(SIGHT_ID);
    *world.result.borrow_mut() = Some(planner.plan(&request));
}

fn with_itinerary<T>(world: &ItineraryWorld, check: impl FnOnce(&Itinerary) -> T) -> T {
    let result = world.result.borrow();
    let itinerary = result
        .as_ref()
        .expect("planning must have run")
        .as_ref()
        .expect("planning should succeed");
    check(itinerary)
}

#[then("the route visits the sight, the restaurant and the accommodation")]
fn route_is_complete(world: &ItineraryWorld) {
    let route = with_itinerary(world, |itinerary| {
        itinerary.day(1).map(|day| day.route.clone())
    });
    assert_eq!(route, Some(vec![1, 2, 3]));
}

#[then("the accommodation stop has no departure time")]
fn final_stop_has_no_departure(world: &ItineraryWorld) {
    with_itinerary(world, |itinerary| {
        let day = itinerary.day(1).expect("day one");
        let last = day.detail.last().expect("at least one stop");
        assert_eq!(last.poi_id, 3);
        assert!(last.departure_time.is_none());
        assert!(
            day.detail
                .iter()
                .take(day.detail.len() - 1)
                .all(|stop| stop.departure_time.is_some())
        );
    });
}

#[then("the day earns 55")]
fn earns_with_tag(world: &ItineraryWorld) {
    assert_eq!(day_reward(world), Some(55));
}

#[then("the day earns 25")]
fn earns_without_tag(world: &ItineraryWorld) {
    assert_eq!(day_reward(world), Some(25));
}

fn day_reward(world: &ItineraryWorld) -> Option<i32> {
    with_itinerary(world, |itinerary| {
        itinerary.diagnostics.days.get(&1).map(|stats| stats.reward)
    })
}

#[then("tag 5 scores 20")]
fn matching_tag_scores(world: &ItineraryWorld) {
    assert_eq!(tag_score(world, 5), Some(20));
}

#[then("tag 9 scores 0")]
fn unmatched_tag_scores(world: &ItineraryWorld) {
    assert_eq!(tag_score(world, 9), Some(0));
}

fn tag_score(world: &ItineraryWorld, tag: u32) -> Option<u32> {
    with_itinerary(world, |itinerary| {
        itinerary
            .day(1)
            .and_then(|day| day.tag_scores.get(&tag).copied())
    })
}

#[then("planning fails as unattainable with best reward 55")]
fn planning_is_unattainable(world: &ItineraryWorld) {
    let result = world.result.borrow();
    let err = result
        .as_ref()
        .expect("planning must have run")
        .as_ref()
        .expect_err("threshold should be unreachable");
    assert!(matches!(
        err,
        PlanError::ItineraryUnattainable {
            day: 1,
            best_reward: 55,
            ..
        }
    ));
}

#[scenario(path = "tests/features/itinerary.feature", index = 0)]
fn matching_tag_earns_bonus(world: ItineraryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/itinerary.feature", index = 1)]
fn unmatched_tag_loses_bonus(world: ItineraryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/itinerary.feature", index = 2)]
fn unreachable_threshold_is_reported(world: ItineraryWorld) {
    let _ = world;
}
