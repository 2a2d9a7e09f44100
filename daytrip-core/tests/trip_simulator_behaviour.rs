#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for the trip simulator's terminal rules.

use std::cell::RefCell;

use daytrip_core::test_support::{scenario_catalog, uniform_distances};
use daytrip_core::{
    Catalog, DistanceMatrix, RewardReason, TagSet, Transition, TripConfig, TripSimulator,
    TripState,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const SIGHT: usize = 0;
const RESTAURANT: usize = 1;
const ACCOMMODATION: usize = 2;

/// Inputs and the most recent transition for one scenario.
pub struct SimulatorWorld {
    catalog: Catalog,
    distances: DistanceMatrix,
    config: RefCell<TripConfig>,
    state: RefCell<Option<TripState>>,
    transition: RefCell<Option<Transition>>,
}

#[fixture]
/// Three POIs one kilometre apart with the default day window.
pub fn world() -> SimulatorWorld {
    SimulatorWorld {
        catalog: scenario_catalog().expect("scenario catalog"),
        distances: uniform_distances(3, 1.0).expect("uniform distances"),
        config: RefCell::new(TripConfig::default()),
        state: RefCell::new(None),
        transition: RefCell::new(None),
    }
}

fn simulator(world: &SimulatorWorld) -> TripSimulator<'_> {
    TripSimulator::new(&world.catalog, &world.distances, world.config.borrow().clone())
        .expect("simulator")
}

fn apply(world: &SimulatorWorld, action: usize) -> Transition {
    let state = world.state.borrow_mut().take().expect("day must be started");
    simulator(world).step(state, action)
}

fn first_reason(world: &SimulatorWorld) -> Option<RewardReason> {
    world
        .transition
        .borrow()
        .as_ref()
        .and_then(|transition| transition.outcome.reasons().next())
}

#[given("a day that closes at 12:30")]
fn day_closes_early(world: &SimulatorWorld) {
    world.config.borrow_mut().end_time = 12 * 60 + 30;
}

#[given("a day started at the sight")]
fn start_at_sight(world: &SimulatorWorld) {
    let state = simulator(world)
        .reset_at(SIGHT, TagSet::new())
        .expect("sight is a valid start");
    *world.state.borrow_mut() = Some(state);
}

#[given("the restaurant has been visited")]
fn restaurant_visited(world: &SimulatorWorld) {
    let transition = apply(world, RESTAURANT);
    assert!(!transition.outcome.is_done());
    *world.state.borrow_mut() = Some(transition.state);
}

#[when("the sight is chosen again")]
fn choose_sight(world: &SimulatorWorld) {
    *world.transition.borrow_mut() = Some(apply(world, SIGHT));
}

#[when("the accommodation is chosen")]
fn choose_accommodation(world: &SimulatorWorld) {
    *world.transition.borrow_mut() = Some(apply(world, ACCOMMODATION));
}

#[when("the restaurant is chosen")]
fn choose_restaurant(world: &SimulatorWorld) {
    *world.transition.borrow_mut() = Some(apply(world, RESTAURANT));
}

#[then("the day is done")]
fn day_is_done(world: &SimulatorWorld) {
    let transition = world.transition.borrow();
    let outcome = &transition.as_ref().expect("a step was taken").outcome;
    assert!(outcome.is_done());
}

#[then("the day ends because the stop was already visited")]
fn ends_on_repeat(world: &SimulatorWorld) {
    assert_eq!(first_reason(world), Some(RewardReason::AlreadyVisited));
    let transition = world.transition.borrow();
    let outcome = &transition.as_ref().expect("a step was taken").outcome;
    assert!(outcome.to_string().contains("already visited"));
}

#[then("the day ends because the accommodation was too early")]
fn ends_on_early_accommodation(world: &SimulatorWorld) {
    assert_eq!(first_reason(world), Some(RewardReason::AccommodationTooEarly));
}

#[then("the day ends because time ran out")]
fn ends_on_time_out(world: &SimulatorWorld) {
    assert_eq!(first_reason(world), Some(RewardReason::TimeOut));
}

#[then("the step reward is 0")]
fn step_reward_is_zero(world: &SimulatorWorld) {
    let transition = world.transition.borrow();
    let outcome = &transition.as_ref().expect("a step was taken").outcome;
    assert_eq!(outcome.reward(), 0);
}

#[then("the day ends at the accommodation")]
fn ends_at_accommodation(world: &SimulatorWorld) {
    let transition = world.transition.borrow();
    let state = &transition.as_ref().expect("a step was taken").state;
    assert_eq!(state.visited().last(), Some(&ACCOMMODATION));
    assert!(outcome_has_final_leg(transition.as_ref()));
}

fn outcome_has_final_leg(transition: Option<&Transition>) -> bool {
    transition.is_some_and(|step| step.outcome.has_reason(RewardReason::FinalAccommodation))
}

#[scenario(path = "tests/features/trip_simulator.feature", index = 0)]
fn revisiting_a_stop_ends_the_day(world: SimulatorWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/trip_simulator.feature", index = 1)]
fn early_accommodation_is_penalised(world: SimulatorWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/trip_simulator.feature", index = 2)]
fn overrunning_visit_times_out(world: SimulatorWorld) {
    let _ = world;
}
