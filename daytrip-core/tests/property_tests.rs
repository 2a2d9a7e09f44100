#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Property-based tests for distances and planned itineraries.
//!
//! # Invariants tested
//!
//! - **Symmetry and zero diagonal:** distances are symmetric and a POI is
//!   zero kilometres from itself.
//! - **No duplicates:** a POI appears at most once in an accepted day.
//! - **Terminal accommodation:** every accepted day ends at an accommodation.
//! - **Category diversity:** adjacent stops never share a category.
//! - **Restaurant cap:** at most three restaurants are visited after the start.
//! - **Quality floor:** an accepted day's reward reaches the threshold.
//! - **Determinism:** equal seeds give equal itineraries.

use std::collections::HashSet;

use daytrip_core::distance::{format_clock, haversine_km};
use daytrip_core::test_support::{synthetic_catalog, synthetic_table};
use daytrip_core::{
    Catalog, Category, DayPlan, DistanceMatrix, ItineraryPlanner, MAX_RESTAURANT_VISITS,
    PlanError, PlanRequest, Planner, PlannerConfig, TagSet,
};
use geo::Coord;
use proptest::prelude::*;

const THRESHOLD: i32 = 30;

fn categories(catalog: &Catalog, day: &DayPlan) -> Vec<Category> {
    day.route
        .iter()
        .map(|&id| {
            let index = catalog.index_of(id).expect("route ids come from the catalog");
            catalog.category(index).expect("index is in range")
        })
        .collect()
}

#[expect(
    clippy::float_arithmetic,
    reason = "symmetry is checked within a floating-point tolerance"
)]
fn nearly_equal(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() < 1e-9
}

fn coord_strategy() -> impl Strategy<Value = Coord<f64>> {
    (-180.0_f64..180.0, -85.0_f64..85.0).prop_map(|(x, y)| Coord { x, y })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Haversine distance is symmetric, non-negative and zero on equal points.
    #[test]
    fn haversine_is_symmetric(a in coord_strategy(), b in coord_strategy()) {
        let forward = haversine_km(a, b);
        prop_assert!(forward >= 0.0);
        prop_assert!(nearly_equal(forward, haversine_km(b, a)));
        prop_assert_eq!(haversine_km(a, a), 0.0);
    }

    /// Matrices built from a catalog are symmetric with a zero diagonal.
    #[test]
    fn catalog_matrix_is_symmetric(size in 2_usize..20, seed in any::<u64>()) {
        let catalog = synthetic_catalog(size, seed).expect("catalog");
        let matrix = DistanceMatrix::from_catalog(&catalog);
        for from in 0..size {
            prop_assert_eq!(matrix.distance_km(from, from), 0.0);
            for to in 0..size {
                prop_assert_eq!(
                    matrix.distance_km(from, to).to_bits(),
                    matrix.distance_km(to, from).to_bits()
                );
            }
        }
    }

    /// Whole minutes format as zero-padded hours and minutes.
    #[test]
    fn clock_formatting_is_exact_for_whole_minutes(minutes in 0_u32..3000) {
        let text = format_clock(f64::from(minutes));
        let (hours, mins) = text.split_once(':').expect("separator");
        prop_assert_eq!(mins.len(), 2);
        prop_assert!(hours.len() >= 2);
        let parsed_hours: u32 = hours.parse().expect("hours");
        let parsed_minutes: u32 = mins.parse().expect("minutes");
        prop_assert_eq!(parsed_hours * 60 + parsed_minutes, minutes);
    }

    /// Accepted days satisfy every structural invariant.
    #[test]
    fn accepted_days_respect_invariants(
        size in 4_usize..24,
        catalog_seed in any::<u64>(),
        table_seed in any::<u64>(),
        seed in any::<u64>(),
        days in 1_u32..4,
        tags in proptest::collection::btree_set(1_u32..=6, 0..3),
    ) {
        let catalog = synthetic_catalog(size, catalog_seed).expect("catalog");
        let distances = DistanceMatrix::from_catalog(&catalog);
        let table = synthetic_table(size, table_seed).expect("table");
        let config = PlannerConfig {
            acceptance_threshold: THRESHOLD,
            max_attempts: 50,
            ..PlannerConfig::default()
        };
        let planner = ItineraryPlanner::new(&catalog, &distances, &table, config)
            .expect("planner");
        let request = PlanRequest::new(days, tags.into_iter().collect::<TagSet>()).with_seed(seed);

        let itinerary = match planner.plan(&request) {
            Ok(itinerary) => itinerary,
            Err(err) => {
                prop_assert!(matches!(err, PlanError::ItineraryUnattainable { .. }), "{err}");
                return Ok(());
            }
        };

        prop_assert_eq!(u32::try_from(itinerary.days.len()).ok(), Some(days));
        for (day, plan) in &itinerary.days {
            let unique: HashSet<_> = plan.route.iter().collect();
            prop_assert_eq!(unique.len(), plan.route.len(), "day {} repeats a stop", day);

            let visited = categories(&catalog, plan);
            prop_assert!(visited.last().is_some_and(|category| category.is_accommodation()));
            prop_assert!(visited.windows(2).all(|pair| pair.first() != pair.last()));

            let restaurants = visited
                .iter()
                .skip(1)
                .filter(|&&category| category == Category::Restaurant)
                .count();
            prop_assert!(u32::try_from(restaurants).is_ok_and(|count| count <= MAX_RESTAURANT_VISITS));

            prop_assert_eq!(plan.detail.len(), plan.route.len());
            prop_assert!(plan.detail.last().is_some_and(|stop| stop.departure_time.is_none()));

            let reward = itinerary.diagnostics.days.get(day).map(|stats| stats.reward);
            prop_assert!(reward.is_some_and(|reward| reward >= THRESHOLD));
        }
    }

    /// Equal seeds give equal itineraries.
    #[test]
    fn planning_is_deterministic(size in 4_usize..16, seed in any::<u64>()) {
        let catalog = synthetic_catalog(size, seed).expect("catalog");
        let distances = DistanceMatrix::from_catalog(&catalog);
        let table = synthetic_table(size, seed).expect("table");
        let config = PlannerConfig {
            acceptance_threshold: i32::MIN,
            ..PlannerConfig::default()
        };
        let planner = ItineraryPlanner::new(&catalog, &distances, &table, config)
            .expect("planner");
        let request = PlanRequest::new(2, TagSet::from([1, 2])).with_seed(seed);

        let first = planner.plan(&request).expect("first plan");
        let second = planner.plan(&request).expect("second plan");
        prop_assert_eq!(first.days, second.days);
    }
}
