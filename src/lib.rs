//! Facade crate for the daytrip itinerary engine.
//!
//! This crate re-exports the core domain types and the greedy itinerary
//! planner. Serde support for the public types is enabled by the default
//! `serde` feature.

#![forbid(unsafe_code)]

pub use daytrip_core::{
    Catalog, CatalogError, Category, ConfigError, DayDiagnostics, DayPlan, DecisionTable,
    Diagnostics, DistanceMatrix, Itinerary, ItineraryPlanner, PlanError, PlanRequest,
    PlanRequestError, Planner, PlannerConfig, PointOfInterest, StopDetail, TagSet, TripConfig,
    TripSimulator, TripState,
};
