//! Greenhouse Core -- farming production planning for survival-game
//! scenarios.
//!
//! A scenario is three registries of independently-authored records: plants
//! ([`model::Producer`]) that grow a harvest product, the harvest products
//! themselves ([`model::Resource`]), and food items built from them
//! ([`model::CompositeItem`]). This crate wires those records into a
//! bidirectional reference graph, derives per-hour yield and market rates,
//! and turns a requested output into an integer producer plan.
//!
//! # Pipeline
//!
//! 1. Construct validated records and register them on a
//!    [`model::ScenarioBuilder`].
//! 2. `build()` resolves the graph once: missing resources are synthesized,
//!    name references become ids, and every derived map is populated. The
//!    result is a frozen [`model::Scenario`] -- no `&mut self` methods, safe
//!    to share across planning calls.
//! 3. [`plan::plan`] propagates requested item counts down to resource
//!    demand, picks one producer type per resource under the harvest
//!    interval constraint, and rounds unit counts up, reporting the
//!    over-production that rounding causes.
//!
//! # Key types
//!
//! - [`model::ScenarioBuilder`] / [`model::Scenario`] -- registration and
//!   the frozen, resolved graph.
//! - [`plan::PlanRequest`] / [`plan::Plan`] -- planner input and output.
//! - [`value::value_rankings`] -- producers ranked by market value per hour.

pub mod id;
pub mod model;
pub mod plan;
pub mod rate;
mod resolve;
pub mod value;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
