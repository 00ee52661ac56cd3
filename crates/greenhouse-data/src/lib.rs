//! Greenhouse Data -- on-disk scenario definitions for `greenhouse-core`.
//!
//! Scenarios live under a data root as `<scenario>/<version>/` directories,
//! each holding a `scenario` metadata file plus optional `resources`,
//! `producers`, and `items` entity maps in RON, JSON, or TOML. This crate
//! discovers those directories, parses and validates the records, and hands
//! back fully resolved [`greenhouse_core::model::Scenario`] values.

pub mod discover;
pub mod loader;
pub mod schema;

pub use discover::{list_scenarios, ScenarioLocation};
pub use loader::{load_scenario, DataLoadError};
