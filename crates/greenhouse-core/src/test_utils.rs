//! Shared test fixtures.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so the same
//! scenarios are available to unit tests, integration tests, and dependent
//! crates' tests (via the `test-utils` feature).

use std::collections::BTreeMap;

use crate::model::{CompositeItem, Producer, Resource, Scenario, ScenarioBuilder, ScenarioKind};

/// A small resolved scenario with valued resources and one food item:
///
/// - `Pumpkin` (market value 10): `Pumpkin Sprout` (30 min, 10/cycle, 20/hr)
///   and `Pumpkin Vine` (60 min, 50/cycle, 50/hr)
/// - `Berry` (market value 4): `Berry Bush` (45 min, 6/cycle, 8/hr)
/// - `Pumpkin Pie` (market value 120): 3 Pumpkin + 2 Berry
pub fn orchard_scenario() -> Scenario {
    let mut builder = ScenarioBuilder::new("Orchard", "1.0", ScenarioKind::Vanilla);

    builder.add_resource(Resource::new("Pumpkin", Some(10)).expect("valid resource"));
    builder.add_resource(Resource::new("Berry", Some(4)).expect("valid resource"));

    builder.add_producer(
        Producer::new("Pumpkin Sprout", "Pumpkin", 30, 10, None).expect("valid producer"),
    );
    builder.add_producer(
        Producer::new("Pumpkin Vine", "Pumpkin", 60, 50, None).expect("valid producer"),
    );
    builder
        .add_producer(Producer::new("Berry Bush", "Berry", 45, 6, None).expect("valid producer"));

    builder.add_item(
        CompositeItem::new(
            "Pumpkin Pie",
            120,
            BTreeMap::from([("Pumpkin".to_string(), 3), ("Berry".to_string(), 2)]),
        )
        .expect("valid item"),
    );

    builder.build()
}
