//! Harvest planning example: registration, resolution, and planning.
//!
//! Builds a small vanilla farming scenario in code, asks for four pumpkin
//! pies plus a floor of spare pumpkins, and prints the producer plan.
//!
//! Run with: `cargo run -p greenhouse-examples --example plan_harvest`

use std::collections::BTreeMap;

use greenhouse_core::model::{
    CompositeItem, Producer, Resource, ScenarioBuilder, ScenarioKind,
};
use greenhouse_core::plan::{plan, PlanRequest};

fn main() {
    let mut builder = ScenarioBuilder::new("Vanilla", "1.0", ScenarioKind::Vanilla);

    // --- Register resources ---

    builder.add_resource(Resource::new("Pumpkin", Some(10)).expect("valid resource"));
    builder.add_resource(Resource::new("Wheat", Some(4)).expect("valid resource"));

    // --- Register producers ---

    // Two ways to grow pumpkins: a fast small sprout and a slow large vine.
    builder.add_producer(
        Producer::new("Pumpkin Sprout", "Pumpkin", 30, 10, None).expect("valid producer"),
    );
    builder.add_producer(
        Producer::new("Pumpkin Vine", "Pumpkin", 60, 50, None).expect("valid producer"),
    );
    builder.add_producer(
        Producer::new("Wheat Sprout", "Wheat", 90, 30, None).expect("valid producer"),
    );

    // --- Register composite items ---

    builder.add_item(
        CompositeItem::new(
            "Pumpkin Pie",
            120,
            BTreeMap::from([("Pumpkin".to_string(), 3), ("Wheat".to_string(), 2)]),
        )
        .expect("valid item"),
    );

    // build() resolves the graph: name references become ids and per-hour
    // rates are derived from the cycle fields.
    let scenario = builder.build();
    println!(
        "Scenario '{}' v{}: {} producers, {} resources, {} items.\n",
        scenario.name(),
        scenario.version(),
        scenario.producer_count(),
        scenario.resource_count(),
        scenario.item_count()
    );

    for (_, producer) in scenario.producers() {
        println!(
            "  {} -> {:.1}/hr",
            producer.name(),
            producer.yield_per_hour().unwrap_or(0.0)
        );
    }
    println!();

    // --- Plan a harvest ---

    // Four pies (12 pumpkins, 8 wheat) plus at least 20 loose pumpkins,
    // harvested every 60 minutes.
    let pie_id = scenario.item_id("Pumpkin Pie").expect("pie registered");
    let pumpkin_id = scenario.resource_id("Pumpkin").expect("pumpkin registered");
    let request = PlanRequest::new(60)
        .request_item(pie_id, 4)
        .request_resource(pumpkin_id, 20);

    let result = plan(&scenario, &request).expect("plan succeeds");
    println!("=== Plan (harvest every 60 minutes) ===\n");
    println!("{}", result.report(&scenario));
}
