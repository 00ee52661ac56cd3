//! Market value example: loading bundled data and ranking producers.
//!
//! Loads the vanilla scenario shipped with `greenhouse-data` and prints, for
//! every sellable resource, its producers ranked by market value per hour.
//!
//! Run with: `cargo run -p greenhouse-examples --example market_rankings`

use std::path::Path;

use greenhouse_core::value::value_rankings;
use greenhouse_data::{list_scenarios, load_scenario};

fn main() {
    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("greenhouse-data")
        .join("data");

    println!("Available scenarios:");
    let locations = list_scenarios(&data_dir).expect("data dir is readable");
    for location in &locations {
        println!("  {} v{}", location.scenario, location.version);
    }
    println!();

    let scenario =
        load_scenario(&data_dir.join("vanilla").join("1.0")).expect("vanilla data loads");
    println!("=== {} v{}: value per hour ===\n", scenario.name(), scenario.version());

    for (resource_id, rankings) in value_rankings(&scenario) {
        let resource = scenario.resource(resource_id).expect("ranked resource exists");
        println!("{}:", resource.name());
        for (producer_id, value_per_hour) in rankings {
            let producer = scenario.producer(producer_id).expect("ranked producer exists");
            println!("  {:>8.1}/hr  {}", value_per_hour, producer.name());
        }
    }
}
