//! Graph resolution: wires forward and back references between records that
//! were authored independently.
//!
//! Runs in dependency order — producers, then resources, then items —
//! because resource-side derivation needs the full producer set and item
//! back-references need the full resource set. Synthesis is split into an
//! explicit collect pass and an insert pass so the resource registry is
//! never mutated while being traversed.
//!
//! The pass is idempotent: derived state is cleared and rebuilt from scratch
//! every run, and synthesis only fills genuinely missing names, so resolving
//! an already-resolved scenario changes nothing.

use crate::model::{Resource, Scenario};
use crate::rate;

/// Resolve the cross-reference graph of a scenario in place.
///
/// Infallible: records with malformed names or non-positive cycle fields
/// were already rejected at construction.
pub(crate) fn resolve(scenario: &mut Scenario) {
    // Producers: derive missing per-hour yields, then resolve targets,
    // synthesizing resources that are only referenced by name.
    for producer in &mut scenario.producers {
        if producer.yield_per_hour().is_none() {
            producer.set_yield_per_hour(rate::per_hour(
                producer.yield_per_cycle(),
                producer.cycle_time(),
            ));
        }
    }

    let mut missing: Vec<String> = Vec::new();
    for producer in &scenario.producers {
        if let Some(target) = producer.target_name() {
            if !scenario.resource_ids.contains_key(target)
                && !missing.iter().any(|name| name == target)
            {
                missing.push(target.to_string());
            }
        }
    }
    for name in missing {
        let id = crate::id::ResourceId(scenario.resources.len() as u32);
        scenario.resources.push(Resource::synthesized(&name));
        scenario.resource_ids.insert(name, id);
    }
    for producer in &mut scenario.producers {
        if let Some(target) = producer.target_name() {
            // Present by now: every missing name was just synthesized.
            if let Some(&id) = scenario.resource_ids.get(target) {
                producer.set_target(id);
            }
        }
    }

    // Resources: re-derive all per-producer maps and back-references rather
    // than trusting incremental updates.
    for resource in &mut scenario.resources {
        resource.clear_derived();
    }
    for (index, producer) in scenario.producers.iter().enumerate() {
        let producer_id = crate::id::ProducerId(index as u32);
        let Some(resource_id) = producer.target().resolved() else {
            continue;
        };
        let Some(per_hour) = producer.yield_per_hour() else {
            continue;
        };
        if let Some(resource) = scenario.resources.get_mut(resource_id.0 as usize) {
            resource.link_producer(producer_id, producer, per_hour);
        }
    }

    // Items: restrict ingredient lists to known resources, and record the
    // consumer back-reference on each of those resources.
    for item in &mut scenario.items {
        item.clear_derived();
    }
    for (index, item) in scenario.items.iter_mut().enumerate() {
        let item_id = crate::id::ItemId(index as u32);
        let ingredients: Vec<(String, u32)> = item
            .ingredients()
            .iter()
            .map(|(name, &quantity)| (name.clone(), quantity))
            .collect();
        for (name, quantity) in ingredients {
            if let Some(&resource_id) = scenario.resource_ids.get(&name) {
                item.resolve_ingredient(resource_id, quantity);
                if let Some(resource) = scenario.resources.get_mut(resource_id.0 as usize) {
                    resource.link_consumer(item_id);
                }
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
