//! Production planning: turn requested output into integer producer counts.
//!
//! The planner is a pure function of the resolved scenario and the request.
//! It propagates item demand down to resources, picks one producer type per
//! resource under the harvest-interval constraint, rounds unit counts up,
//! and reports the output those integer counts actually achieve.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::id::{ItemId, ProducerId, ResourceId};
use crate::model::{Resource, Scenario};
use crate::rate;

// ===========================================================================
// Request
// ===========================================================================

/// A planning request: desired output counts plus the harvest cadence.
///
/// `harvest_interval` is the cadence in minutes at which the operator
/// collects producers; it filters which producers are viable. Practical
/// operator values sit between 10 and 180 minutes, but the planner only
/// requires it to be positive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanRequest {
    pub harvest_interval: u32,
    /// Desired composite item counts.
    pub requested_items: BTreeMap<ItemId, u32>,
    /// Direct per-resource floors; raised to the ingredient-derived demand
    /// when that is larger.
    pub requested_resources: BTreeMap<ResourceId, u32>,
}

impl PlanRequest {
    pub fn new(harvest_interval: u32) -> Self {
        Self {
            harvest_interval,
            requested_items: BTreeMap::new(),
            requested_resources: BTreeMap::new(),
        }
    }

    pub fn request_item(mut self, item: ItemId, count: u32) -> Self {
        self.requested_items.insert(item, count);
        self
    }

    pub fn request_resource(mut self, resource: ResourceId, count: u32) -> Self {
        self.requested_resources.insert(resource, count);
        self
    }
}

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that abort a planning call outright.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The harvest interval was zero.
    #[error("harvest interval must be positive")]
    ZeroInterval,

    /// A producer's target resource is still an unresolved name. This
    /// indicates a resolver invariant violation and is surfaced rather
    /// than skipped.
    #[error("producer '{producer}' has an unresolved target resource")]
    UnresolvedReference { producer: String },
}

/// Per-resource conditions that leave part of the demand unplanned without
/// discarding the rest of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFailure {
    /// The resource has positive effective demand but no producers at all.
    NoProducer { resource: ResourceId },
}

// ===========================================================================
// Plan
// ===========================================================================

/// The result of a planning pass.
///
/// For every resource where selection succeeded, `actual_output` is at least
/// `effective_demand` (rounding producer counts up over-produces, never
/// under-produces).
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Demand per resource after merging item propagation with direct
    /// floors. Wider than the request counts: item counts multiply by
    /// ingredient quantities, and the total must not wrap.
    pub effective_demand: BTreeMap<ResourceId, u64>,
    /// Producer units required, per selected producer type.
    pub producer_counts: BTreeMap<ProducerId, u64>,
    /// Units actually produced per harvest interval, per resource.
    pub actual_output: BTreeMap<ResourceId, f64>,
    /// Resources whose demand could not be planned.
    pub failures: Vec<PlanFailure>,
}

/// Compute a producer plan for the requested output.
pub fn plan(scenario: &Scenario, request: &PlanRequest) -> Result<Plan, PlanError> {
    if request.harvest_interval == 0 {
        return Err(PlanError::ZeroInterval);
    }
    let interval = request.harvest_interval;

    // Step 1: propagate item demand to resources, then merge direct floors.
    // Accumulated in u64: a u32 item count times a u32 ingredient quantity
    // does not fit u32, and valid requests must never wrap.
    let mut effective_demand: BTreeMap<ResourceId, u64> = BTreeMap::new();
    for (&item_id, &count) in &request.requested_items {
        if count == 0 {
            continue;
        }
        let Some(item) = scenario.item(item_id) else {
            continue;
        };
        for (&resource_id, &quantity) in item.resolved_ingredients() {
            let entry = effective_demand.entry(resource_id).or_default();
            *entry = entry.saturating_add(u64::from(count) * u64::from(quantity));
        }
    }
    for (&resource_id, &floor) in &request.requested_resources {
        // Ids that name no resource in this scenario are dropped here, so
        // the demand map never carries entries the planning loop cannot
        // act on.
        if floor == 0 || scenario.resource(resource_id).is_none() {
            continue;
        }
        let entry = effective_demand.entry(resource_id).or_default();
        *entry = (*entry).max(u64::from(floor));
    }

    // Steps 2-4: select a producer per resource, derive counts, accumulate
    // achieved output. A resource without producers is recorded as a
    // failure so the remaining resources still get planned.
    let mut producer_counts: BTreeMap<ProducerId, u64> = BTreeMap::new();
    let mut actual_output: BTreeMap<ResourceId, f64> = BTreeMap::new();
    let mut failures = Vec::new();

    for (&resource_id, &demand) in &effective_demand {
        if demand == 0 {
            continue;
        }
        let Some(resource) = scenario.resource(resource_id) else {
            continue;
        };
        let Some(producer_id) = select_producer(scenario, resource, interval)? else {
            failures.push(PlanFailure::NoProducer {
                resource: resource_id,
            });
            continue;
        };
        let (Some(&cycle_time), Some(&yield_per_cycle)) = (
            resource.cycle_times().get(&producer_id),
            resource.yields_per_cycle().get(&producer_id),
        ) else {
            continue;
        };

        let units = rate::required_units(demand, interval, yield_per_cycle, cycle_time);
        if units > 0 {
            *producer_counts.entry(producer_id).or_default() += units;
            *actual_output.entry(resource_id).or_default() +=
                rate::interval_output(yield_per_cycle, cycle_time, interval, units);
        }
    }

    Ok(Plan {
        effective_demand,
        producer_counts,
        actual_output,
        failures,
    })
}

/// Pick the producer to plant for one resource.
///
/// Candidates are the resource's producers whose cycle fits inside the
/// harvest interval, considered in registration order; the greatest per-hour
/// yield wins and the first candidate keeps rate ties. When no producer fits
/// the interval, the first registered producer is used anyway — better than
/// nothing, not optimal. `Ok(None)` means the resource has no producers.
fn select_producer(
    scenario: &Scenario,
    resource: &Resource,
    harvest_interval: u32,
) -> Result<Option<ProducerId>, PlanError> {
    let mut best: Option<(ProducerId, f64)> = None;
    for &producer_id in resource.producers() {
        let Some(producer) = scenario.producer(producer_id) else {
            continue;
        };
        if producer.target().resolved().is_none() {
            return Err(PlanError::UnresolvedReference {
                producer: producer.name().to_string(),
            });
        }
        if producer.cycle_time() > harvest_interval {
            continue;
        }
        let Some(&per_hour) = resource.yields_per_hour().get(&producer_id) else {
            continue;
        };
        if best.is_none_or(|(_, rate)| per_hour > rate) {
            best = Some((producer_id, per_hour));
        }
    }

    match best {
        Some((producer_id, _)) => Ok(Some(producer_id)),
        None => Ok(resource.producers().first().copied()),
    }
}

impl Plan {
    /// Render a human-readable summary of the plan.
    pub fn report(&self, scenario: &Scenario) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Production Plan: {} ===", scenario.name());

        let _ = writeln!(out, "Producers to plant:");
        for (&producer_id, &units) in &self.producer_counts {
            if let Some(producer) = scenario.producer(producer_id) {
                let _ = writeln!(out, "  {units}x {}", producer.name());
            }
        }

        let _ = writeln!(out, "Demand vs. harvest:");
        for (&resource_id, &demand) in &self.effective_demand {
            if let Some(resource) = scenario.resource(resource_id) {
                let actual = self.actual_output.get(&resource_id).copied().unwrap_or(0.0);
                let _ = writeln!(
                    out,
                    "  {:<24} need {demand:>6}, harvest {actual:>8.1}",
                    resource.name()
                );
            }
        }

        if !self.failures.is_empty() {
            let _ = writeln!(out, "Unplanned:");
            for failure in &self.failures {
                let PlanFailure::NoProducer { resource } = failure;
                if let Some(resource) = scenario.resource(*resource) {
                    let _ = writeln!(out, "  {}: no producer available", resource.name());
                }
            }
        }

        out
    }
}

// ===========================================================================
// Tests
// ===========================================================================
