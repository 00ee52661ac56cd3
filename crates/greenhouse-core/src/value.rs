//! Market-value queries over a resolved scenario.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::id::{ProducerId, ResourceId};
use crate::model::Scenario;

/// For every resource with a market value, its producers ranked by market
/// value earned per hour, best first. Rate ties fall back to producer name
/// so the ranking is stable for display.
pub fn value_rankings(scenario: &Scenario) -> BTreeMap<ResourceId, Vec<(ProducerId, f64)>> {
    let mut rankings = BTreeMap::new();

    for (resource_id, resource) in scenario.resources() {
        if resource.market_value().is_none() {
            continue;
        }
        let mut rows: Vec<(ProducerId, f64)> = resource
            .market_value_per_hour()
            .iter()
            .map(|(&producer_id, &value)| (producer_id, value))
            .collect();
        rows.sort_by(|a, b| {
            b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then_with(|| {
                let name_a = scenario.producer(a.0).map(|p| p.name()).unwrap_or("");
                let name_b = scenario.producer(b.0).map(|p| p.name()).unwrap_or("");
                name_a.cmp(name_b)
            })
        });
        rankings.insert(resource_id, rows);
    }

    rankings
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Producer, Resource, ScenarioBuilder, ScenarioKind};
    use crate::test_utils::orchard_scenario;

    #[test]
    fn rankings_cover_only_valued_resources() {
        let scenario = orchard_scenario();
        let rankings = value_rankings(&scenario);

        let pumpkin = scenario.resource_id("Pumpkin").unwrap();
        let berry = scenario.resource_id("Berry").unwrap();
        assert!(rankings.contains_key(&pumpkin));
        assert!(rankings.contains_key(&berry));

        // Every ranked resource has a market value.
        for resource_id in rankings.keys() {
            assert!(scenario.resource(*resource_id).unwrap().market_value().is_some());
        }
    }

    #[test]
    fn rankings_sort_by_value_per_hour_descending() {
        let scenario = orchard_scenario();
        let pumpkin = scenario.resource_id("Pumpkin").unwrap();
        let rankings = value_rankings(&scenario);

        let rows = &rankings[&pumpkin];
        assert_eq!(rows.len(), 2);
        // The 50/hr vine out-earns the 20/hr sprout at the same market value.
        assert_eq!(rows[0].0, scenario.producer_id("Pumpkin Vine").unwrap());
        assert!(rows[0].1 > rows[1].1);
    }

    #[test]
    fn equal_rates_rank_by_producer_name() {
        let mut builder = ScenarioBuilder::new("Vanilla", "1.0", ScenarioKind::Vanilla);
        builder.add_resource(Resource::new("Corn", Some(5)).unwrap());
        builder.add_producer(Producer::new("Zeta Stalk", "Corn", 30, 10, None).unwrap());
        builder.add_producer(Producer::new("Alpha Stalk", "Corn", 60, 20, None).unwrap());
        let scenario = builder.build();

        let corn = scenario.resource_id("Corn").unwrap();
        let rows = &value_rankings(&scenario)[&corn];
        assert_eq!(rows[0].0, scenario.producer_id("Alpha Stalk").unwrap());
    }
}
