//! Serde structs for scenario definition files.
//!
//! A scenario version directory holds a `scenario` file plus optional
//! `resources`, `producers`, and `items` files, each authored as a map keyed
//! by entity name (the name is injected from the key by the loader, so
//! records never repeat it). Files may be RON, JSON, or TOML.

use std::collections::BTreeMap;

use greenhouse_core::model::ScenarioKind;
use serde::Deserialize;

/// The `scenario` file: metadata for one version of a scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioData {
    pub name: String,
    pub version: String,
    pub kind: ScenarioKind,
    #[serde(default)]
    pub link: Option<String>,
}

/// A harvest resource record. The name comes from the map key.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    pub market_value: Option<u32>,
}

/// A producer's target resource: either a bare resource name, or an inline
/// resource definition for resources not worth their own file entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TargetData {
    /// Reference by name; the resource is defined elsewhere or synthesized.
    Name(String),
    /// Inline definition; registered as a resource by the loader.
    Inline {
        name: String,
        #[serde(default)]
        market_value: Option<u32>,
    },
}

/// A producer (plant sprout) record. The name comes from the map key.
#[derive(Debug, Clone, Deserialize)]
pub struct ProducerData {
    pub target: TargetData,
    /// Growth cycle in minutes.
    pub cycle_time: u32,
    pub yield_per_cycle: u32,
    /// Authored override; derived from the cycle fields when absent.
    #[serde(default)]
    pub yield_per_hour: Option<f64>,
}

/// A composite (food) item record. The name comes from the map key.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemData {
    pub market_value: u32,
    pub ingredients: BTreeMap<String, u32>,
}

/// Name-keyed entity map, the on-disk shape of the three entity files.
pub type EntityMap<T> = BTreeMap<String, T>;

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Scenario metadata
    // -----------------------------------------------------------------------

    #[test]
    fn scenario_data_from_ron() {
        let ron = r#"
            (
                name: "Reforged Eden",
                version: "1.10",
                kind: Mod,
                link: Some("https://example.invalid/reforged-eden"),
            )
        "#;
        let scenario: ScenarioData = ron::from_str(ron).unwrap();
        assert_eq!(scenario.name, "Reforged Eden");
        assert_eq!(scenario.version, "1.10");
        assert_eq!(scenario.kind, ScenarioKind::Mod);
        assert!(scenario.link.is_some());
    }

    #[test]
    fn scenario_data_link_defaults_to_none() {
        let ron = r#"(name: "Vanilla", version: "1.0", kind: Vanilla)"#;
        let scenario: ScenarioData = ron::from_str(ron).unwrap();
        assert_eq!(scenario.kind, ScenarioKind::Vanilla);
        assert!(scenario.link.is_none());
    }

    #[test]
    fn scenario_data_from_toml() {
        let toml_str = r#"
            name = "Vanilla"
            version = "1.0"
            kind = "Vanilla"
        "#;
        let scenario: ScenarioData = toml::from_str(toml_str).unwrap();
        assert_eq!(scenario.name, "Vanilla");
    }

    // -----------------------------------------------------------------------
    // Entity maps: name injected from the key
    // -----------------------------------------------------------------------

    #[test]
    fn resource_map_from_ron() {
        let ron = r#"
            {
                "Pumpkin": (market_value: Some(10)),
                "Fiber": (),
            }
        "#;
        let resources: EntityMap<ResourceData> = ron::from_str(ron).unwrap();
        assert_eq!(resources["Pumpkin"].market_value, Some(10));
        assert_eq!(resources["Fiber"].market_value, None);
    }

    #[test]
    fn producer_map_from_json() {
        let json = r#"{
            "Pumpkin Sprout": {
                "target": "Pumpkin",
                "cycle_time": 30,
                "yield_per_cycle": 10
            }
        }"#;
        let producers: EntityMap<ProducerData> = serde_json::from_str(json).unwrap();
        let sprout = &producers["Pumpkin Sprout"];
        assert!(matches!(&sprout.target, TargetData::Name(n) if n == "Pumpkin"));
        assert_eq!(sprout.cycle_time, 30);
        assert_eq!(sprout.yield_per_cycle, 10);
        assert!(sprout.yield_per_hour.is_none());
    }

    #[test]
    fn producer_map_from_toml() {
        let toml_str = r#"
            ["Pumpkin Sprout"]
            target = "Pumpkin"
            cycle_time = 30
            yield_per_cycle = 10
            yield_per_hour = 21.5
        "#;
        let producers: EntityMap<ProducerData> = toml::from_str(toml_str).unwrap();
        assert_eq!(producers["Pumpkin Sprout"].yield_per_hour, Some(21.5));
    }

    #[test]
    fn inline_target_from_json() {
        let json = r#"{
            "Fiber Plant": {
                "target": {"name": "Fiber", "market_value": 2},
                "cycle_time": 120,
                "yield_per_cycle": 6
            }
        }"#;
        let producers: EntityMap<ProducerData> = serde_json::from_str(json).unwrap();
        match &producers["Fiber Plant"].target {
            TargetData::Inline { name, market_value } => {
                assert_eq!(name, "Fiber");
                assert_eq!(*market_value, Some(2));
            }
            other => panic!("expected inline target, got: {other:?}"),
        }
    }

    #[test]
    fn item_map_from_ron() {
        let ron = r#"
            {
                "Pumpkin Pie": (
                    market_value: 120,
                    ingredients: {"Pumpkin": 3, "Berry": 2},
                ),
            }
        "#;
        let items: EntityMap<ItemData> = ron::from_str(ron).unwrap();
        let pie = &items["Pumpkin Pie"];
        assert_eq!(pie.market_value, 120);
        assert_eq!(pie.ingredients["Pumpkin"], 3);
        assert_eq!(pie.ingredients["Berry"], 2);
    }

    #[test]
    fn item_map_from_toml() {
        let toml_str = r#"
            ["Pumpkin Pie"]
            market_value = 120

            ["Pumpkin Pie".ingredients]
            Pumpkin = 3
            Berry = 2
        "#;
        let items: EntityMap<ItemData> = toml::from_str(toml_str).unwrap();
        assert_eq!(items["Pumpkin Pie"].ingredients.len(), 2);
    }
}
