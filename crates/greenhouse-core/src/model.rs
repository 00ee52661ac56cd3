//! Entity model: producers, resources, composite items, and the scenario
//! that registers them.
//!
//! Records are constructed from sparse, independently-authored data via the
//! validating constructors, registered on a [`ScenarioBuilder`], and frozen
//! into a [`Scenario`] by `build()`, which runs the resolution pass exactly
//! once. A built scenario has no `&mut self` methods: immutability after
//! resolution is enforced by the type system, so planning calls may share it
//! freely.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::id::{ItemId, ProducerId, ResourceId};
use crate::resolve;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors raised while constructing entity records from authored data.
///
/// These are fatal: a record that fails validation never enters a scenario,
/// so resolution and planning only ever see well-formed entities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A numeric field that must be strictly positive was zero.
    #[error("{kind} '{name}': {field} must be positive")]
    NonPositive {
        kind: &'static str,
        name: String,
        field: &'static str,
    },

    /// An entity was authored with an empty name.
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    /// A producer references its target resource by an empty name.
    #[error("producer '{name}': target resource name must not be empty")]
    EmptyTarget { name: String },

    /// A composite item lists an ingredient with an empty resource name.
    #[error("item '{name}': ingredient names must not be empty")]
    EmptyIngredient { name: String },
}

fn check_name(kind: &'static str, name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::EmptyName { kind })
    } else {
        Ok(())
    }
}

// ===========================================================================
// ResourceRef
// ===========================================================================

/// A producer's reference to its target resource.
///
/// Authored data may name the resource before it exists; resolution rewrites
/// every `Name` to `Resolved` exactly once. After a scenario is built, no
/// code path should need to ask which variant it holds — use
/// [`ResourceRef::resolved`] and treat `None` as a resolver invariant
/// violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    /// An unresolved reference by resource name.
    Name(String),
    /// A resolved reference to a registered resource.
    Resolved(ResourceId),
}

impl ResourceRef {
    /// The resolved resource id, if resolution has run.
    pub fn resolved(&self) -> Option<ResourceId> {
        match self {
            ResourceRef::Resolved(id) => Some(*id),
            ResourceRef::Name(_) => None,
        }
    }
}

// ===========================================================================
// Producer
// ===========================================================================

/// A plant: converts elapsed time into units of one resource at a fixed
/// per-cycle rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Producer {
    name: String,
    target: ResourceRef,
    /// Growth cycle length in minutes.
    cycle_time: u32,
    /// Units harvested per completed cycle.
    yield_per_cycle: u32,
    /// Units per hour. Authored values win; absent values are derived
    /// during resolution as `yield_per_cycle / cycle_time * 60`.
    yield_per_hour: Option<f64>,
}

impl Producer {
    /// Construct a producer from authored data.
    ///
    /// `yield_per_hour` may be supplied by the author; pass `None` to have
    /// resolution derive it from the cycle fields.
    pub fn new(
        name: impl Into<String>,
        target: impl Into<String>,
        cycle_time: u32,
        yield_per_cycle: u32,
        yield_per_hour: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let target = target.into();
        check_name("producer", &name)?;
        if target.trim().is_empty() {
            return Err(ValidationError::EmptyTarget { name });
        }
        if cycle_time == 0 {
            return Err(ValidationError::NonPositive {
                kind: "producer",
                name,
                field: "cycle_time",
            });
        }
        if yield_per_cycle == 0 {
            return Err(ValidationError::NonPositive {
                kind: "producer",
                name,
                field: "yield_per_cycle",
            });
        }
        if yield_per_hour.is_some_and(|rate| rate <= 0.0) {
            return Err(ValidationError::NonPositive {
                kind: "producer",
                name,
                field: "yield_per_hour",
            });
        }
        Ok(Self {
            name,
            target: ResourceRef::Name(target),
            cycle_time,
            yield_per_cycle,
            yield_per_hour,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &ResourceRef {
        &self.target
    }

    pub fn cycle_time(&self) -> u32 {
        self.cycle_time
    }

    pub fn yield_per_cycle(&self) -> u32 {
        self.yield_per_cycle
    }

    /// Per-hour yield. `None` only before resolution has run.
    pub fn yield_per_hour(&self) -> Option<f64> {
        self.yield_per_hour
    }

    pub(crate) fn set_target(&mut self, id: ResourceId) {
        self.target = ResourceRef::Resolved(id);
    }

    pub(crate) fn set_yield_per_hour(&mut self, rate: f64) {
        self.yield_per_hour = Some(rate);
    }

    /// The target resource name while still unresolved.
    pub(crate) fn target_name(&self) -> Option<&str> {
        match &self.target {
            ResourceRef::Name(name) => Some(name),
            ResourceRef::Resolved(_) => None,
        }
    }
}

// ===========================================================================
// Resource
// ===========================================================================

/// A harvest product: produced by plants, consumed by composite items.
///
/// The per-producer maps and back-references are derived state, populated by
/// resolution and rebuilt from scratch on every resolver run. Before
/// resolution they are empty, never partially filled.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    name: String,
    market_value: Option<u32>,
    cycle_times: BTreeMap<ProducerId, u32>,
    yields_per_cycle: BTreeMap<ProducerId, u32>,
    yields_per_hour: BTreeMap<ProducerId, f64>,
    /// Only populated when `market_value` is set.
    market_value_per_hour: BTreeMap<ProducerId, f64>,
    producers: Vec<ProducerId>,
    consumers: Vec<ItemId>,
}

impl Resource {
    /// Construct a resource from authored data.
    pub fn new(
        name: impl Into<String>,
        market_value: Option<u32>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        check_name("resource", &name)?;
        if market_value == Some(0) {
            return Err(ValidationError::NonPositive {
                kind: "resource",
                name,
                field: "market_value",
            });
        }
        Ok(Self {
            name,
            market_value,
            cycle_times: BTreeMap::new(),
            yields_per_cycle: BTreeMap::new(),
            yields_per_hour: BTreeMap::new(),
            market_value_per_hour: BTreeMap::new(),
            producers: Vec::new(),
            consumers: Vec::new(),
        })
    }

    /// A resource synthesized during resolution for a name that was only
    /// ever referenced by producers. Carries no market value.
    pub(crate) fn synthesized(name: &str) -> Self {
        Self {
            name: name.to_string(),
            market_value: None,
            cycle_times: BTreeMap::new(),
            yields_per_cycle: BTreeMap::new(),
            yields_per_hour: BTreeMap::new(),
            market_value_per_hour: BTreeMap::new(),
            producers: Vec::new(),
            consumers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn market_value(&self) -> Option<u32> {
        self.market_value
    }

    /// Cycle time per producer, cached here for planner access.
    pub fn cycle_times(&self) -> &BTreeMap<ProducerId, u32> {
        &self.cycle_times
    }

    /// Per-cycle yield per producer, cached here for planner access.
    pub fn yields_per_cycle(&self) -> &BTreeMap<ProducerId, u32> {
        &self.yields_per_cycle
    }

    /// Per-hour yield per producer. Stays consistent with
    /// [`Producer::yield_per_hour`] because both are rebuilt by the same
    /// resolver pass.
    pub fn yields_per_hour(&self) -> &BTreeMap<ProducerId, f64> {
        &self.yields_per_hour
    }

    /// Market value earned per hour per producer; empty unless this resource
    /// has a market value.
    pub fn market_value_per_hour(&self) -> &BTreeMap<ProducerId, f64> {
        &self.market_value_per_hour
    }

    /// Producers whose target resolves to this resource, in registration
    /// order.
    pub fn producers(&self) -> &[ProducerId] {
        &self.producers
    }

    /// Items that list this resource as an ingredient, in registration order.
    pub fn consumers(&self) -> &[ItemId] {
        &self.consumers
    }

    pub(crate) fn clear_derived(&mut self) {
        self.cycle_times.clear();
        self.yields_per_cycle.clear();
        self.yields_per_hour.clear();
        self.market_value_per_hour.clear();
        self.producers.clear();
        self.consumers.clear();
    }

    pub(crate) fn link_producer(&mut self, id: ProducerId, producer: &Producer, rate: f64) {
        self.producers.push(id);
        self.cycle_times.insert(id, producer.cycle_time());
        self.yields_per_cycle.insert(id, producer.yield_per_cycle());
        self.yields_per_hour.insert(id, rate);
        if let Some(value) = self.market_value {
            self.market_value_per_hour
                .insert(id, crate::rate::value_per_hour(rate, value));
        }
    }

    pub(crate) fn link_consumer(&mut self, id: ItemId) {
        self.consumers.push(id);
    }
}

// ===========================================================================
// CompositeItem
// ===========================================================================

/// A food item built from fixed quantities of resources.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeItem {
    name: String,
    market_value: u32,
    /// Authored ingredient list, keyed by resource name.
    ingredients: BTreeMap<String, u32>,
    /// `ingredients` restricted to resources known at resolution time.
    resolved_ingredients: BTreeMap<ResourceId, u32>,
}

impl CompositeItem {
    /// Construct a composite item from authored data.
    pub fn new(
        name: impl Into<String>,
        market_value: u32,
        ingredients: BTreeMap<String, u32>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        check_name("item", &name)?;
        if market_value == 0 {
            return Err(ValidationError::NonPositive {
                kind: "item",
                name,
                field: "market_value",
            });
        }
        for (ingredient, &quantity) in &ingredients {
            if ingredient.trim().is_empty() {
                return Err(ValidationError::EmptyIngredient { name });
            }
            if quantity == 0 {
                return Err(ValidationError::NonPositive {
                    kind: "item",
                    name,
                    field: "ingredient quantity",
                });
            }
        }
        Ok(Self {
            name,
            market_value,
            ingredients,
            resolved_ingredients: BTreeMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn market_value(&self) -> u32 {
        self.market_value
    }

    pub fn ingredients(&self) -> &BTreeMap<String, u32> {
        &self.ingredients
    }

    /// Ingredients whose resource names were known at resolution time.
    pub fn resolved_ingredients(&self) -> &BTreeMap<ResourceId, u32> {
        &self.resolved_ingredients
    }

    pub(crate) fn clear_derived(&mut self) {
        self.resolved_ingredients.clear();
    }

    pub(crate) fn resolve_ingredient(&mut self, id: ResourceId, quantity: u32) {
        self.resolved_ingredients.insert(id, quantity);
    }
}

// ===========================================================================
// Scenario
// ===========================================================================

/// Which ruleset a scenario's data was authored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    Vanilla,
    Mod,
}

/// Builder for a [`Scenario`]: register records, then `build()` to resolve
/// and freeze.
///
/// Registration order is meaningful: it determines id assignment and thereby
/// every iteration order downstream, including planner tie-breaks. Unique
/// names within each registry are the loader's responsibility (see the data
/// crate); registering a duplicate name rebinds the name lookup to the newer
/// record.
#[derive(Debug)]
pub struct ScenarioBuilder {
    scenario: Scenario,
}

impl ScenarioBuilder {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        kind: ScenarioKind,
    ) -> Self {
        Self {
            scenario: Scenario {
                name: name.into(),
                version: version.into(),
                kind,
                link: None,
                resources: Vec::new(),
                resource_ids: HashMap::new(),
                producers: Vec::new(),
                producer_ids: HashMap::new(),
                items: Vec::new(),
                item_ids: HashMap::new(),
            },
        }
    }

    /// Attach an optional link to the scenario's upstream definition.
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.scenario.link = Some(link.into());
        self
    }

    /// Register a resource. Returns its id.
    pub fn add_resource(&mut self, resource: Resource) -> ResourceId {
        let id = ResourceId(self.scenario.resources.len() as u32);
        self.scenario
            .resource_ids
            .insert(resource.name.clone(), id);
        self.scenario.resources.push(resource);
        id
    }

    /// Register a producer. Returns its id.
    pub fn add_producer(&mut self, producer: Producer) -> ProducerId {
        let id = ProducerId(self.scenario.producers.len() as u32);
        self.scenario
            .producer_ids
            .insert(producer.name.clone(), id);
        self.scenario.producers.push(producer);
        id
    }

    /// Register a composite item. Returns its id.
    pub fn add_item(&mut self, item: CompositeItem) -> ItemId {
        let id = ItemId(self.scenario.items.len() as u32);
        self.scenario.item_ids.insert(item.name.clone(), id);
        self.scenario.items.push(item);
        id
    }

    /// Resolve the cross-reference graph and freeze the scenario.
    pub fn build(mut self) -> Scenario {
        resolve::resolve(&mut self.scenario);
        self.scenario
    }
}

/// A named, versioned set of producers, resources, and composite items with
/// a fully resolved cross-reference graph.
///
/// Obtained from [`ScenarioBuilder::build`]; read-only thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    name: String,
    version: String,
    kind: ScenarioKind,
    link: Option<String>,
    pub(crate) resources: Vec<Resource>,
    pub(crate) resource_ids: HashMap<String, ResourceId>,
    pub(crate) producers: Vec<Producer>,
    pub(crate) producer_ids: HashMap<String, ProducerId>,
    pub(crate) items: Vec<CompositeItem>,
    pub(crate) item_ids: HashMap<String, ItemId>,
}

impl Scenario {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn kind(&self) -> ScenarioKind {
        self.kind
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.0 as usize)
    }

    pub fn producer(&self, id: ProducerId) -> Option<&Producer> {
        self.producers.get(id.0 as usize)
    }

    pub fn item(&self, id: ItemId) -> Option<&CompositeItem> {
        self.items.get(id.0 as usize)
    }

    pub fn resource_id(&self, name: &str) -> Option<ResourceId> {
        self.resource_ids.get(name).copied()
    }

    pub fn producer_id(&self, name: &str) -> Option<ProducerId> {
        self.producer_ids.get(name).copied()
    }

    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.item_ids.get(name).copied()
    }

    /// Resources in registration order (synthesized resources last).
    pub fn resources(&self) -> impl Iterator<Item = (ResourceId, &Resource)> {
        self.resources
            .iter()
            .enumerate()
            .map(|(i, r)| (ResourceId(i as u32), r))
    }

    /// Producers in registration order.
    pub fn producers(&self) -> impl Iterator<Item = (ProducerId, &Producer)> {
        self.producers
            .iter()
            .enumerate()
            .map(|(i, p)| (ProducerId(i as u32), p))
    }

    /// Composite items in registration order.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &CompositeItem)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (ItemId(i as u32), item))
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn producer_count(&self) -> usize {
        self.producers.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
