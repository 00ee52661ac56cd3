//! Loads a scenario version directory into a resolved core scenario.
//!
//! The loader guarantees what the core assumes: every record is parsed and
//! validated before resolution begins, and names are unique within each
//! registry (duplicate map keys cannot survive parsing, so the remaining
//! hazard is an inline target resource colliding with an authored one).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use greenhouse_core::model::{
    CompositeItem, Producer, Resource, Scenario, ScenarioBuilder, ValidationError,
};
use serde::de::DeserializeOwned;

use crate::schema::{EntityMap, ItemData, ProducerData, ResourceData, ScenarioData, TargetData};

/// Base names of the files making up one scenario version.
pub const SCENARIO_FILE: &str = "scenario";
pub const RESOURCES_FILE: &str = "resources";
pub const PRODUCERS_FILE: &str = "producers";
pub const ITEMS_FILE: &str = "items";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading scenario data.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The required `scenario` file was not found in the directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: &'static str, dir: PathBuf },

    /// The file extension names no supported format.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// The same base name exists in more than one format.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// The file failed to deserialize.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// An entity name was defined twice across the scenario's files.
    #[error("duplicate {kind} name '{name}' in {file}")]
    DuplicateName {
        file: PathBuf,
        kind: &'static str,
        name: String,
    },

    /// A record failed core validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Formats and file discovery
// ===========================================================================

/// Supported data file formats, detected by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Json,
    Toml,
}

impl Format {
    const ALL: [(Format, &'static str); 3] = [
        (Format::Ron, "ron"),
        (Format::Json, "json"),
        (Format::Toml, "toml"),
    ];

    /// Detect the format of a file from its extension.
    pub fn detect(path: &Path) -> Result<Format, DataLoadError> {
        let ext = path.extension().and_then(|e| e.to_str());
        Format::ALL
            .iter()
            .find(|(_, known)| Some(*known) == ext)
            .map(|&(format, _)| format)
            .ok_or_else(|| DataLoadError::UnsupportedFormat {
                file: path.to_path_buf(),
            })
    }

    fn parse<T: DeserializeOwned>(self, content: &str, path: &Path) -> Result<T, DataLoadError> {
        let parse_err = |detail: String| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail,
        };
        match self {
            Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string())),
            Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
            Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
        }
    }
}

/// Find the data file with the given base name in any supported format.
///
/// Returns `Ok(None)` when absent and an error when the base name exists in
/// several formats at once.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;
    for (_, ext) in Format::ALL {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }
    Ok(found)
}

/// Read and deserialize a data file according to its detected format.
pub fn read_data_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = Format::detect(path)?;
    let content = std::fs::read_to_string(path)?;
    format.parse(&content, path)
}

fn read_entity_map<T: DeserializeOwned>(
    dir: &Path,
    base_name: &str,
) -> Result<EntityMap<T>, DataLoadError> {
    match find_data_file(dir, base_name)? {
        Some(path) => read_data_file(&path),
        None => Ok(BTreeMap::new()),
    }
}

// ===========================================================================
// Loading
// ===========================================================================

/// Load one scenario version directory into a resolved [`Scenario`].
///
/// The directory must contain a `scenario` file; `resources`, `producers`,
/// and `items` files are optional and load as empty registries when absent.
pub fn load_scenario(dir: &Path) -> Result<Scenario, DataLoadError> {
    let scenario_path =
        find_data_file(dir, SCENARIO_FILE)?.ok_or(DataLoadError::MissingRequired {
            file: SCENARIO_FILE,
            dir: dir.to_path_buf(),
        })?;
    let scenario_data: ScenarioData = read_data_file(&scenario_path)?;

    let resources: EntityMap<ResourceData> = read_entity_map(dir, RESOURCES_FILE)?;
    // The producers path is kept for error reporting: duplicate inline
    // targets are diagnosed against the file that was actually read.
    let producers_path = find_data_file(dir, PRODUCERS_FILE)?;
    let producers: EntityMap<ProducerData> = match &producers_path {
        Some(path) => read_data_file(path)?,
        None => BTreeMap::new(),
    };
    let items: EntityMap<ItemData> = read_entity_map(dir, ITEMS_FILE)?;

    let mut builder = ScenarioBuilder::new(
        scenario_data.name,
        scenario_data.version,
        scenario_data.kind,
    );
    if let Some(link) = scenario_data.link {
        builder = builder.link(link);
    }

    let mut resource_names: Vec<String> = Vec::new();
    for (name, resource) in &resources {
        builder.add_resource(Resource::new(name.clone(), resource.market_value)?);
        resource_names.push(name.clone());
    }

    for (name, producer) in &producers {
        let target_name = match &producer.target {
            TargetData::Name(target) => target.clone(),
            TargetData::Inline { name: target, market_value } => {
                // An inline definition colliding with an authored resource
                // (or an earlier inline one) is a duplicate, not a merge.
                if resource_names.iter().any(|existing| existing == target) {
                    // A populated map implies the path was found; the
                    // fallback only keeps this arm panic-free.
                    let file = producers_path
                        .clone()
                        .unwrap_or_else(|| dir.to_path_buf());
                    return Err(DataLoadError::DuplicateName {
                        file,
                        kind: "resource",
                        name: target.clone(),
                    });
                }
                builder.add_resource(Resource::new(target.clone(), *market_value)?);
                resource_names.push(target.clone());
                target.clone()
            }
        };
        builder.add_producer(Producer::new(
            name.clone(),
            target_name,
            producer.cycle_time,
            producer.yield_per_cycle,
            producer.yield_per_hour,
        )?);
    }

    for (name, item) in &items {
        builder.add_item(CompositeItem::new(
            name.clone(),
            item.market_value,
            item.ingredients.clone(),
        )?);
    }

    Ok(builder.build())
}

// ===========================================================================
// Tests
// ===========================================================================
