//! Discovers scenario version directories under a data root.
//!
//! The on-disk layout is `<data_dir>/<scenario>/<version>/scenario.*`, one
//! directory per published version of a scenario. Discovery only checks for
//! the `scenario` file; loading and validating the contents is the loader's
//! job.

use std::path::{Path, PathBuf};

use crate::loader::{self, SCENARIO_FILE};

/// A scenario version directory found under the data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioLocation {
    /// Scenario directory name, e.g. `vanilla`.
    pub scenario: String,
    /// Version directory name, e.g. `1.0`.
    pub version: String,
    /// Full path to the version directory, ready for
    /// [`loader::load_scenario`].
    pub dir: PathBuf,
}

/// List every scenario version directory under `data_dir`, sorted by
/// scenario name then version.
///
/// Directories without a `scenario` file are skipped silently; a stray file
/// at either level is ignored. Format conflicts on the `scenario` file
/// surface here rather than being skipped, since the directory clearly
/// intends to be a scenario.
pub fn list_scenarios(data_dir: &Path) -> Result<Vec<ScenarioLocation>, loader::DataLoadError> {
    let mut found = Vec::new();
    for scenario_entry in read_dirs(data_dir)? {
        let scenario = dir_name(&scenario_entry);
        for version_entry in read_dirs(&scenario_entry)? {
            if loader::find_data_file(&version_entry, SCENARIO_FILE)?.is_some() {
                found.push(ScenarioLocation {
                    scenario: scenario.clone(),
                    version: dir_name(&version_entry),
                    dir: version_entry,
                });
            }
        }
    }
    found.sort_by(|a, b| {
        a.scenario
            .cmp(&b.scenario)
            .then_with(|| a.version.cmp(&b.version))
    });
    Ok(found)
}

fn read_dirs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn make_data_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "greenhouse_discover_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn add_version(root: &Path, scenario: &str, version: &str) {
        let dir = root.join(scenario).join(version);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("scenario.ron"),
            format!(r#"(name: "{scenario}", version: "{version}", kind: Vanilla)"#),
        )
        .unwrap();
    }

    #[test]
    fn lists_versions_sorted_by_name_then_version() {
        let root = make_data_dir("sorted");
        add_version(&root, "vanilla", "1.1");
        add_version(&root, "reforged-eden", "1.10");
        add_version(&root, "vanilla", "1.0");

        let locations = list_scenarios(&root).unwrap();
        let keys: Vec<(&str, &str)> = locations
            .iter()
            .map(|l| (l.scenario.as_str(), l.version.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("reforged-eden", "1.10"),
                ("vanilla", "1.0"),
                ("vanilla", "1.1"),
            ]
        );
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn skips_directories_without_a_scenario_file() {
        let root = make_data_dir("skips");
        add_version(&root, "vanilla", "1.0");
        fs::create_dir_all(root.join("vanilla").join("wip")).unwrap();
        fs::create_dir_all(root.join("notes")).unwrap();
        fs::write(root.join("README.md"), "data root").unwrap();

        let locations = list_scenarios(&root).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].version, "1.0");
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn discovered_dirs_load() {
        let root = make_data_dir("loads");
        add_version(&root, "vanilla", "1.0");

        let locations = list_scenarios(&root).unwrap();
        let scenario = loader::load_scenario(&locations[0].dir).unwrap();
        assert_eq!(scenario.name(), "vanilla");
        assert_eq!(scenario.version(), "1.0");
        let _ = fs::remove_dir_all(&root);
    }
}
