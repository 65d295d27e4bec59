//! Category file loading and item resolution.
//!
//! Each `*.yaml` file in the movos directory describes one category and its
//! items. Resolution turns the raw file shape into fully resolved `Item`s:
//! full codes, merged tags, effective intensity and effective weight.

use movodoro_core::item::{DEFAULT_WEIGHT, Item};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::CatalogError;
use crate::subsets::SUBSETS_FILE;

/// One category file as written on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryFile {
    /// Display name, e.g. "Reset & Breath"
    #[serde(default)]
    pub category: String,

    /// Short code used as the item code prefix
    pub code: String,

    #[serde(default = "default_weight")]
    pub weight: f64,

    /// Intensity for items that do not set their own `rpe`
    #[serde(default)]
    pub default_rpe: u32,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, alias = "snacks")]
    pub movos: Vec<ItemSpec>,
}

/// One item entry inside a category file.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSpec {
    pub code: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub duration_min: u32,

    pub duration_max: u32,

    /// Falls back to the category's `default_rpe` when unset
    #[serde(default)]
    pub rpe: Option<u32>,

    #[serde(default)]
    pub max_per_day: u32,

    #[serde(default)]
    pub max_per_week: Option<u32>,

    #[serde(default)]
    pub min_per_day: u32,

    #[serde(default = "default_weight")]
    pub weight: f64,

    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl CategoryFile {
    /// Resolve every item in this category.
    pub fn resolve(&self) -> Vec<Item> {
        self.movos.iter().map(|entry| self.resolve_item(entry)).collect()
    }

    fn resolve_item(&self, entry: &ItemSpec) -> Item {
        // Category weight applies only to items left at the default weight.
        let weight = if entry.weight == DEFAULT_WEIGHT && self.weight != DEFAULT_WEIGHT {
            self.weight
        } else {
            entry.weight
        };

        Item {
            code: format!("{}-{}", self.code, entry.code),
            category: self.code.clone(),
            title: if entry.title.is_empty() { entry.code.clone() } else { entry.title.clone() },
            description: entry.description.clone(),
            duration_min: entry.duration_min,
            duration_max: entry.duration_max,
            intensity: entry.rpe.unwrap_or(self.default_rpe),
            weight,
            tags: self.tags.iter().chain(entry.tags.iter()).cloned().collect(),
            max_per_day: entry.max_per_day,
            max_per_week: entry.max_per_week,
            min_per_day: entry.min_per_day,
        }
    }
}

/// The resolved, validated set of items for one run.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Build a catalog from already resolved items, validating each one.
    pub fn from_items(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for item in &items {
            validate_item(item)?;
            if !seen.insert(item.code.as_str()) {
                return Err(CatalogError::Invalid {
                    code: item.code.clone(),
                    reason: "duplicate item code".into(),
                });
            }
        }
        Ok(Self { items })
    }

    /// Load every category file in `dir`.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        if !dir.is_dir() {
            return Err(CatalogError::NotFound(dir.to_path_buf()));
        }

        let files = category_files(dir)?;
        if files.is_empty() {
            return Err(CatalogError::Empty(dir.to_path_buf()));
        }

        let mut items = Vec::new();
        for path in &files {
            let category = load_category(path)?;
            let resolved = category.resolve();
            debug!(path = %path.display(), category = %category.code, count = resolved.len(), "Category loaded");
            items.extend(resolved);
        }

        Self::from_items(items)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by full code.
    pub fn get(&self, code: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.code == code)
    }

    /// Items with a daily minimum.
    pub fn everyday(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.is_everyday())
    }
}

/// Parse a single category file.
pub fn load_category(path: &Path) -> Result<CategoryFile, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_yaml::from_str(&content).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn category_files(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let entries = std::fs::read_dir(dir).map_err(|e| CatalogError::Read {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|e| e == "yaml"))
        .filter(|p| p.file_name().is_some_and(|n| n != SUBSETS_FILE))
        .collect();
    files.sort();
    Ok(files)
}

fn validate_item(item: &Item) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::Invalid {
        code: item.code.clone(),
        reason: reason.to_string(),
    };

    if !(item.weight > 0.0) || !item.weight.is_finite() {
        return Err(invalid("weight must be a positive number"));
    }
    if item.duration_min == 0 {
        return Err(invalid("duration_min must be greater than 0"));
    }
    if item.duration_min > item.duration_max {
        return Err(invalid("duration_min must not exceed duration_max"));
    }
    if !(1..=10).contains(&item.intensity) {
        return Err(invalid("intensity (rpe) must be between 1 and 10"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BREATH: &str = r#"
category: Reset & Breath
code: TB
weight: 1.0
default_rpe: 1
tags: [breath, calm]
movos:
  - code: box-breath
    title: Box breathing
    description: Inhale 4, hold 4, exhale 4, hold 4.
    duration_min: 3
    duration_max: 5
    max_per_day: 2
    min_per_day: 1
  - code: deep-breath
    title: Deep breathing
    duration_min: 2
    duration_max: 4
    tags: [Lying]
"#;

    const STRENGTH: &str = r#"
category: Strength
code: TS
weight: 2.0
default_rpe: 6
tags: [strength]
movos:
  - code: pushups
    title: Push-ups
    duration_min: 3
    duration_max: 5
    rpe: 7
    max_per_day: 1
    max_per_week: 4
  - code: heavy-lift
    title: Heavy lift
    duration_min: 5
    duration_max: 8
    rpe: 9
    weight: 0.5
"#;

    fn write_catalog(dir: &Path) {
        std::fs::write(dir.join("breath.yaml"), BREATH).unwrap();
        std::fs::write(dir.join("strength.yaml"), STRENGTH).unwrap();
    }

    #[test]
    fn loads_and_resolves_items() {
        let tmp = TempDir::new().unwrap();
        write_catalog(tmp.path());
        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.len(), 4);

        let box_breath = catalog.get("TB-box-breath").unwrap();
        assert_eq!(box_breath.category, "TB");
        assert_eq!(box_breath.intensity, 1);
        assert_eq!(box_breath.min_per_day, 1);
        assert_eq!(box_breath.tags, vec!["breath".to_string(), "calm".to_string()]);

        let deep = catalog.get("TB-deep-breath").unwrap();
        assert_eq!(deep.tags, vec!["breath", "calm", "Lying"]);
    }

    #[test]
    fn item_rpe_overrides_category_default() {
        let tmp = TempDir::new().unwrap();
        write_catalog(tmp.path());
        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.get("TS-pushups").unwrap().intensity, 7);
        assert_eq!(catalog.get("TS-pushups").unwrap().max_per_week, Some(4));
    }

    #[test]
    fn category_weight_applies_to_default_weight_items_only() {
        let tmp = TempDir::new().unwrap();
        write_catalog(tmp.path());
        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.get("TS-pushups").unwrap().weight, 2.0);
        assert_eq!(catalog.get("TS-heavy-lift").unwrap().weight, 0.5);
        assert_eq!(catalog.get("TB-box-breath").unwrap().weight, 1.0);
    }

    #[test]
    fn everyday_lists_min_per_day_items() {
        let tmp = TempDir::new().unwrap();
        write_catalog(tmp.path());
        let catalog = Catalog::load(tmp.path()).unwrap();
        let codes: Vec<&str> = catalog.everyday().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["TB-box-breath"]);
    }

    #[test]
    fn subsets_file_is_not_a_category() {
        let tmp = TempDir::new().unwrap();
        write_catalog(tmp.path());
        std::fs::write(tmp.path().join(SUBSETS_FILE), "subsets: {}\n").unwrap();
        assert_eq!(Catalog::load(tmp.path()).unwrap().len(), 4);
    }

    #[test]
    fn legacy_snacks_key_is_accepted() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("breath.yaml"), BREATH.replace("movos:", "snacks:")).unwrap();
        assert_eq!(Catalog::load(tmp.path()).unwrap().len(), 2);
    }

    #[test]
    fn missing_dir_and_empty_dir_are_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            Catalog::load(&tmp.path().join("missing")),
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(Catalog::load(tmp.path()), Err(CatalogError::Empty(_))));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("bad.yaml"), "code: [unterminated\n").unwrap();
        assert!(matches!(Catalog::load(tmp.path()), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn rejects_invalid_items() {
        let inverted = Item::new("X-a").with_duration(5, 3);
        assert!(Catalog::from_items(vec![inverted]).is_err());

        let zero_weight = Item::new("X-a").with_weight(0.0);
        assert!(Catalog::from_items(vec![zero_weight]).is_err());

        let zero_duration = Item::new("X-a").with_duration(0, 3);
        assert!(Catalog::from_items(vec![zero_duration]).is_err());

        let too_hard = Item::new("X-a").with_intensity(11);
        assert!(Catalog::from_items(vec![too_hard]).is_err());

        let dup = vec![Item::new("X-a"), Item::new("X-a")];
        assert!(matches!(
            Catalog::from_items(dup),
            Err(CatalogError::Invalid { reason, .. }) if reason.contains("duplicate")
        ));
    }

    #[test]
    fn missing_default_rpe_fails_validation() {
        let tmp = TempDir::new().unwrap();
        let yaml = "code: NR\nmovos:\n  - code: a\n    duration_min: 1\n    duration_max: 2\n";
        std::fs::write(tmp.path().join("nr.yaml"), yaml).unwrap();
        assert!(matches!(Catalog::load(tmp.path()), Err(CatalogError::Invalid { .. })));
    }
}
