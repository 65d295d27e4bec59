//! Subsets configuration, read from `subsets.yaml` in the movos directory.

use movodoro_core::subset::{Subset, Subsets};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::CatalogError;

/// File name of the subsets configuration.
pub const SUBSETS_FILE: &str = "subsets.yaml";

#[derive(Debug, Default, Deserialize)]
struct SubsetsFile {
    #[serde(default)]
    subsets: Subsets,
}

/// Load `subsets.yaml` from `dir`. A missing file yields an empty map.
pub fn load_subsets(dir: &Path) -> Result<Subsets, CatalogError> {
    let path = dir.join(SUBSETS_FILE);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No subsets file");
            return Ok(Subsets::new());
        }
        Err(e) => {
            return Err(CatalogError::Read {
                path,
                reason: e.to_string(),
            });
        }
    };

    if content.trim().is_empty() {
        return Ok(Subsets::new());
    }

    let file: SubsetsFile = serde_yaml::from_str(&content).map_err(|e| CatalogError::Parse {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    Ok(file.subsets)
}

/// Codes in `subset` that no catalog item carries.
pub fn unknown_codes<'a>(subset: &'a Subset, known: impl Fn(&str) -> bool) -> Vec<&'a str> {
    subset
        .codes
        .iter()
        .map(String::as_str)
        .filter(|c| !known(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SUBSETS: &str = r#"
subsets:
  recovery:
    description: Gentle movements for recovery days
    codes:
      - TB-box-breath
      - TB-deep-breath
      - TS-light-move
  breath-only:
    description: Only breathing
    codes: [TB-box-breath, TB-deep-breath]
"#;

    #[test]
    fn loads_subsets() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(SUBSETS_FILE), SUBSETS).unwrap();
        let subsets = load_subsets(tmp.path()).unwrap();
        assert_eq!(subsets.len(), 2);

        let recovery = &subsets["recovery"];
        assert!(!recovery.description.is_empty());
        assert_eq!(recovery.codes.len(), 3);
        assert!(subsets["breath-only"].contains("TB-deep-breath"));
    }

    #[test]
    fn missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(load_subsets(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn empty_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(SUBSETS_FILE), "\n").unwrap();
        assert!(load_subsets(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(SUBSETS_FILE), "subsets: [1, 2\n").unwrap();
        assert!(load_subsets(tmp.path()).is_err());
    }

    #[test]
    fn reports_unknown_codes() {
        let subset = Subset::new("", ["TB-box-breath", "ZZ-missing"]);
        let unknown = unknown_codes(&subset, |c| c.starts_with("TB-"));
        assert_eq!(unknown, vec!["ZZ-missing"]);
    }
}
