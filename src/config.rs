// Session configuration loaded from YAML

use crate::filter::{Filter, SortKey};
use crate::models::Status;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "todostore";
const CONFIG_FILE: &str = "todostore.yml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tab shown when the session starts
    pub default_tab: Status,
    /// Ordering used when the session starts
    pub default_sort: SortKey,
    /// Colourise text output
    pub color: bool,
    /// Fallback log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_tab: Status::NotStarted,
            default_sort: SortKey::Created,
            color: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Pick the config file to read
    ///
    /// An explicit path must exist. Without one, the user config file is used
    /// when present; `None` means defaults.
    pub fn locate(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(eyre!("Config file not found: {}", path.display()));
            }
            return Ok(Some(path.to_path_buf()));
        }

        Ok(Self::default_path().filter(|path| path.exists()))
    }

    /// Load the located config file, or defaults when there is none
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a YAML config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to null, which means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// `<config dir>/todostore/todostore.yml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Initial tab/sort selection for a new store
    pub fn filter(&self) -> Filter {
        Filter::new(self.default_tab, self.default_sort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_tab, Status::NotStarted);
        assert_eq!(config.default_sort, SortKey::Created);
        assert!(config.color);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.filter(), Filter::default());
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = Config::from_yaml("default_sort: due\ncolor: false\n").unwrap();
        assert_eq!(config.default_tab, Status::NotStarted);
        assert_eq!(config.default_sort, SortKey::Due);
        assert!(!config.color);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_from_yaml_full() {
        let yaml = "default_tab: in-progress\ndefault_sort: created\ncolor: true\nlog_level: debug\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.filter(), Filter::new(Status::InProgress, SortKey::Created));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_from_yaml_empty() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_from_yaml_invalid() {
        assert!(Config::from_yaml("default_tab: blocked\n").is_err());
        assert!(Config::from_yaml("color: [1, 2").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("todostore.yml");
        fs::write(&path, "default_tab: completed\n").unwrap();

        let located = Config::locate(Some(path.as_path())).unwrap();
        assert_eq!(located.as_deref(), Some(path.as_path()));

        let config = Config::load(located.as_deref()).unwrap();
        assert_eq!(config.default_tab, Status::Completed);
    }

    #[test]
    fn test_locate_missing_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");
        assert!(Config::locate(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_load_without_file_is_default() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_unparseable_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("todostore.yml");
        fs::write(&path, "default_sort: priority\n").unwrap();
        assert!(Config::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_yaml_roundtrip_keys() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(yaml.contains("default_tab: not-started"));
        assert!(yaml.contains("default_sort: created"));
    }
}
