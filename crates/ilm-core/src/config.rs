use crate::error::Result;
use crate::policy::DEFAULT_LIFECYCLE_TYPE;
use crate::registry::LifecycleRegistry;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "ilm.yaml";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Lifecycle type assumed for documents that do not name one.
    #[serde(default = "default_type")]
    pub default_type: String,
    /// Report every violation instead of stopping at the first.
    #[serde(default)]
    pub report_all: bool,
}

fn default_version() -> u32 {
    1
}

fn default_type() -> String {
    DEFAULT_LIFECYCLE_TYPE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            default_type: default_type(),
            report_all: false,
        }
    }
}

impl Config {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn validate(&self, registry: &LifecycleRegistry) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.version != 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("unsupported config version {}, expected 1", self.version),
            });
        }

        if !registry.contains(&self.default_type) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "default_type '{}' is not a known lifecycle type",
                    self.default_type
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.default_type, "timeseries");
        assert!(!cfg.report_all);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "report_all: true\n").unwrap();

        let cfg = Config::load(&path).unwrap();
        assert!(cfg.report_all);
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.default_type, "timeseries");
    }

    #[test]
    fn default_config_has_no_warnings() {
        let registry = LifecycleRegistry::builtin();
        assert!(Config::default().validate(&registry).is_empty());
    }

    #[test]
    fn unknown_default_type_is_an_error() {
        let registry = LifecycleRegistry::builtin();
        let cfg = Config {
            version: 2,
            default_type: "rolling".to_string(),
            report_all: false,
        };
        let warnings = cfg.validate(&registry);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
        assert_eq!(warnings[1].level, WarnLevel::Error);
        assert!(warnings[1].message.contains("rolling"));
    }
}
