//! Optional bench-level configuration file (`asset-build.yaml`)

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, config as config_error};

pub const CONFIG_FILE_NAME: &str = "asset-build.yaml";

/// Bundler program and argument template
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BundlerSection {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Contents of `asset-build.yaml`, every field optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Applications to build, in order (overrides `sites/apps.txt`)
    pub apps: Option<Vec<String>>,
    pub jobs: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub bundler: Option<BundlerSection>,
}

impl ConfigFile {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load the config file from the bench root, defaults when absent
    pub fn load(bench_path: &Path) -> Result<Self> {
        let path = bench_path.join(CONFIG_FILE_NAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(config_error::parse_failed(
                    path.display().to_string(),
                    err.to_string(),
                ));
            }
        };
        tracing::debug!(path = %path.display(), "loading configuration file");
        Self::from_yaml(&content)
            .map_err(|e| config_error::parse_failed(path.display().to_string(), e.to_string()))
    }
}
