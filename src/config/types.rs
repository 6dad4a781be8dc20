//! Master configuration types.

use crate::inject::{FileEntry, Policy};
use crate::resolver::CompositeResolver;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Conventional name of the master configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "config-injector.yml";

/// Conventional name of the key/value variable file.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Master configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InjectorConfig {
    /// Run policy flags, inlined at the top level.
    #[serde(flatten)]
    pub policy: Policy,

    /// Key/value variable file, relative to the base directory.
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Files to change, in order. Absent means nothing to do.
    #[serde(default)]
    pub replacements: Vec<FileEntry>,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            env_file: default_env_file(),
            replacements: Vec::new(),
        }
    }
}

fn default_env_file() -> PathBuf {
    PathBuf::from(DEFAULT_ENV_FILE)
}

impl InjectorConfig {
    /// Load the master configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty master file is a valid, empty configuration
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Location of the variable file for `base_dir`.
    pub fn env_file_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.env_file)
    }

    /// Production resolver chain: process environment, then the env file.
    pub fn resolver(&self, base_dir: &Path) -> CompositeResolver {
        CompositeResolver::with_defaults(&self.env_file_path(base_dir))
    }
}
