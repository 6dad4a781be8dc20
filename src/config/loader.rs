//! Master configuration discovery and loading.

use super::types::{DEFAULT_CONFIG_FILE, InjectorConfig};
use crate::resolver::CompositeResolver;
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the master configuration and the target files live.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Directory that entry `file` paths and the env file are resolved against
    pub base_dir: PathBuf,
    /// Master configuration file
    pub config_file: PathBuf,
}

impl ConfigPaths {
    /// Discover paths from explicit overrides, then environment, then defaults.
    ///
    /// Base dir: `base_dir`, `CONFIG_INJECTOR_BASE_DIR`, or the current directory.
    /// Config file: `config_file`, `CONFIG_INJECTOR_CONFIG_PATH`, or
    /// `config-injector.yml` inside the base dir.
    pub fn discover(base_dir: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        let base_dir = base_dir
            .or_else(|| std::env::var("CONFIG_INJECTOR_BASE_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let config_file = config_file
            .or_else(|| {
                std::env::var("CONFIG_INJECTOR_CONFIG_PATH")
                    .ok()
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| base_dir.join(DEFAULT_CONFIG_FILE));

        Self {
            base_dir,
            config_file,
        }
    }

    /// Create paths with explicit locations, ignoring the environment.
    pub fn with_paths(base_dir: impl Into<PathBuf>, config_file: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            config_file: config_file.into(),
        }
    }
}

/// Loaded master configuration with the paths it came from.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    pub paths: ConfigPaths,
    config: InjectorConfig,
}

impl ConfigLoader {
    /// Load with explicit paths.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        if !paths.config_file.exists() {
            bail!(
                "Config file not found: {}",
                paths.config_file.display()
            );
        }

        let config = InjectorConfig::load(&paths.config_file)?;
        debug!(
            config = %paths.config_file.display(),
            base_dir = %paths.base_dir.display(),
            files = config.replacements.len(),
            "Loaded master configuration"
        );

        Ok(Self { paths, config })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &InjectorConfig {
        &self.config
    }

    /// Get mutable access to the configuration.
    pub fn config_mut(&mut self) -> &mut InjectorConfig {
        &mut self.config
    }

    pub fn base_dir(&self) -> &Path {
        &self.paths.base_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.paths.config_file
    }

    /// Production resolver chain for this configuration.
    pub fn resolver(&self) -> CompositeResolver {
        self.config.resolver(&self.paths.base_dir)
    }
}
