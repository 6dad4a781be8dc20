//! CLI command definitions for config-injector
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::config::InjectorConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Apply configured value changes to YAML, JSON, TOML and properties files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the master configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory that target files are resolved against
    #[arg(short, long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Variable file (overrides `env-file` from the configuration)
    #[arg(short, long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Report missing required variables without failing
    #[arg(long, global = true)]
    pub no_stop_on_missing_required: bool,

    /// Treat file, format and I/O errors as fatal
    #[arg(long, global = true)]
    pub stop_on_error: bool,

    /// Create target files that do not exist yet
    #[arg(long, global = true)]
    pub create_missing: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Apply the change-set (default if no subcommand given)
    Apply,

    /// Report missing variables without touching any file
    Check,
}

impl Cli {
    /// Command to run, defaulting to `apply`.
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Apply)
    }

    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut InjectorConfig) {
        if let Some(env_file) = &self.env_file {
            config.env_file = env_file.clone();
        }
        if self.no_stop_on_missing_required {
            config.policy.stop_on_missing_required = false;
        }
        if self.stop_on_error {
            config.policy.stop_on_error = true;
        }
        if self.create_missing {
            config.policy.require_existing_files = false;
        }
    }
}
