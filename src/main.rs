//! Config Injector
//!
//! Applies the replacement list from the master configuration to the
//! target configuration files, expanding `${VAR}` placeholders from the
//! environment and the variable file.

use clap::Parser;
use config_injector::cli::{Cli, Command};
use config_injector::config::{ConfigLoader, ConfigPaths};
use config_injector::error::InjectError;
use config_injector::inject::{Injector, Policy};
use config_injector::logging::{self, LogTarget};
use std::process::ExitCode;
use tracing::{error, info, warn};

/// Exit status when a fatal error stops the run.
const EXIT_FATAL: u8 = 1;
/// Exit status when the master configuration cannot be loaded.
const EXIT_CONFIG: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&LogTarget::parse(&cli.log), cli.verbose) {
        eprintln!("Warning: failed to initialize logging: {e:#}");
    }

    let paths = ConfigPaths::discover(cli.base_dir.clone(), cli.config.clone());
    let mut loader = match ConfigLoader::load_with_paths(paths) {
        Ok(loader) => loader,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Failed to load configuration");
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    cli.apply_overrides(loader.config_mut());

    let resolver = loader.resolver();
    let config = loader.config();
    let policy = config.policy();
    let injector = Injector::new(loader.base_dir(), &resolver, policy);

    match cli.command() {
        Command::Apply => match injector.apply(&config.replacements) {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => handle_error(&e, &policy),
        },
        Command::Check => match injector.check(&config.replacements) {
            Ok(missing) if missing.is_empty() => {
                info!(files = config.replacements.len(), "All required variables resolve");
                ExitCode::SUCCESS
            }
            Ok(missing) => handle_error(
                &InjectError::MissingRequiredVariables {
                    names: missing.into_names(),
                },
                &policy,
            ),
            Err(e) => handle_error(&e, &policy),
        },
    }
}

/// Log `err` and decide the exit status from the policy.
fn handle_error(err: &InjectError, policy: &Policy) -> ExitCode {
    let message = match err {
        InjectError::MissingRequiredVariables { .. } => "Missing required variables",
        InjectError::FileNotFound { .. } => "Configuration file not found",
        InjectError::UnsupportedFormat { .. } | InjectError::InvalidPath { .. } => {
            "Invalid configuration format"
        }
        InjectError::MalformedDocument { .. } => "Malformed configuration file",
        InjectError::Io { .. } => "I/O error during configuration processing",
    };
    error!(code = %err.code(), error = %err, "{}", message);

    if err.is_fatal(policy) {
        error!("Stopping due to: {}", message);
        ExitCode::from(EXIT_FATAL)
    } else {
        warn!("Continuing despite error (policy allows it)");
        ExitCode::SUCCESS
    }
}
