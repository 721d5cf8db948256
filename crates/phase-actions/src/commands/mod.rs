use anyhow::{Context, Result};
use clap::Args;
use phase_actions_config::{Config, parser};
use std::path::Path;
use tracing::debug;

pub mod check;
pub mod emit;
pub mod schema;
pub mod types;
pub mod validate;

/// Phase name overrides taking precedence over the configuration file
#[derive(Args, Debug, Default)]
pub struct PhaseArgs {
    /// Name of the start phase
    #[arg(long, global = true)]
    pub start_name: Option<String>,

    /// Name of the success phase
    #[arg(long, global = true)]
    pub success_name: Option<String>,

    /// Name of the error phase
    #[arg(long, global = true)]
    pub error_name: Option<String>,
}

/// Load the configuration file if present and apply command line overrides
pub fn load_config(config_path: &Path, phases: &PhaseArgs) -> Result<Config> {
    let mut config = if config_path.exists() {
        parser::parse_file(config_path).context("Failed to parse configuration")?
    } else {
        debug!(path = %config_path.display(), "No configuration file, using defaults");
        Config::default()
    };

    apply_overrides(&mut config, phases);
    parser::validate(&config).context("Invalid phase name overrides")?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, phases: &PhaseArgs) {
    if let Some(start) = &phases.start_name {
        config.phases.start = Some(start.clone());
    }
    if let Some(success) = &phases.success_name {
        config.phases.success = Some(success.clone());
    }
    if let Some(error) = &phases.error_name {
        config.phases.error = Some(error.clone());
    }
}
