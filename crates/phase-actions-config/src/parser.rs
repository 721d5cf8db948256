//! Configuration parser with environment variable substitution

use crate::{Config, ConfigError, Phases, Result};
use phase_actions_core::shape::is_plain_object;
use regex::Regex;
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Parse a YAML configuration file
pub fn parse_file(path: impl AsRef<Path>) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parse YAML configuration from a string
pub fn parse_str(content: &str) -> Result<Config> {
    let mut config: Config = serde_yaml::from_str(content)?;
    config.phases = substitute_phases(&config.phases)?;
    validate(&config)?;
    Ok(config)
}

/// Substitute environment variables in every configured phase name
fn substitute_phases(phases: &Phases) -> Result<Phases> {
    let substitute = |name: &Option<String>| -> Result<Option<String>> {
        name.as_deref().map(substitute_env_vars).transpose()
    };

    Ok(Phases {
        start: substitute(&phases.start)?,
        success: substitute(&phases.success)?,
        error: substitute(&phases.error)?,
    })
}

/// Validate configuration
///
/// Run by the parser; call it again after changing a parsed configuration.
pub fn validate(config: &Config) -> Result<()> {
    // Check version
    if config.version != "1.0" {
        return Err(ConfigError::ValidationError(format!(
            "Unsupported version: {}, expected 1.0",
            config.version
        )));
    }

    if let Some(level) = &config.settings.log_level
        && !LOG_LEVELS.contains(&level.to_lowercase().as_str())
    {
        return Err(ConfigError::ValidationError(format!(
            "Unknown log level '{}', expected one of: {}",
            level,
            LOG_LEVELS.join(", ")
        )));
    }

    // Phase names must be usable as distinct keys
    let names = config.phase_names();
    let mut seen: Vec<(String, &str)> = Vec::new();
    for (slot, name) in names.iter() {
        if name.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "Phase name for '{}' is empty",
                slot
            )));
        }

        let key = name.to_lowercase();
        if let Some((_, other)) = seen.iter().find(|(seen_key, _)| *seen_key == key) {
            return Err(ConfigError::ValidationError(format!(
                "Phase names '{}' and '{}' collide",
                other, name
            )));
        }
        seen.push((key, name));
    }

    for (base, options) in &config.actions {
        if base.is_empty() {
            return Err(ConfigError::ValidationError(
                "Action names must not be empty".to_string(),
            ));
        }

        if !is_plain_object(options) && !options.is_null() {
            return Err(ConfigError::ValidationError(format!(
                "Options for action '{}' must be a mapping",
                base
            )));
        }
    }

    Ok(())
}

/// Substitute environment variables in a string
///
/// Supports `${VAR}` and `${VAR:-default}`.
pub fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}")
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
    let mut result = input.to_string();
    let mut errors = Vec::new();

    for cap in re.captures_iter(input) {
        let full_match = &cap[0];
        let var_expr = &cap[1];

        // Handle default values: ${VAR:-default}
        let (var_name, default_value) = match var_expr.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (var_expr, None),
        };

        match std::env::var(var_name) {
            Ok(value) => {
                result = result.replace(full_match, &value);
            }
            Err(_) => match default_value {
                Some(default) => result = result.replace(full_match, default),
                None => errors.push(var_name.to_string()),
            },
        }
    }

    if !errors.is_empty() {
        return Err(ConfigError::EnvVarNotFound(errors.join(", ")));
    }

    Ok(result)
}
