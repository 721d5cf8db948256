//! # Phase Actions Configuration
//!
//! YAML configuration for phase-actions.
//!
//! This crate parses `phase-actions.yaml` files holding the phase name triple
//! and declarative per-action options, and turns them into the core crate's
//! factory and option types.

#![warn(missing_docs)]

use phase_actions_core::options::ActionOptions;
use phase_actions_core::phase_set::{PhaseNames, PhaseSet, PhaseSetFactory};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

pub mod parser;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// Environment variable not found
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Optional configuration name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Global settings
    #[serde(default, skip_serializing_if = "Settings::is_default")]
    pub settings: Settings,

    /// Phase name overrides
    #[serde(default, skip_serializing_if = "Phases::is_default")]
    pub phases: Phases,

    /// Declarative options per base action name
    #[serde(default)]
    pub actions: HashMap<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            description: None,
            settings: Settings::default(),
            phases: Phases::default(),
            actions: HashMap::new(),
        }
    }
}

impl Config {
    /// The configured phase names, defaults filled in
    pub fn phase_names(&self) -> PhaseNames {
        self.phases.resolve()
    }

    /// A phase-set factory using the configured phase names
    pub fn factory(&self) -> PhaseSetFactory {
        PhaseSetFactory::with_phase_names(self.phase_names())
    }

    /// Options declared for a base action name
    pub fn action_options(&self, base: &str) -> Option<ActionOptions> {
        self.actions.get(base).map(ActionOptions::from_json)
    }

    /// Build the phase set for a base name with its declared options
    pub fn phase_set(&self, base: &str) -> PhaseSet {
        let options = self.action_options(base);
        self.factory().create(base, options.as_ref())
    }
}

/// Global settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    /// Default log level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Settings {
    /// Check if settings are default (all None)
    fn is_default(&self) -> bool {
        self == &Settings::default()
    }
}

/// Phase name overrides; unset names keep their defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Phases {
    /// Start phase name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    /// Success phase name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,

    /// Error phase name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Phases {
    fn is_default(&self) -> bool {
        self == &Phases::default()
    }

    /// Fill unset names from the defaults
    pub fn resolve(&self) -> PhaseNames {
        let defaults = PhaseNames::default();
        PhaseNames::new(
            self.start.clone().unwrap_or(defaults.start),
            self.success.clone().unwrap_or(defaults.success),
            self.error.clone().unwrap_or(defaults.error),
        )
    }
}
