use anyhow::{Context, Result};
use phase_actions_config::{Config, parser};
use serde_json::Value;
use std::path::Path;

pub fn run(config_path: &Path) -> Result<()> {
    println!("Validating {}...", config_path.display());

    // Try to parse the configuration
    let config = parser::parse_file(config_path).context("Failed to parse configuration")?;

    // Basic validation is done during parsing
    println!("✓ Configuration valid");
    println!("  Version: {}", config.version);

    if let Some(name) = &config.name {
        println!("  Name: {}", name);
    }

    let names = config.phase_names();
    println!(
        "  Phases: {}, {}, {}",
        names.start, names.success, names.error
    );
    println!("  Actions: {}", config.actions.len());

    // Options for phases that do not exist are never used
    for (action, unknown) in unused_phase_options(&config) {
        println!(
            "  ⚠ Action '{}' has options for unknown phases: {}",
            action,
            unknown.join(", ")
        );
    }

    Ok(())
}

/// Actions whose options name phases that are not configured
fn unused_phase_options(config: &Config) -> Vec<(String, Vec<String>)> {
    let names = config.phase_names();
    let mut actions: Vec<_> = config.actions.iter().collect();
    actions.sort_by(|a, b| a.0.cmp(b.0));

    actions
        .into_iter()
        .filter_map(|(action, options)| {
            let Value::Object(phases) = options else {
                return None;
            };
            let unknown: Vec<String> = phases
                .keys()
                .filter(|phase| !names.iter().any(|(_, name)| name == phase.as_str()))
                .cloned()
                .collect();
            (!unknown.is_empty()).then(|| (action.clone(), unknown))
        })
        .collect()
}
