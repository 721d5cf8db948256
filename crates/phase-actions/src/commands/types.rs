use anyhow::Result;
use comfy_table::{Cell, Color, Table};
use phase_actions_config::Config;
use phase_actions_core::phase_set::PhaseSet;
use serde_json::{Map, Value, json};

pub fn run(config: &Config, base: &str, format: &str) -> Result<()> {
    // Validate format
    if format != "table" && format != "json" {
        anyhow::bail!("Invalid format: {}. Must be 'table' or 'json'", format);
    }

    let set = config.phase_set(base);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&to_json(&set))?);
    } else {
        display_table(&set);
    }

    Ok(())
}

fn to_json(set: &PhaseSet) -> Value {
    let phases: Map<String, Value> = set
        .iter()
        .map(|(key, descriptor)| (key.to_string(), Value::String(descriptor.to_string())))
        .collect();

    json!({
        "base": set.to_string(),
        "phases": phases,
    })
}

fn display_table(set: &PhaseSet) {
    let mut table = Table::new();
    table.set_header(vec!["KEY", "TYPE", "META"]);

    table.add_row(vec![
        Cell::new("(base)").fg(Color::DarkGrey),
        Cell::new(set.base()),
        Cell::new("-"),
    ]);

    for (key, descriptor) in set.iter() {
        let meta = if descriptor.has_meta() { "yes" } else { "-" };
        table.add_row(vec![Cell::new(key), Cell::new(descriptor), Cell::new(meta)]);
    }

    println!("{}", table);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json() {
        let set = Config::default().phase_set("load");
        assert_eq!(
            to_json(&set),
            json!({
                "base": "load",
                "phases": {"start": "LOAD_START", "success": "LOAD_SUCCESS", "error": "LOAD_ERROR"}
            })
        );
    }

    #[test]
    fn test_invalid_format() {
        let err = run(&Config::default(), "load", "yaml").unwrap_err();
        assert!(err.to_string().contains("Invalid format: yaml"));
    }
}
