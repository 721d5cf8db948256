use anyhow::{Context, Result};
use phase_actions_config::Config;
use phase_actions_core::message::Message;
use serde_json::Value;

pub fn run(
    config: &Config,
    base: &str,
    args: &[String],
    phase: Option<&str>,
    error: Option<&str>,
) -> Result<()> {
    let message = build_message(config, base, args, phase, error)?;
    println!("{}", serde_json::to_string_pretty(&message)?);
    Ok(())
}

/// Build the message for a base name, optional phase key and raw JSON arguments
fn build_message(
    config: &Config,
    base: &str,
    args: &[String],
    phase: Option<&str>,
    error: Option<&str>,
) -> Result<Message> {
    let set = config.phase_set(base);

    let descriptor = match phase {
        Some(key) => set.phase(&key.to_lowercase()).with_context(|| {
            format!(
                "No phase '{}' on '{}', available: {}",
                key,
                base,
                set.keys().collect::<Vec<_>>().join(", ")
            )
        })?,
        None => set.base(),
    };

    if let Some(text) = error {
        return descriptor.reject(&anyhow::Error::msg(text.to_string()));
    }

    let values = args
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            serde_json::from_str::<Value>(raw)
                .with_context(|| format!("Argument {} is not valid JSON: {}", i + 1, raw))
        })
        .collect::<Result<Vec<_>>>()?;

    descriptor.invoke(&values)
}
