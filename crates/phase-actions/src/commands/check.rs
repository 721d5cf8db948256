use anyhow::{Context, Result};
use phase_actions_core::fsa;
use serde_json::Value;
use std::io::Read;

pub fn run(input: &str) -> Result<()> {
    let text = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        input.to_string()
    };

    let value = check(&text)?;
    let kind = if fsa::is_error(&value) {
        "error message"
    } else {
        "message"
    };
    println!("✓ Standard {}", kind);

    Ok(())
}

/// Parse JSON text and confirm it has the standard message shape
fn check(text: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(text).context("Input is not valid JSON")?;
    fsa::validate(&value).context("Not a standard message")?;
    Ok(value)
}
