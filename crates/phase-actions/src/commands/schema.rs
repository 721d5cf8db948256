use anyhow::Result;
use phase_actions_core::message::Message;

pub fn run() -> Result<()> {
    let schema = schemars::schema_for!(Message);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
