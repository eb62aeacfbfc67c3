use std::fs;
use std::io::Write;

use anyhow::{Context, Result, bail};
use shared::config::ClientConfig;

/// Writes a default client configuration to `newsdesk.yaml` or `newsdesk.json`.
pub fn generate_config(format: &str) -> Result<()> {
    let config = ClientConfig::with_defaults();
    let (file_name, serialized) = match format {
        "yaml" => ("newsdesk.yaml", serde_yml::to_string(&config)?),
        "json" => ("newsdesk.json", serde_json::to_string_pretty(&config)?),
        _ => bail!("Unsupported format. Use 'yaml' or 'json'."),
    };

    let mut file = fs::File::create(file_name)
        .with_context(|| format!("failed to create {file_name}"))?;
    file.write_all(serialized.as_bytes())?;

    println!("Configuration file '{file_name}' generated successfully.");
    Ok(())
}
