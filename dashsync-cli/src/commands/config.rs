use anyhow::{Context, Result};
use shared::config::ClientConfig;

/// Prints the default configuration in the specified format.
///
/// # Arguments
/// * `format` - The format of the configuration file ("toml" or "json").
///
/// # Errors
/// Returns an error if the format is unsupported.
pub fn print_config(format: &str) -> Result<()> {
    let rendered = ClientConfig::with_defaults()
        .render(format)
        .with_context(|| format!("cannot render configuration as '{format}'"))?;
    println!("{rendered}");
    Ok(())
}
