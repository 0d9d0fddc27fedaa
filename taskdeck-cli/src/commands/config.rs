use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::ValueEnum;
use shared::config::{ClientConfig, ConfigFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Yaml,
    Json,
    Toml,
}

impl From<FormatArg> for ConfigFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Yaml => Self::Yaml,
            FormatArg::Json => Self::Json,
            FormatArg::Toml => Self::Toml,
        }
    }
}

/// Render the default configuration to stdout or `output`.
///
/// # Errors
/// Returns an error if rendering or writing the file fails.
pub fn generate_config(format: FormatArg, output: Option<&Path>) -> Result<()> {
    let rendered = ClientConfig::with_defaults().render(format.into())?;

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "Configuration file '{}' generated successfully.",
                path.display()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
