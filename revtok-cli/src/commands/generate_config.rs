//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::config::CliConfig;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        let content = format!(
            "# revtok configuration\n# Command-line flags override these values.\n\n{}",
            CliConfig::default().to_toml()?
        );

        let Some(path) = &self.output else {
            print!("{content}");
            return Ok(());
        };

        if path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
        eprintln!("Configuration written to {}", path.display());
        eprintln!("Use it with: revtok tokenize --config {}", path.display());
        Ok(())
    }
}
