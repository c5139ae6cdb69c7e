//! Validate command implementation

use anyhow::Result;
use clap::Args;
use revtok_core::application::{
    stability_check, validate_all, StabilityReport, ValidationReport,
};
use revtok_core::Tokenizer;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use super::{LogArgs, TokenizerArgs};
use crate::error::CliError;
use crate::input::InputArgs;
use crate::output::{open_writer, write_json};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Also segment each input N times per strategy and compare the runs
    #[arg(long, value_name = "N")]
    pub stability: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub tokenizer: TokenizerArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Serialize)]
struct ValidationRecord {
    source: String,
    validation: ValidationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    stability: Option<StabilityReport>,
}

impl ValidationRecord {
    fn passed(&self) -> bool {
        self.validation.all_passed()
            && self
                .stability
                .as_ref()
                .map_or(true, StabilityReport::stable)
    }
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        self.log.init_logging();

        let (_, config) = self.tokenizer.load()?;
        let tokenizer = Tokenizer::with_config(config)?;

        let mut records = Vec::new();
        for input in self.input.load()? {
            let text = input.text()?;
            log::info!("Validating {} ({} bytes)", input.name, text.len());
            records.push(ValidationRecord {
                validation: validate_all(&tokenizer, text),
                stability: self
                    .stability
                    .map(|iterations| stability_check(&tokenizer, text, iterations)),
                source: input.name,
            });
        }

        let mut writer = open_writer(self.output.as_deref())?;
        if self.json {
            write_json(&mut writer, &records, true)?;
        } else {
            for record in &records {
                write_record(&mut writer, record)?;
            }
            writer.flush()?;
        }

        let failed: Vec<&str> = records
            .iter()
            .filter(|record| !record.passed())
            .map(|record| record.source.as_str())
            .collect();
        if failed.is_empty() {
            Ok(())
        } else {
            Err(CliError::ValidationFailed(failed.join(", ")).into())
        }
    }
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "FAIL"
    }
}

fn write_record(writer: &mut dyn Write, record: &ValidationRecord) -> Result<()> {
    writeln!(
        writer,
        "# {} ({} bytes)",
        record.source, record.validation.text_length
    )?;
    writeln!(
        writer,
        "  {:<18} {:>7} {:>10} {:>6} {:>13} {:>8} {:>11}",
        "strategy", "tokens", "reversible", "unique", "deterministic", "parallel", "compression"
    )?;
    for (strategy, result) in &record.validation.per_strategy {
        writeln!(
            writer,
            "  {:<18} {:>7} {:>10} {:>6} {:>13} {:>8} {:>11}",
            strategy.name(),
            result.token_count,
            mark(result.reversible),
            mark(result.unique_ids),
            mark(result.deterministic),
            mark(result.parallel_consistent),
            mark(result.compression_reversible)
        )?;
        for error in &result.errors {
            writeln!(writer, "    error: {error}")?;
        }
    }

    if let Some(stability) = &record.stability {
        writeln!(writer, "  stability: {}", mark(stability.stable()))?;
        for error in stability.errors() {
            writeln!(writer, "    error: {error}")?;
        }
    }

    writeln!(
        writer,
        "  result: {}",
        if record.passed() { "passed" } else { "failed" }
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_passes() {
        let tokenizer = Tokenizer::new().unwrap();
        let text = "The quick brown fox, again and again.";
        let record = ValidationRecord {
            source: "<text>".into(),
            validation: validate_all(&tokenizer, text),
            stability: Some(stability_check(&tokenizer, text, 3)),
        };
        assert!(record.passed());

        let mut buffer = Vec::new();
        write_record(&mut buffer, &record).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("subword_bpe"));
        assert!(output.contains("stability: ok"));
        assert!(output.ends_with("result: passed\n"));
    }
}
