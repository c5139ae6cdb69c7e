//! Fingerprint command implementation

use anyhow::Result;
use clap::Args;
use revtok_core::api::{fingerprint, fingerprint_run_aware};
use revtok_core::{Script, TextSummary};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use super::LogArgs;
use crate::input::InputArgs;
use crate::output::{open_writer, write_json};

/// Arguments for the fingerprint command
#[derive(Debug, Args)]
pub struct FingerprintArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Weight repeated characters by their run position
    #[arg(long)]
    pub run_aware: bool,

    /// Apply the embedding perturbation to the signature digit
    #[arg(long)]
    pub embedding: bool,

    /// Print JSON instead of one line per input
    #[arg(long)]
    pub json: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Serialize)]
struct FingerprintRecord {
    source: String,
    script: &'static str,
    summary: TextSummary,
}

impl FingerprintArgs {
    /// Execute the fingerprint command
    pub fn execute(&self) -> Result<()> {
        self.log.init_logging();

        let mut records = Vec::new();
        for input in self.input.load()? {
            let text = input.text()?;
            let summary = if self.run_aware {
                fingerprint_run_aware(text, self.embedding)
            } else {
                fingerprint(text, self.embedding)
            };
            records.push(FingerprintRecord {
                script: Script::detect(text).name(),
                source: input.name,
                summary,
            });
        }

        let mut writer = open_writer(self.output.as_deref())?;
        if self.json {
            return write_json(&mut writer, &records, true);
        }

        for record in &records {
            let s = &record.summary;
            writeln!(
                writer,
                "{}\tscript={}\tsignature={}\tcompat={}\tfinal={}\tweighted={}\talphabetic={}",
                record.source,
                record.script,
                s.signature_digit,
                s.compat_digit,
                s.final_digit,
                s.weighted_sum,
                s.alphabetic_sum
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}
