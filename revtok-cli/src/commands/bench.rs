//! Bench command implementation

use anyhow::Result;
use clap::Args;
use revtok_core::application::{benchmark, BenchmarkReport};
use revtok_core::Tokenizer;
use std::io::Write;
use std::path::PathBuf;

use super::{LogArgs, TokenizerArgs};
use crate::error::CliError;
use crate::input::InputArgs;
use crate::output::{open_writer, write_json};

/// Arguments for the bench command
#[derive(Debug, Args)]
pub struct BenchArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Round trips per strategy
    #[arg(short = 'n', long, default_value_t = 10)]
    pub iterations: usize,

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

impl BenchArgs {
    /// Execute the bench command
    pub fn execute(&self) -> Result<()> {
        self.log.init_logging();

        if self.iterations == 0 {
            return Err(CliError::ConfigError("iterations must be at least 1".into()).into());
        }

        let (_, config) = self.tokenizer.load()?;
        let tokenizer = Tokenizer::with_config(config)?;

        // Inputs are benchmarked as one concatenated text
        let mut text = String::new();
        for input in self.input.load()? {
            text.push_str(input.text()?);
        }

        log::info!(
            "Benchmarking {} bytes, {} iterations per strategy",
            text.len(),
            self.iterations
        );
        let report = benchmark(&tokenizer, &text, self.iterations);
        let threads = tokenizer.config().max_threads.unwrap_or_else(num_cpus::get);

        let mut writer = open_writer(self.output.as_deref())?;
        if self.json {
            return write_json(&mut writer, &report, true);
        }
        write_table(&mut writer, &report, threads)?;
        writer.flush()?;
        Ok(())
    }
}

fn write_table(writer: &mut dyn Write, report: &BenchmarkReport, threads: usize) -> Result<()> {
    writeln!(
        writer,
        "Text length: {} bytes, worker threads: {threads}",
        report.text_length
    )?;
    writeln!(
        writer,
        "{:<18} {:>12} {:>12} {:>12} {:>8}",
        "strategy", "avg", "min", "max", "success"
    )?;
    for (strategy, timing) in &report.per_strategy {
        writeln!(
            writer,
            "{:<18} {:>12} {:>12} {:>12} {:>7.0}%",
            strategy.name(),
            format!("{:.2?}", timing.avg_time),
            format!("{:.2?}", timing.min_time),
            format!("{:.2?}", timing.max_time),
            timing.success_rate * 100.0
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_strategy() {
        let tokenizer = Tokenizer::new().unwrap();
        let report = benchmark(&tokenizer, "tiny text", 2);
        let mut buffer = Vec::new();
        write_table(&mut buffer, &report, 4).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().count(), 2 + revtok_core::Strategy::ALL.len());
        assert!(output.starts_with("Text length: 9 bytes, worker threads: 4"));
        assert!(output.contains("100%"));
    }
}
