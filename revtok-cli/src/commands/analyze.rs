//! Analyze command implementation

use anyhow::Result;
use clap::Args;
use revtok_core::api::analyze_compression;
use revtok_core::{CompressionReport, Strategy};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use super::{resolve_strategy, LogArgs, TokenizerArgs};
use crate::input::InputArgs;
use crate::output::{open_writer, write_json};

/// Arguments for the analyze command
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Segmentation strategy to analyze
    #[arg(short, long, value_name = "NAME", conflicts_with = "all")]
    pub strategy: Option<String>,

    /// Analyze every strategy
    #[arg(long)]
    pub all: bool,

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
struct AnalysisRecord {
    source: String,
    reports: Vec<CompressionReport>,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub fn execute(&self) -> Result<()> {
        self.log.init_logging();

        let (file, config) = self.tokenizer.load()?;
        let strategies = if self.all {
            Strategy::ALL.to_vec()
        } else {
            vec![resolve_strategy(self.strategy.as_deref(), &file)?]
        };

        let mut records = Vec::new();
        for input in self.input.load()? {
            let text = input.text()?;
            let reports = strategies
                .iter()
                .map(|&strategy| analyze_compression(text, strategy, &config))
                .collect::<revtok_core::Result<Vec<_>>>()?;
            records.push(AnalysisRecord {
                source: input.name,
                reports,
            });
        }

        let mut writer = open_writer(self.output.as_deref())?;
        if self.json {
            return write_json(&mut writer, &records, file.output.pretty_json);
        }

        for record in &records {
            writeln!(writer, "# {}", record.source)?;
            for report in &record.reports {
                write_report(&mut writer, report)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

fn write_report(writer: &mut dyn Write, report: &CompressionReport) -> Result<()> {
    writeln!(
        writer,
        "{} ({} tokens)",
        report.strategy, report.original_token_count
    )?;
    writeln!(
        writer,
        "  {:<11} {:>6} {:>7} {:>6} {:>7}  reversible",
        "algorithm", "units", "ratio", "saved", "saved%"
    )?;
    for (algorithm, stats) in &report.per_algorithm {
        writeln!(
            writer,
            "  {:<11} {:>6} {:>7.3} {:>6} {:>6.1}%  {}",
            algorithm.name(),
            stats.compressed_units,
            stats.compression_ratio,
            stats.tokens_saved,
            stats.percentage_saved,
            if stats.is_reversible { "yes" } else { "no" }
        )?;
    }
    if let Some((algorithm, stats)) = report.best() {
        writeln!(
            writer,
            "  best: {algorithm} (ratio {:.3})",
            stats.compression_ratio
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use revtok_core::api::compression_report;
    use revtok_core::Tokenizer;

    #[test]
    fn test_report_table() {
        let stream = Tokenizer::new()
            .unwrap()
            .segment("la la la land", Strategy::Word)
            .unwrap();
        let mut buffer = Vec::new();
        write_report(&mut buffer, &compression_report(&stream)).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with("word (7 tokens)"));
        for name in ["rle", "pattern", "dictionary", "adaptive"] {
            assert!(output.contains(name), "missing {name}");
        }
        assert!(output.contains("best: "));
    }
}
