//! List command implementation

use anyhow::Result;
use clap::Subcommand;
use revtok_core::{CompressionAlgorithm, Strategy};

/// Things `revtok list` can print
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List segmentation strategies
    Strategies,

    /// List compression techniques
    Algorithms,

    /// List output formats
    Formats,
}

impl ListCommands {
    pub fn execute(&self) -> Result<()> {
        for line in self.lines() {
            println!("{line}");
        }
        Ok(())
    }

    fn lines(&self) -> Vec<String> {
        match self {
            ListCommands::Strategies => Strategy::ALL
                .iter()
                .map(|s| format!("{:<18} {}", s.name(), strategy_summary(*s)))
                .collect(),
            ListCommands::Algorithms => CompressionAlgorithm::ALL
                .iter()
                .map(|a| a.name().to_string())
                .collect(),
            ListCommands::Formats => vec![
                "text       One token per line, tab separated".to_string(),
                "json       Token stream documents (input for `revtok reconstruct`)".to_string(),
                "markdown   Token table per input".to_string(),
            ],
        }
    }
}

fn strategy_summary(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Space => "whitespace and non-whitespace runs",
        Strategy::Word => "word runs, other characters one by one",
        Strategy::Char => "one token per character",
        Strategy::Grammar => "word, punctuation and whitespace runs",
        Strategy::SubwordFixed => "word runs cut into fixed-width pieces",
        Strategy::SubwordBpe => "word runs merged by pair frequency",
        Strategy::SubwordSyllable => "word runs cut after vowels",
        Strategy::SubwordFrequency => "word runs cut around repeated substrings",
        Strategy::Byte => "one token per byte",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_strategy_listed() {
        let lines = ListCommands::Strategies.lines();
        assert_eq!(lines.len(), Strategy::ALL.len());
        assert!(lines[5].starts_with("subword_bpe"));
    }

    #[test]
    fn test_algorithms() {
        assert_eq!(
            ListCommands::Algorithms.lines(),
            vec!["rle", "pattern", "dictionary", "adaptive"]
        );
    }
}
