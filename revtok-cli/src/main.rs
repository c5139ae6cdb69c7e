//! revtok command-line entry point

use clap::Parser;
use revtok_cli::commands::Commands;
use std::process::ExitCode;

/// Deterministic, reversible text tokenization
#[derive(Debug, Parser)]
#[command(name = "revtok", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tokenize() {
        let cli = Cli::try_parse_from([
            "revtok", "tokenize", "--text", "hi", "-s", "bpe", "--seed", "7", "-f", "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Tokenize(args) => {
                assert_eq!(args.strategy.as_deref(), Some("bpe"));
                assert_eq!(args.tokenizer.seed, Some(7));
                assert_eq!(args.input.text.as_deref(), Some("hi"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parallel_conflicts_with_sequential() {
        assert!(
            Cli::try_parse_from(["revtok", "tokenize", "--parallel", "--sequential"]).is_err()
        );
    }
}
