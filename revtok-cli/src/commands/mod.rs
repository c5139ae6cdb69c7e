//! CLI command implementations

use anyhow::Result;
use clap::{Args, Subcommand};
use revtok_core::{ExecutionMode, Strategy, TokenizerConfig};
use std::path::PathBuf;

use crate::config::CliConfig;

pub mod analyze;
pub mod bench;
pub mod fingerprint;
pub mod generate_config;
pub mod list;
pub mod reconstruct;
pub mod tokenize;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split input into a reversible token stream
    Tokenize(tokenize::TokenizeArgs),

    /// Rebuild the original bytes from a JSON token stream
    Reconstruct(reconstruct::ReconstructArgs),

    /// Compute whole-text fingerprint digits
    Fingerprint(fingerprint::FingerprintArgs),

    /// Report how well token streams compress
    Analyze(analyze::AnalyzeArgs),

    /// Run round-trip, uniqueness, determinism and stability checks
    Validate(validate::ValidateArgs),

    /// Time every strategy on the input
    Bench(bench::BenchArgs),

    /// Write a configuration file with default values
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: list::ListCommands,
    },
}

impl Commands {
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Tokenize(args) => args.execute(),
            Commands::Reconstruct(args) => args.execute(),
            Commands::Fingerprint(args) => args.execute(),
            Commands::Analyze(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::Bench(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
        }
    }
}

/// Flags shared by every command that logs
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl LogArgs {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when commands run in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

/// Tokenizer flags; each one overrides the configuration file
#[derive(Debug, Clone, Default, Args)]
pub struct TokenizerArgs {
    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed mixed into content hashes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Apply the embedding perturbation to digits
    #[arg(long)]
    pub embedding: bool,

    /// Width of fixed subword pieces
    #[arg(long, value_name = "N")]
    pub subword_width: Option<usize>,

    /// Maximum BPE merges per window
    #[arg(long, value_name = "N")]
    pub bpe_merges: Option<usize>,

    /// Force chunked parallel processing even for small inputs
    #[arg(short, long, conflicts_with = "sequential")]
    pub parallel: bool,

    /// Never split the input into chunks
    #[arg(long)]
    pub sequential: bool,

    /// Number of worker threads (default: all cores)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Chunk size in KB for parallel processing
    #[arg(long, value_name = "KB")]
    pub chunk_kb: Option<usize>,
}

impl TokenizerArgs {
    /// Loads the configuration file (if any) and applies the flags on top
    pub fn load(&self) -> Result<(CliConfig, TokenizerConfig)> {
        let file = CliConfig::load_or_default(self.config.as_deref())?;
        let mut config = file.tokenizer_config();

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.embedding {
            config.embedding = true;
        }
        if let Some(width) = self.subword_width {
            config.segment.subword_width = width;
        }
        if self.bpe_merges.is_some() {
            config.segment.bpe_merges = self.bpe_merges;
        }
        if let Some(kb) = self.chunk_kb {
            config.chunk_size = kb * 1000;
        }
        if let Some(threads) = self.threads {
            config.max_threads = Some(threads);
        }

        config.execution_mode = if self.sequential {
            ExecutionMode::Sequential
        } else if self.parallel {
            ExecutionMode::Parallel {
                threads: self.threads.or(config.max_threads),
            }
        } else {
            ExecutionMode::Adaptive
        };

        config.validate()?;
        log::debug!("tokenizer configuration: {config:?}");
        Ok((file, config))
    }
}

/// Resolves the strategy flag, falling back to the configuration file
pub(crate) fn resolve_strategy(flag: Option<&str>, file: &CliConfig) -> Result<Strategy> {
    match flag {
        Some(name) => Ok(name.parse()?),
        None => file.strategy(),
    }
}
