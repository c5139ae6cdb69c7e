//! Configuration module
//!
//! An optional TOML file supplies defaults; command-line flags override it.

use anyhow::{Context, Result};
use revtok_core::domain::{PreprocessOptions, WhitespaceMode};
use revtok_core::{ExecutionMode, Strategy, TokenizerConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CliError;
use crate::input::FileReader;

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Tokenizer configuration
    #[serde(default)]
    pub tokenizer: TokenizerSection,

    /// Preprocessing configuration
    #[serde(default)]
    pub preprocess: PreprocessSection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Tokenizer-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TokenizerSection {
    /// Default strategy name
    pub strategy: String,

    /// Seed mixed into every content hash
    pub seed: u64,

    /// Apply the embedding perturbation to digits
    pub embedding: bool,

    /// Width of fixed subword pieces
    pub subword_width: usize,

    /// BPE merge cap per window (unset = half the window)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpe_merges: Option<usize>,

    /// Chunk size for parallel processing (KB)
    pub chunk_size_kb: usize,

    /// Input size above which processing goes parallel (KB)
    pub parallel_threshold_kb: usize,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl Default for TokenizerSection {
    fn default() -> Self {
        let defaults = TokenizerConfig::default();
        Self {
            strategy: Strategy::Word.name().to_string(),
            seed: defaults.seed,
            embedding: defaults.embedding,
            subword_width: defaults.segment.subword_width,
            bpe_merges: defaults.segment.bpe_merges,
            chunk_size_kb: defaults.chunk_size / 1000,
            parallel_threshold_kb: defaults.parallel_threshold / 1000,
            worker_threads: 0,
        }
    }
}

/// Preprocessing-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct PreprocessSection {
    pub lowercase: bool,
    pub drop_specials: bool,
    pub whitespace: WhitespaceMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_letter_repeat: Option<usize>,
}

impl From<&PreprocessSection> for PreprocessOptions {
    fn from(section: &PreprocessSection) -> Self {
        PreprocessOptions {
            lowercase: section.lowercase,
            drop_specials: section.drop_specials,
            whitespace: section.whitespace,
            max_letter_repeat: section.max_letter_repeat,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Loads a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = FileReader::read_text(path)?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Loads the file if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The configured default strategy
    pub fn strategy(&self) -> Result<Strategy> {
        Ok(self.tokenizer.strategy.parse()?)
    }

    /// Converts the file settings into a core tokenizer configuration
    pub fn tokenizer_config(&self) -> TokenizerConfig {
        let section = &self.tokenizer;
        let max_threads = (section.worker_threads > 0).then_some(section.worker_threads);

        TokenizerConfig::builder()
            .seed(section.seed)
            .embedding(section.embedding)
            .subword_width(section.subword_width)
            .bpe_merges(section.bpe_merges)
            .preprocess(PreprocessOptions::from(&self.preprocess))
            .chunk_size(section.chunk_size_kb.max(1) * 1000)
            .parallel_threshold(section.parallel_threshold_kb * 1000)
            .max_threads(max_threads)
            .execution_mode(ExecutionMode::Adaptive)
            .build_unchecked()
    }
}
