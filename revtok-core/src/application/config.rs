//! Configuration for the application layer
//!
//! All process-wide knobs live in one [`TokenizerConfig`] value that is passed
//! by reference to every worker. Nothing is read from global state.

use crate::application::execution_mode::ExecutionMode;
use crate::domain::{PreprocessOptions, SegmentOptions};
use crate::error::{Error, Result};

/// Seed used when none is given
pub const DEFAULT_SEED: u64 = 12345;

/// Configuration options for tokenization
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TokenizerConfig {
    /// Seed mixed into every content hash
    pub seed: u64,

    /// Apply the one-step embedding perturbation to digits
    pub embedding: bool,

    /// Strategy parameters
    pub segment: SegmentOptions,

    /// Preprocessing applied by [`Tokenizer::segment_preprocessed`]
    ///
    /// [`Tokenizer::segment_preprocessed`]: crate::application::Tokenizer::segment_preprocessed
    pub preprocess: PreprocessOptions,

    /// Target size for each chunk in bytes
    pub chunk_size: usize,

    /// Minimum input size to trigger parallel processing
    pub parallel_threshold: usize,

    /// Maximum number of threads to use (None = use all available)
    pub max_threads: Option<usize>,

    /// How segmentation is scheduled
    pub execution_mode: ExecutionMode,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            embedding: false,
            segment: SegmentOptions::default(),
            preprocess: PreprocessOptions::default(),
            chunk_size: 50 * 1000,          // 50KB chunks
            parallel_threshold: 100 * 1000, // 100KB threshold for parallel
            max_threads: None,              // Use all available cores
            execution_mode: ExecutionMode::Adaptive,
        }
    }
}

impl TokenizerConfig {
    /// Creates a new builder for TokenizerConfig
    pub fn builder() -> TokenizerConfigBuilder {
        TokenizerConfigBuilder::new()
    }

    /// Creates a configuration optimized for small texts
    pub fn small_text() -> Self {
        Self {
            chunk_size: 8 * 1024,           // 8KB chunks
            parallel_threshold: usize::MAX, // Never use parallel
            execution_mode: ExecutionMode::Sequential,
            ..Default::default()
        }
    }

    /// Creates a configuration optimized for large texts
    pub fn large_text() -> Self {
        Self {
            chunk_size: 256 * 1024,         // 256KB chunks
            parallel_threshold: 512 * 1024, // 512KB threshold
            ..Default::default()
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::invalid_config("Chunk size must be greater than 0"));
        }

        if self.segment.subword_width == 0 {
            return Err(Error::invalid_config(
                "Subword width must be greater than 0",
            ));
        }

        if let Some(threads) = self.max_threads {
            if threads == 0 {
                return Err(Error::invalid_config("Max threads must be greater than 0"));
            }
        }

        if let ExecutionMode::Parallel { threads: Some(0) } = self.execution_mode {
            return Err(Error::invalid_config(
                "Parallel thread count must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Thread pool settings derived from this configuration
    #[cfg(feature = "parallel")]
    pub fn thread_pool_config(&self) -> ThreadPoolConfig {
        ThreadPoolConfig {
            num_threads: self.max_threads.unwrap_or_else(num_cpus::get),
            ..Default::default()
        }
    }
}

/// Builder for TokenizerConfig with fluent API
#[derive(Debug, Clone)]
pub struct TokenizerConfigBuilder {
    config: TokenizerConfig,
}

impl TokenizerConfigBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            config: TokenizerConfig::default(),
        }
    }

    /// Sets the hashing seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Enables or disables the embedding perturbation
    pub fn embedding(mut self, enabled: bool) -> Self {
        self.config.embedding = enabled;
        self
    }

    /// Sets the fixed subword width
    pub fn subword_width(mut self, width: usize) -> Self {
        self.config.segment.subword_width = width;
        self
    }

    /// Caps BPE merge iterations per window
    pub fn bpe_merges(mut self, merges: Option<usize>) -> Self {
        self.config.segment.bpe_merges = merges;
        self
    }

    /// Sets the preprocessing steps
    pub fn preprocess(mut self, options: PreprocessOptions) -> Self {
        self.config.preprocess = options;
        self
    }

    /// Sets the chunk size in bytes
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Sets the parallel processing threshold
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_threshold = threshold;
        self
    }

    /// Sets the maximum number of threads
    pub fn max_threads(mut self, threads: Option<usize>) -> Self {
        self.config.max_threads = threads;
        self
    }

    /// Sets the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.execution_mode = mode;
        self
    }

    /// Builds the configuration, validating parameters
    pub fn build(self) -> Result<TokenizerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Builds the configuration without validation (for testing)
    pub fn build_unchecked(self) -> TokenizerConfig {
        self.config
    }
}

impl Default for TokenizerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread pool configuration
#[cfg(feature = "parallel")]
#[derive(Debug, Clone)]
pub struct ThreadPoolConfig {
    /// Number of worker threads
    pub num_threads: usize,

    /// Stack size for worker threads (in bytes)
    pub stack_size: Option<usize>,

    /// Thread name prefix
    pub thread_name_prefix: String,
}

#[cfg(feature = "parallel")]
impl Default for ThreadPoolConfig {
    fn default() -> Self {
        Self {
            num_threads: num_cpus::get(),
            stack_size: None,
            thread_name_prefix: "revtok-worker".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TokenizerConfig::default();
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.chunk_size, 50_000);
        assert_eq!(config.parallel_threshold, 100_000);
        assert_eq!(config.segment.subword_width, 3);
        assert!(!config.embedding);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = TokenizerConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TokenizerConfig {
            max_threads: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TokenizerConfig::builder().subword_width(0).build_unchecked();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_builder() {
        let config = TokenizerConfig::builder()
            .seed(7)
            .embedding(true)
            .subword_width(4)
            .chunk_size(1024)
            .parallel_threshold(2048)
            .max_threads(Some(2))
            .execution_mode(ExecutionMode::Parallel { threads: Some(2) })
            .build()
            .unwrap();

        assert_eq!(config.seed, 7);
        assert!(config.embedding);
        assert_eq!(config.segment.subword_width, 4);
        assert_eq!(config.chunk_size, 1024);
        assert_eq!(config.parallel_threshold, 2048);
        assert_eq!(config.max_threads, Some(2));
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(TokenizerConfig::small_text().validate().is_ok());
        assert!(TokenizerConfig::large_text().validate().is_ok());
        assert_eq!(
            TokenizerConfig::small_text().execution_mode,
            ExecutionMode::Sequential
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_thread_pool_config() {
        let config = TokenizerConfig::builder()
            .max_threads(Some(3))
            .build()
            .unwrap();
        let pool = config.thread_pool_config();
        assert_eq!(pool.num_threads, 3);
        assert_eq!(pool.thread_name_prefix, "revtok-worker");
    }
}
