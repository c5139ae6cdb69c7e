//! Error types for tokenization, reconstruction and coordination

use thiserror::Error;

/// Errors that can occur while segmenting or reconstructing text
#[derive(Debug, Error)]
pub enum Error {
    /// A strategy name that does not map to any known segmenter
    #[error("Unknown strategy: {name}")]
    UnknownStrategy { name: String },

    /// A token stream that cannot be inverted back into its source
    #[error("Token stream mismatch: {reason}")]
    StreamMismatch { reason: String },

    /// Input bytes are not valid UTF-8 for a text strategy
    #[error("Invalid UTF-8 in input at position {position}")]
    Encoding { position: usize },

    /// Invalid configuration parameters
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Chunk boundary calculation error
    #[error("Failed to calculate chunk boundaries: {reason}")]
    Chunking { reason: String },

    /// Thread pool construction or dispatch failure
    #[error("Parallel processing failed")]
    Parallel {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Preprocessing dropped information that cannot be restored
    #[error("Preprocessing is not reversible: {reason}")]
    NotReversible { reason: String },

    /// Reading input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn mismatch(reason: impl Into<String>) -> Self {
        Error::StreamMismatch {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            reason: reason.into(),
        }
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Encoding {
            position: err.valid_up_to(),
        }
    }
}

/// Result type for tokenizer operations
pub type Result<T> = std::result::Result<T, Error>;
