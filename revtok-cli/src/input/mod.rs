//! Input handling module

pub mod file_reader;
pub mod glob_resolver;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;

use anyhow::{Context, Result};
use clap::Args;

/// Where a command reads its text from
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Input files or patterns (supports glob); stdin when neither this nor
    /// --text is given
    #[arg(short, long, value_name = "FILE/PATTERN", conflicts_with = "text")]
    pub input: Vec<String>,

    /// Literal text to process
    #[arg(long, value_name = "TEXT")]
    pub text: Option<String>,
}

/// Input bytes plus a display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedInput {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl NamedInput {
    /// Decodes the bytes as UTF-8
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.bytes).with_context(|| format!("{} is not valid UTF-8", self.name))
    }
}

impl InputArgs {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            input: Vec::new(),
            text: Some(text.into()),
        }
    }

    /// True when inputs come from files
    pub fn is_files(&self) -> bool {
        self.text.is_none() && !self.input.is_empty()
    }

    /// Reads every input fully
    pub fn load(&self) -> Result<Vec<NamedInput>> {
        if let Some(text) = &self.text {
            return Ok(vec![NamedInput {
                name: "<text>".to_string(),
                bytes: text.as_bytes().to_vec(),
            }]);
        }

        if self.input.is_empty() {
            return Ok(vec![NamedInput {
                name: "<stdin>".to_string(),
                bytes: FileReader::read_stdin()?,
            }]);
        }

        resolve_patterns(&self.input)?
            .into_iter()
            .map(|path| {
                log::debug!(
                    "Reading {} ({} bytes)",
                    path.display(),
                    FileReader::file_size(&path)?
                );
                Ok(NamedInput {
                    name: path.display().to_string(),
                    bytes: FileReader::read_bytes(&path)?,
                })
            })
            .collect()
    }
}
