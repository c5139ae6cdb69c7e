//! revtok CLI library
//!
//! Command implementations, configuration files, input resolution and output
//! formatting for the `revtok` binary.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
