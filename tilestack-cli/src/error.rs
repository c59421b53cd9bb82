//! CLI error type.

use thiserror::Error;
use tilestack::config::ConfigError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A flag or setting was missing or invalid.
    #[error("{0}")]
    Config(String),

    /// The configuration file could not be read or written.
    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    /// An output file could not be written.
    #[error("failed to write {path}: {reason}")]
    Output { path: String, reason: String },

    /// The window or its GPU surface could not be created.
    #[error("window error: {0}")]
    Window(String),
}
