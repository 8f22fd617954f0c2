//! Error types for configuration resolution and emission.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience Result type with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while resolving or writing the build configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Target architecture family is not one we have compile options for
    #[error("Unknown arch \"{barch}\" detected, can't setup compile options")]
    UnknownArch { barch: String },

    /// A setting was assigned twice during resolution
    #[error("Setting {0} was already resolved")]
    DuplicateSetting(String),

    /// Failed to write the generated config file
    #[error("Failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
