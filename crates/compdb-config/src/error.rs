//! Error types for compdb-config.

use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The target list is absent or empty.
    #[error(
        "The list of bazel targets to index for the compilation database is not configured. \
         Set the \"targets\" key in compdb.toml to a list of cc_library or cc_binary labels"
    )]
    MissingTargets,
}
