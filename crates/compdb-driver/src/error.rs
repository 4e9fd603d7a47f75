//! Error types for compdb-driver.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, DriverError>;

/// Errors scoped to a single generation attempt. Nothing here is fatal to
/// the hosting process.
#[derive(Error, Diagnostic, Debug)]
pub enum DriverError {
    /// Configuration was absent or invalid.
    #[error(transparent)]
    Config(#[from] compdb_config::ConfigError),

    /// The Bazel executable could not be found.
    #[error("bazel executable not found: {0}")]
    #[diagnostic(help("install bazel or set the \"tool\" key in compdb.toml"))]
    ToolNotFound(String),

    /// The support repository location is unknown.
    #[error(
        "The compdb support repository path is not configured. \
         Pass --repository or set the \"repository_root\" key in compdb.toml"
    )]
    MissingRepositoryRoot,

    /// Could not create the scratch file for the build-event log.
    #[error("Failed to create a scratch file for the build-event log")]
    Scratch(#[source] std::io::Error),

    /// A step could not be launched at all.
    #[error("Failed to launch the {step} step")]
    Spawn {
        step: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A step ran and exited unsuccessfully.
    #[error("The {step} step exited with status {code}")]
    StepFailed { step: &'static str, code: i32 },

    /// A step terminated without reporting a status code.
    #[error("The {step} step terminated without a status code")]
    StepInterrupted { step: &'static str },
}
