//! The per-invocation generation request.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// A single compilation-database generation attempt.
///
/// One request owns one scratch file and yields one command plan. Nothing
/// outlives the invocation; there is no persisted state between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Correlation name matching termination events to this request.
    pub name: String,

    /// The Bazel executable to invoke.
    pub tool_path: PathBuf,

    /// Root of the compdb support repository. Bound to the
    /// `--override_repository` flag and the location of the
    /// post-processing script.
    pub repository_root: PathBuf,

    /// Bazel target labels, in the order they appear on the command line.
    ///
    /// Non-empty by precondition: configuration loading rejects an empty
    /// list before a request is ever constructed.
    pub targets: Vec<String>,

    /// Directory the build runs in.
    pub working_directory: PathBuf,

    /// Extra environment overrides for the spawned processes.
    pub environment: BTreeMap<String, String>,

    /// Uniquely generated path for the build-event JSON log. Owned
    /// exclusively by this request and removed by the plan's cleanup step.
    pub scratch_file_path: PathBuf,
}
