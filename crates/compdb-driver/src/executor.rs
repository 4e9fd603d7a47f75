//! Step execution.

use compdb_core::CommandStep;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

/// Runs one step of a command plan and reports its exit code.
///
/// `None` means the process terminated without a status code (for example
/// on a signal). Launch failures are I/O errors.
pub trait TaskExecutor {
    fn run(
        &self,
        step: &CommandStep,
        working_directory: &Path,
        environment: &BTreeMap<String, String>,
    ) -> std::io::Result<Option<i32>>;
}

/// Executor backed by `std::process`, inheriting the parent's stdio so
/// build output reaches the user's terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl TaskExecutor for ProcessExecutor {
    fn run(
        &self,
        step: &CommandStep,
        working_directory: &Path,
        environment: &BTreeMap<String, String>,
    ) -> std::io::Result<Option<i32>> {
        let status = Command::new(&step.program)
            .args(&step.args)
            .current_dir(working_directory)
            .envs(environment)
            .status()?;
        Ok(status.code())
    }
}
