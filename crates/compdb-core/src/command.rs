//! Command planning.
//!
//! A [`CommandPlan`] is the exact sequence of external invocations for one
//! generation request: the Bazel build with the compilation-database aspect
//! injected, the post-processing script over the build-event log, and the
//! removal of the log. Planning is pure: no I/O, no execution, and it cannot
//! fail on a well-formed request.

use crate::request::GenerationRequest;

/// Internal name the support repository is bound to via
/// `--override_repository`.
pub const SUPPORT_REPOSITORY: &str = "bazel_vscode_compdb";

/// Aspect injected into the build to emit compilation-database fragments.
pub const ASPECT_FLAG: &str =
    "--aspects=@bazel_vscode_compdb//:aspects.bzl%compilation_database_aspect";

/// Output groups carrying the aspect's artifacts.
pub const OUTPUT_GROUPS_FLAG: &str = "--output_groups=compdb_files,header_files";

/// Name of the post-processing script under the support repository root.
pub const POSTPROCESS_SCRIPT: &str = "postprocess.py";

/// One external invocation: a program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStep {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandStep {
    fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

/// The three-step plan for one generation request.
///
/// The steps are executed individually, each with its own success check;
/// the cleanup step runs even when an earlier step failed. The historical
/// single-shell rendering is available through [`CommandPlan::shell_args`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    /// Bazel build with the aspect injected and the event log captured.
    pub build: CommandStep,
    /// Post-processing script consuming the build-event log.
    pub postprocess: CommandStep,
    /// Removal of the build-event log.
    pub cleanup: CommandStep,
}

impl CommandPlan {
    /// Build the plan for a request. Deterministic: identical requests
    /// yield identical plans.
    pub fn from_request(request: &GenerationRequest) -> Self {
        let scratch = request.scratch_file_path.display().to_string();

        let mut build_args = vec![
            "build".to_string(),
            format!(
                "--override_repository={}={}",
                SUPPORT_REPOSITORY,
                request.repository_root.display()
            ),
            ASPECT_FLAG.to_string(),
            "--color=no".to_string(),
            "--noshow_progress".to_string(),
            "--noshow_loading_progress".to_string(),
            OUTPUT_GROUPS_FLAG.to_string(),
            format!("--build_event_json_file={}", scratch),
        ];
        build_args.extend(request.targets.iter().cloned());

        let postprocess_program = request
            .repository_root
            .join(POSTPROCESS_SCRIPT)
            .display()
            .to_string();

        Self {
            build: CommandStep::new(request.tool_path.display().to_string(), build_args),
            postprocess: CommandStep::new(postprocess_program, vec!["-b".to_string(), scratch.clone()]),
            cleanup: CommandStep::new("rm", vec![scratch]),
        }
    }

    /// The steps in execution order.
    pub fn steps(&self) -> [&CommandStep; 3] {
        [&self.build, &self.postprocess, &self.cleanup]
    }

    /// Flatten the plan into the single `&&`-chained argument sequence
    /// passed to the build tool when the whole plan runs under one shell.
    ///
    /// The build tool itself is the program; its `build` subcommand is the
    /// first element of the returned vector.
    pub fn shell_args(&self) -> Vec<String> {
        let mut args = self.build.args.clone();
        args.push("&&".to_string());
        args.push(self.postprocess.program.clone());
        args.extend(self.postprocess.args.iter().cloned());
        args.push("&&".to_string());
        args.push(self.cleanup.program.clone());
        args.extend(self.cleanup.args.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn request(targets: &[&str]) -> GenerationRequest {
        GenerationRequest {
            name: "bazel-compdb".to_string(),
            tool_path: PathBuf::from("bazel"),
            repository_root: PathBuf::from("/repo"),
            targets: targets.iter().map(|t| t.to_string()).collect(),
            working_directory: PathBuf::from("."),
            environment: BTreeMap::new(),
            scratch_file_path: PathBuf::from("/tmp/xyz"),
        }
    }

    #[test]
    fn shell_args_match_full_template() {
        let plan = CommandPlan::from_request(&request(&["//foo:bar", "//baz:qux"]));

        assert_eq!(
            plan.shell_args(),
            vec![
                "build",
                "--override_repository=bazel_vscode_compdb=/repo",
                "--aspects=@bazel_vscode_compdb//:aspects.bzl%compilation_database_aspect",
                "--color=no",
                "--noshow_progress",
                "--noshow_loading_progress",
                "--output_groups=compdb_files,header_files",
                "--build_event_json_file=/tmp/xyz",
                "//foo:bar",
                "//baz:qux",
                "&&",
                "/repo/postprocess.py",
                "-b",
                "/tmp/xyz",
                "&&",
                "rm",
                "/tmp/xyz",
            ]
        );
    }

    #[test]
    fn targets_appear_verbatim_in_order() {
        let plan = CommandPlan::from_request(&request(&["//b:b", "//a:a", "//c:c"]));

        let args = &plan.build.args;
        let tail = &args[args.len() - 3..];
        assert_eq!(tail, &["//b:b", "//a:a", "//c:c"]);
    }

    #[test]
    fn planning_is_deterministic() {
        let req = request(&["//foo:bar"]);
        let first = CommandPlan::from_request(&req);
        let second = CommandPlan::from_request(&req);

        assert_eq!(first, second);
        assert_eq!(first.shell_args(), second.shell_args());
    }

    #[test]
    fn steps_decompose_the_chain() {
        let plan = CommandPlan::from_request(&request(&["//foo:bar"]));

        assert_eq!(plan.build.program, "bazel");
        assert_eq!(plan.build.args[0], "build");
        assert_eq!(plan.postprocess.program, "/repo/postprocess.py");
        assert_eq!(plan.postprocess.args, vec!["-b", "/tmp/xyz"]);
        assert_eq!(plan.cleanup.program, "rm");
        assert_eq!(plan.cleanup.args, vec!["/tmp/xyz"]);
    }

    #[test]
    fn scratch_path_flows_into_event_log_flag() {
        let mut req = request(&["//foo:bar"]);
        req.scratch_file_path = PathBuf::from("/tmp/other.json");

        let plan = CommandPlan::from_request(&req);
        assert!(plan
            .build
            .args
            .contains(&"--build_event_json_file=/tmp/other.json".to_string()));
    }
}
