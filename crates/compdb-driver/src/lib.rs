//! Request-scoped orchestration of a compilation-database generation run.
//!
//! The [`Generator`] owns the collaborators for one flow: a [`TaskExecutor`]
//! to run the plan's steps, a [`Notifier`] for user-facing messages, and a
//! [`TerminationEvents`] source feeding the completion observer. There are
//! no ambient registries; everything a run needs is held by the generator
//! and released when the run returns.

mod error;
mod executor;

pub use error::{DriverError, Result};
pub use executor::{ProcessExecutor, TaskExecutor};

use compdb_config::Settings;
use compdb_core::{
    CommandPlan, CommandStep, CompletionObserver, GenerationRequest, Notifier, TerminationEvent,
    TerminationEvents,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Correlation name under which the generation task runs.
pub const TASK_NAME: &str = "bazel-compdb";

/// Per-invocation options, typically from the command line.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Path to the `compdb.toml` configuration file.
    pub config_path: PathBuf,
    /// Support repository root, overriding the configuration.
    pub repository_root: Option<PathBuf>,
}

/// Notifier that writes through the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// Request-scoped context for running one generation flow.
pub struct Generator<E, N> {
    executor: E,
    notifier: Arc<N>,
    events: TerminationEvents,
}

impl<E, N> Generator<E, N>
where
    E: TaskExecutor,
    N: Notifier + Send + Sync + 'static,
{
    pub fn new(executor: E, notifier: N) -> Self {
        Self {
            executor,
            notifier: Arc::new(notifier),
            events: TerminationEvents::new(),
        }
    }

    /// The notification sink messages are delivered to.
    pub fn notifier(&self) -> &Arc<N> {
        &self.notifier
    }

    /// The termination-event source observers subscribe to.
    pub fn events(&self) -> &TerminationEvents {
        &self.events
    }

    /// Run the whole flow: load configuration, plan, execute the three
    /// steps, and announce completion through the observer.
    ///
    /// Configuration failures are reported through the notification sink
    /// and returned; nothing is executed in that case. A failing build or
    /// post-process step is returned as an error while the completion
    /// observer stays silent, and the scratch log is removed either way.
    pub fn run(&self, options: &GenerateOptions) -> Result<()> {
        let (settings, repository_root, working_directory) = self.resolve(options)?;

        self.notifier.info(&format!(
            "Building clang compilation database for {:?}",
            settings.targets
        ));

        which::which(&settings.tool)
            .map_err(|_| DriverError::ToolNotFound(settings.tool.clone()))?;

        let scratch = create_scratch_path()?;
        let request = assemble_request(&settings, repository_root, working_directory, scratch);
        let plan = CommandPlan::from_request(&request);

        tracing::debug!(
            tool = %request.tool_path.display(),
            command = %plan.shell_args().join(" "),
            "generation command"
        );

        let observer = Arc::new(Mutex::new(CompletionObserver::new(
            request.name.as_str(),
            Arc::clone(&self.notifier),
        )));
        let subscription = self.events.subscribe({
            let observer = Arc::clone(&observer);
            move |event| {
                if let Ok(mut observer) = observer.lock() {
                    observer.observe(event);
                }
            }
        });

        let (exit_code, outcome) = self.execute(&plan, &request);
        self.events.publish(&TerminationEvent {
            name: request.name.clone(),
            exit_code,
        });
        subscription.unsubscribe();

        outcome
    }

    /// Render the flat shell command for the configured targets without
    /// executing anything. The scratch path shown is a placeholder under
    /// the system temp directory.
    pub fn render_command(&self, options: &GenerateOptions) -> Result<String> {
        let (settings, repository_root, working_directory) = self.resolve(options)?;
        let scratch = std::env::temp_dir().join("compdb-events.json");
        let request = assemble_request(&settings, repository_root, working_directory, scratch);
        let plan = CommandPlan::from_request(&request);
        Ok(format!(
            "{} {}",
            request.tool_path.display(),
            plan.shell_args().join(" ")
        ))
    }

    fn resolve(&self, options: &GenerateOptions) -> Result<(Settings, PathBuf, PathBuf)> {
        let settings = Settings::load(&options.config_path).map_err(|err| {
            self.notifier.error(&err.to_string());
            DriverError::Config(err)
        })?;

        let repository_root = options
            .repository_root
            .clone()
            .or_else(|| settings.repository_root.clone())
            .ok_or(DriverError::MissingRepositoryRoot)?;

        let working_directory = settings
            .working_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        Ok((settings, repository_root, working_directory))
    }

    /// Execute the plan's steps with individual success checks. The
    /// cleanup step runs even when build or post-process failed; its own
    /// failure is logged but never masks the primary error.
    fn execute(
        &self,
        plan: &CommandPlan,
        request: &GenerationRequest,
    ) -> (Option<i32>, Result<()>) {
        let result = match self.run_step("build", &plan.build, request) {
            Ok(Some(0)) => match self.run_step("post-process", &plan.postprocess, request) {
                Ok(Some(0)) => (Some(0), Ok(())),
                Ok(Some(code)) => (
                    Some(code),
                    Err(DriverError::StepFailed {
                        step: "post-process",
                        code,
                    }),
                ),
                Ok(None) => (
                    None,
                    Err(DriverError::StepInterrupted {
                        step: "post-process",
                    }),
                ),
                Err(err) => (None, Err(err)),
            },
            Ok(Some(code)) => (
                Some(code),
                Err(DriverError::StepFailed {
                    step: "build",
                    code,
                }),
            ),
            Ok(None) => (None, Err(DriverError::StepInterrupted { step: "build" })),
            Err(err) => (None, Err(err)),
        };

        match self.run_step("cleanup", &plan.cleanup, request) {
            Ok(Some(0)) => {}
            Ok(code) => tracing::warn!(?code, "failed to remove the build-event log"),
            Err(err) => tracing::warn!(error = %err, "failed to remove the build-event log"),
        }

        result
    }

    fn run_step(
        &self,
        name: &'static str,
        step: &CommandStep,
        request: &GenerationRequest,
    ) -> Result<Option<i32>> {
        tracing::debug!(step = name, program = %step.program, "running step");
        self.executor
            .run(step, &request.working_directory, &request.environment)
            .map_err(|source| DriverError::Spawn { step: name, source })
    }
}

fn assemble_request(
    settings: &Settings,
    repository_root: PathBuf,
    working_directory: PathBuf,
    scratch: PathBuf,
) -> GenerationRequest {
    GenerationRequest {
        name: TASK_NAME.to_string(),
        tool_path: PathBuf::from(&settings.tool),
        repository_root,
        targets: settings.targets.clone(),
        working_directory,
        environment: settings.env.clone(),
        scratch_file_path: scratch,
    }
}

/// Create a fresh, uniquely named path for the build-event log. The file
/// is kept on disk; the plan's cleanup step removes it.
fn create_scratch_path() -> Result<PathBuf> {
    let file = tempfile::Builder::new()
        .prefix("compdb-events-")
        .suffix(".json")
        .tempfile()
        .map_err(DriverError::Scratch)?;
    let (_, path) = file.keep().map_err(|err| DriverError::Scratch(err.error))?;
    Ok(path)
}
