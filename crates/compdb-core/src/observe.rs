//! One-shot completion observation.

use crate::events::TerminationEvent;
use crate::notify::Notifier;

/// Message announced when a generation run completes successfully.
pub const COMPLETE_MESSAGE: &str = "Complete!";

/// Where the observer is in its one-shot lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverState {
    /// The process has been launched; no terminal event seen yet.
    Pending,
    /// The process terminated unsuccessfully; nothing was announced.
    DoneSilent,
    /// The process terminated successfully and completion was announced.
    DoneNotified,
}

/// Observer that turns one matching termination event into at most one
/// completion notification.
///
/// Events for other correlation names are ignored and leave the observer
/// pending. A matching event moves it to a terminal state exactly once:
/// exit code zero announces [`COMPLETE_MESSAGE`] through the sink, any
/// other (or absent) code stays silent. Terminal states ignore all further
/// events. There is no timeout: if no event ever arrives the observer
/// stays pending, which is accepted.
pub struct CompletionObserver<N> {
    name: String,
    state: ObserverState,
    notifier: N,
}

impl<N: Notifier> CompletionObserver<N> {
    pub fn new(name: impl Into<String>, notifier: N) -> Self {
        Self {
            name: name.into(),
            state: ObserverState::Pending,
            notifier,
        }
    }

    pub fn state(&self) -> ObserverState {
        self.state
    }

    /// Process one termination event.
    pub fn observe(&mut self, event: &TerminationEvent) {
        if self.state != ObserverState::Pending {
            return;
        }
        if event.name != self.name {
            return;
        }
        if event.exit_code != Some(0) {
            self.state = ObserverState::DoneSilent;
            return;
        }
        self.notifier.info(COMPLETE_MESSAGE);
        self.state = ObserverState::DoneNotified;
    }
}
