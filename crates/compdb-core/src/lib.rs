//! Core logic for the Bazel compilation-database generator.
//!
//! This crate provides:
//! - The [`GenerationRequest`] describing one generation attempt
//! - The [`CommandPlan`] builder (the exact Bazel + post-process + cleanup
//!   command sequence)
//! - The one-shot [`CompletionObserver`] that turns a process-termination
//!   event into a user-facing notification
//! - The [`TerminationEvents`] source with explicit subscription handles
//!
//! Everything here is side-effect free: planning produces argument vectors,
//! observation produces at most one message through a [`Notifier`]. Process
//! execution lives in `compdb-driver`.

mod command;
mod events;
mod notify;
mod observe;
mod request;

pub use command::{CommandPlan, CommandStep, ASPECT_FLAG, OUTPUT_GROUPS_FLAG, POSTPROCESS_SCRIPT, SUPPORT_REPOSITORY};
pub use events::{Subscription, TerminationEvent, TerminationEvents};
pub use notify::{MemoryNotifier, Notice, Notifier};
pub use observe::{CompletionObserver, ObserverState, COMPLETE_MESSAGE};
pub use request::GenerationRequest;
