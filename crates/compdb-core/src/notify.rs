//! User-facing notification sink.

use std::sync::Mutex;

/// Fire-and-forget sink for user-facing messages. No acknowledgment, no
/// return value; a sink that drops messages is a valid implementation.
pub trait Notifier {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// A recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Notifier that records every message, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices recorded so far, in order.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn info(&self, message: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(Notice::Info(message.to_string()));
        }
    }

    fn error(&self, message: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(Notice::Error(message.to_string()));
        }
    }
}
