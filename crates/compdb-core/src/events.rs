//! Process-termination event source.
//!
//! Subscriptions are explicit handles: [`TerminationEvents::subscribe`]
//! returns a [`Subscription`] guard, and dropping it (or calling
//! [`Subscription::unsubscribe`]) removes the observer deterministically at
//! the end of the owning request's lifetime.

use std::sync::{Arc, Mutex, Weak};

/// Termination of an external process, as delivered to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminationEvent {
    /// Correlation name of the process that terminated.
    pub name: String,
    /// Exit status code; `None` when the status is unknown or absent.
    pub exit_code: Option<i32>,
}

type Callback = Box<dyn FnMut(&TerminationEvent) + Send>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
}

/// In-process dispatcher of [`TerminationEvent`]s.
///
/// Publishing delivers the event to every live subscriber, in subscription
/// order. Callbacks run with the registry locked and must not subscribe or
/// unsubscribe from within.
#[derive(Clone, Default)]
pub struct TerminationEvents {
    inner: Arc<Mutex<Registry>>,
}

impl TerminationEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer; the returned guard keeps it alive.
    pub fn subscribe(&self, callback: impl FnMut(&TerminationEvent) + Send + 'static) -> Subscription {
        let id = match self.inner.lock() {
            Ok(mut registry) => {
                let id = registry.next_id;
                registry.next_id += 1;
                registry.subscribers.push((id, Box::new(callback)));
                id
            }
            Err(_) => u64::MAX,
        };

        Subscription {
            registry: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver an event to every live subscriber.
    pub fn publish(&self, event: &TerminationEvent) {
        let Ok(mut registry) = self.inner.lock() else {
            return;
        };
        for (_, callback) in registry.subscribers.iter_mut() {
            callback(event);
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().map(|r| r.subscribers.len()).unwrap_or(0)
    }
}

/// Guard for one registered observer. Dropping it removes the observer.
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    id: u64,
}

impl Subscription {
    /// Remove the observer now rather than at scope end.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.lock() {
                registry.subscribers.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, exit_code: Option<i32>) -> TerminationEvent {
        TerminationEvent {
            name: name.to_string(),
            exit_code,
        }
    }

    #[test]
    fn delivers_to_subscriber() {
        let events = TerminationEvents::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let _subscription = events.subscribe({
            let seen = Arc::clone(&seen);
            move |event| seen.lock().unwrap().push(event.clone())
        });

        events.publish(&event("build", Some(0)));
        assert_eq!(seen.lock().unwrap().as_slice(), &[event("build", Some(0))]);
    }

    #[test]
    fn drop_stops_delivery() {
        let events = TerminationEvents::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let subscription = events.subscribe({
            let seen = Arc::clone(&seen);
            move |event| seen.lock().unwrap().push(event.clone())
        });
        assert_eq!(events.subscriber_count(), 1);

        drop(subscription);
        assert_eq!(events.subscriber_count(), 0);

        events.publish(&event("build", Some(0)));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn explicit_unsubscribe() {
        let events = TerminationEvents::new();
        let subscription = events.subscribe(|_| {});

        subscription.unsubscribe();
        assert_eq!(events.subscriber_count(), 0);
    }

    #[test]
    fn multiple_subscribers_all_receive() {
        let events = TerminationEvents::new();
        let first = Arc::new(Mutex::new(0u32));
        let second = Arc::new(Mutex::new(0u32));

        let _a = events.subscribe({
            let first = Arc::clone(&first);
            move |_| *first.lock().unwrap() += 1
        });
        let _b = events.subscribe({
            let second = Arc::clone(&second);
            move |_| *second.lock().unwrap() += 1
        });

        events.publish(&event("build", Some(1)));
        assert_eq!(*first.lock().unwrap(), 1);
        assert_eq!(*second.lock().unwrap(), 1);
    }
}
