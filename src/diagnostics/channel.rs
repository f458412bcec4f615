//! Subscriber registry and synchronous fan-out.
//!
//! # Responsibilities
//! - Register any number of subscribers
//! - Deliver every published message to every subscriber, in registration
//!   order, on the publisher's task
//!
//! # Design Decisions
//! - No hidden globals: the channel is an explicitly constructed handle,
//!   cloned into whatever owns it
//! - Read-mostly registry: subscription normally happens once at startup,
//!   so publishes take a read lock on the common path
//! - Publish has no return value and no failure mode; zero subscribers is
//!   a no-op

use std::sync::{Arc, RwLock};

/// A registered diagnostics handler.
pub type Subscriber = Box<dyn Fn(&str) + Send + Sync>;

/// Publish point for human-readable relay status messages.
///
/// This is the only channel through which suppressed failures are surfaced:
/// callers relying solely on a dispatch's return value cannot distinguish a
/// genuine empty success from a suppressed failure.
#[derive(Clone, Default)]
pub struct Diagnostics {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
}

impl Diagnostics {
    /// Create a channel with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every subsequently published message.
    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let mut subscribers = self
            .subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.push(Box::new(handler));
    }

    /// Deliver `message` to every subscriber, synchronously, in
    /// registration order.
    pub fn publish(&self, message: &str) {
        let subscribers = self
            .subscribers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for subscriber in subscribers.iter() {
            subscriber(message);
        }
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn publish_without_subscribers_is_noop() {
        let diagnostics = Diagnostics::new();
        diagnostics.publish("nobody listening");
    }

    #[test]
    fn delivers_to_all_subscribers_in_order() {
        let diagnostics = Diagnostics::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let seen = Arc::clone(&seen);
            diagnostics.subscribe(move |msg| {
                seen.lock().unwrap().push(format!("{}:{}", tag, msg));
            });
        }

        diagnostics.publish("hello");

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec!["first:hello", "second:hello", "third:hello"]);
    }

    #[test]
    fn clones_share_one_registry() {
        let diagnostics = Diagnostics::new();
        let clone = diagnostics.clone();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        clone.subscribe(move |msg| sink.lock().unwrap().push(msg.to_string()));

        diagnostics.publish("shared");
        assert_eq!(*seen.lock().unwrap(), vec!["shared"]);
    }
}
