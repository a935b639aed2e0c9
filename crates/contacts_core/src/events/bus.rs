//! In-process publish/subscribe bus keyed by event name.
//!
//! # Responsibility
//! - Deliver named events to zero or more subscribers without coupling
//!   producers to consumers.
//! - Isolate subscriber failures from the publisher and from each other.
//!
//! # Invariants
//! - Delivery order equals subscription order for one event name.
//! - The subscriber list is snapshotted under the lock and callbacks run
//!   after it is released; registrations made during delivery only affect
//!   later publishes.
//! - Unsubscribing is idempotent and removes exactly one registration.
//! - A panicking subscriber never prevents delivery to the others.

use crate::logging::panic_summary;
use log::{debug, warn};
use parking_lot::ReentrantMutex;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

const MAX_FAILURE_MESSAGE_CHARS: usize = 160;

/// Identifier of one registration; unique per bus instance.
pub type SubscriberId = u64;

type Callback<P> = Arc<dyn Fn(&P) + Send + Sync>;

/// Observer for subscriber failures swallowed during delivery.
pub type ErrorSink = Arc<dyn Fn(&SubscriberFailure) + Send + Sync>;

/// Describes one subscriber that panicked while handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberFailure {
    pub event_name: String,
    pub subscriber_id: SubscriberId,
    /// Sanitized panic payload, single line and length-capped.
    pub message: String,
}

struct Registration<P> {
    id: SubscriberId,
    callback: Callback<P>,
}

impl<P> Clone for Registration<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Arc::clone(&self.callback),
        }
    }
}

type Registry<P> = HashMap<String, Vec<Registration<P>>>;

struct BusShared<P> {
    registry: ReentrantMutex<RefCell<Registry<P>>>,
    next_id: AtomicU64,
    error_sink: Option<ErrorSink>,
}

/// Removal side of the registry, erased over the payload type so that
/// [`Subscription`] handles stay non-generic.
trait SubscriberRegistry: Send + Sync {
    fn remove(&self, event_name: &str, id: SubscriberId) -> bool;
}

impl<P> SubscriberRegistry for BusShared<P> {
    fn remove(&self, event_name: &str, id: SubscriberId) -> bool {
        let guard = self.registry.lock();
        let mut registry = guard.borrow_mut();
        let Some(entries) = registry.get_mut(event_name) else {
            return false;
        };
        let Some(position) = entries.iter().position(|entry| entry.id == id) else {
            return false;
        };
        entries.remove(position);
        if entries.is_empty() {
            registry.remove(event_name);
        }
        true
    }
}

/// Handle returned by [`EventBus::subscribe`].
///
/// Calling [`Subscription::unsubscribe`] removes the registration. Dropping
/// the handle leaves the registration in place.
pub struct Subscription {
    event_name: String,
    id: SubscriberId,
    registry: Weak<dyn SubscriberRegistry>,
}

impl Subscription {
    /// Removes this registration from the bus.
    ///
    /// Returns `true` only on the call that actually removed it; repeated
    /// calls, or calls after the bus is gone, return `false`.
    pub fn unsubscribe(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.remove(&self.event_name, self.id),
            None => false,
        }
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("event_name", &self.event_name)
            .field("id", &self.id)
            .finish()
    }
}

/// Thread-safe, synchronous event bus.
///
/// Cloning yields another handle to the same registry.
pub struct EventBus<P> {
    shared: Arc<BusShared<P>>,
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<P: 'static> Default for EventBus<P> {
    fn default() -> Self {
        Self::build(None)
    }
}

impl<P> Debug for EventBus<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let guard = self.shared.registry.lock();
        let registry = guard.borrow();
        f.debug_struct("EventBus")
            .field("event_names", &registry.len())
            .field("has_error_sink", &self.shared.error_sink.is_some())
            .finish()
    }
}

impl<P: 'static> EventBus<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bus that reports swallowed subscriber failures to `sink`.
    ///
    /// The sink runs on the publishing thread, after the failing callback.
    pub fn with_error_sink(sink: impl Fn(&SubscriberFailure) + Send + Sync + 'static) -> Self {
        Self::build(Some(Arc::new(sink)))
    }

    fn build(error_sink: Option<ErrorSink>) -> Self {
        Self {
            shared: Arc::new(BusShared {
                registry: ReentrantMutex::new(RefCell::new(HashMap::new())),
                next_id: AtomicU64::new(1),
                error_sink,
            }),
        }
    }

    /// Registers `callback` under `event_name`.
    ///
    /// Subscribing the same closure twice creates two registrations.
    pub fn subscribe(
        &self,
        event_name: &str,
        callback: impl Fn(&P) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        {
            let guard = self.shared.registry.lock();
            guard
                .borrow_mut()
                .entry(event_name.to_string())
                .or_default()
                .push(Registration {
                    id,
                    callback: Arc::new(callback),
                });
        }
        debug!("event=bus_subscribe module=events status=ok topic={event_name} subscriber={id}");

        let registry: Arc<dyn SubscriberRegistry> = self.shared.clone();
        Subscription {
            event_name: event_name.to_string(),
            id,
            registry: Arc::downgrade(&registry),
        }
    }

    /// Delivers `payload` to every subscriber of `event_name`, in order.
    ///
    /// Failures are logged and forwarded to the error sink; nothing is
    /// returned to the publisher.
    ///
    /// A caught subscriber panic still runs the process panic hook first. With
    /// the default hook that prints a `thread panicked` line to stderr even
    /// though delivery carries on. Once file logging is active the hook also
    /// logs it as `event=panic_captured`.
    pub fn publish(&self, event_name: &str, payload: &P) {
        let snapshot = self.snapshot(event_name);
        debug!(
            "event=bus_publish module=events status=ok topic={event_name} subscribers={}",
            snapshot.len()
        );

        for registration in &snapshot {
            let outcome = catch_unwind(AssertUnwindSafe(|| (registration.callback)(payload)));
            if let Err(panic) = outcome {
                self.report_failure(event_name, registration.id, panic.as_ref());
            }
        }
    }

    /// Number of live registrations for `event_name`.
    pub fn subscriber_count(&self, event_name: &str) -> usize {
        let guard = self.shared.registry.lock();
        let registry = guard.borrow();
        registry.get(event_name).map_or(0, Vec::len)
    }

    fn snapshot(&self, event_name: &str) -> Vec<Registration<P>> {
        let guard = self.shared.registry.lock();
        let registry = guard.borrow();
        registry.get(event_name).cloned().unwrap_or_default()
    }

    fn report_failure(
        &self,
        event_name: &str,
        subscriber_id: SubscriberId,
        panic: &(dyn Any + Send),
    ) {
        let failure = SubscriberFailure {
            event_name: event_name.to_string(),
            subscriber_id,
            message: panic_summary(panic, MAX_FAILURE_MESSAGE_CHARS),
        };
        warn!(
            "event=subscriber_failed module=events status=error topic={} subscriber={} message={}",
            failure.event_name, failure.subscriber_id, failure.message
        );

        if let Some(sink) = &self.shared.error_sink {
            // A broken sink is as isolated as a broken subscriber.
            let _ = catch_unwind(AssertUnwindSafe(|| sink(&failure)));
        }
    }
}
