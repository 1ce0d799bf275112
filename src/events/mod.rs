// SPDX-License-Identifier: MPL-2.0
//! Per-instance publish/subscribe channel.
//!
//! Topics are strings and payloads are opaque (`dyn Any`). Publishing is a
//! synchronous fan-out to the subscribers registered when the call started:
//! handlers may subscribe, unsubscribe or publish from inside a handler, but
//! a handler that is already running is never re-entered.
//!
//! ```
//! use slidelens::events::EventBus;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let bus = EventBus::new();
//! let seen = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&seen);
//! let _subscription = bus.subscribe("next", move |event| {
//!     counter.set(counter.get() + event.downcast_ref::<u32>().copied().unwrap_or(1));
//!     Ok(())
//! });
//!
//! bus.publish_with("next", 3_u32).unwrap();
//! bus.publish("next").unwrap();
//! assert_eq!(seen.get(), 4);
//! ```

pub mod topics;

use crate::error::Result;
use std::any::Any;
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// An event delivered to subscribers.
pub struct Event<'a> {
    topic: &'a str,
    payload: Option<&'a dyn Any>,
}

impl<'a> Event<'a> {
    #[must_use]
    pub fn topic(&self) -> &'a str {
        self.topic
    }

    #[must_use]
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Returns the payload if it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        self.payload.and_then(|payload| payload.downcast_ref::<T>())
    }
}

type Handler = dyn FnMut(&Event<'_>) -> Result<()>;

struct Entry {
    id: u64,
    topic: Cow<'static, str>,
    handler: Rc<RefCell<Box<Handler>>>,
}

#[derive(Default)]
struct Registry {
    next_id: Cell<u64>,
    entries: RefCell<Vec<Entry>>,
}

impl Registry {
    fn is_subscribed(&self, id: u64) -> bool {
        self.entries.borrow().iter().any(|entry| entry.id == id)
    }

    fn remove(&self, id: u64) {
        self.entries.borrow_mut().retain(|entry| entry.id != id);
    }
}

/// Instance-scoped event bus. Cloning yields another handle to the same bus.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<Registry>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `topic`. The handler stays registered until
    /// the returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, topic: impl Into<Cow<'static, str>>, handler: F) -> Subscription
    where
        F: FnMut(&Event<'_>) -> Result<()> + 'static,
    {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        self.registry.entries.borrow_mut().push(Entry {
            id,
            topic: topic.into(),
            handler: Rc::new(RefCell::new(Box::new(handler))),
        });

        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Publishes an event without payload.
    pub fn publish(&self, topic: &str) -> Result<()> {
        self.dispatch(Event {
            topic,
            payload: None,
        })
    }

    /// Publishes an event carrying `payload`.
    pub fn publish_with<T: Any>(&self, topic: &str, payload: T) -> Result<()> {
        self.dispatch(Event {
            topic,
            payload: Some(&payload as &dyn Any),
        })
    }

    /// Delivers `event` to every handler subscribed when the call started and
    /// still subscribed when its turn comes. All handlers run even if one
    /// fails; the first error is returned.
    fn dispatch(&self, event: Event<'_>) -> Result<()> {
        let targets: Vec<_> = self
            .registry
            .entries
            .borrow()
            .iter()
            .filter(|entry| entry.topic == event.topic)
            .map(|entry| (entry.id, Rc::clone(&entry.handler)))
            .collect();

        if targets.is_empty() {
            tracing::trace!(topic = event.topic, "no subscribers");
        }

        let mut first_error = None;
        for (id, handler) in targets {
            if !self.registry.is_subscribed(id) {
                continue;
            }
            let Ok(mut handler) = handler.try_borrow_mut() else {
                tracing::warn!(topic = event.topic, "skipping re-entrant handler");
                continue;
            };
            if let Err(err) = (*handler)(&event) {
                first_error.get_or_insert(err);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    #[must_use]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.registry
            .entries
            .borrow()
            .iter()
            .filter(|entry| entry.topic == topic)
            .count()
    }

    /// Drops every subscriber. Outstanding [`Subscription`]s become inert.
    pub fn clear(&self) {
        // Handlers may own subscriptions; drop them after the borrow ends.
        let removed = std::mem::take(&mut *self.registry.entries.borrow_mut());
        drop(removed);
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.registry.entries.borrow();
        f.debug_struct("EventBus")
            .field("subscribers", &entries.len())
            .finish()
    }
}

/// Guard returned by [`EventBus::subscribe`]. Dropping it unsubscribes.
pub struct Subscription {
    registry: Weak<Registry>,
    id: u64,
}

impl Subscription {
    /// Unsubscribes now. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn recorder(
        bus: &EventBus,
        topic: &'static str,
        log: &Rc<RefCell<Vec<String>>>,
        tag: &'static str,
    ) -> Subscription {
        let log = Rc::clone(log);
        bus.subscribe(topic, move |event| {
            log.borrow_mut().push(format!("{tag}:{}", event.topic()));
            Ok(())
        })
    }

    #[test]
    fn delivers_only_to_matching_topic_in_subscription_order() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let _a = recorder(&bus, "next", &log, "a");
        let _b = recorder(&bus, "prev", &log, "b");
        let _c = recorder(&bus, "next", &log, "c");

        bus.publish("next").unwrap();
        assert_eq!(*log.borrow(), vec!["a:next", "c:next"]);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sub = recorder(&bus, "close", &log, "a");
        assert_eq!(bus.subscriber_count("close"), 1);

        sub.unsubscribe();
        bus.publish("close").unwrap();
        assert!(log.borrow().is_empty());
        assert_eq!(bus.subscriber_count("close"), 0);
    }

    #[test]
    fn payload_is_downcast_by_type() {
        let bus = EventBus::new();
        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        let _sub = bus.subscribe("count", move |event| {
            sink.set(event.downcast_ref::<usize>().copied());
            Ok(())
        });

        bus.publish_with("count", 7_usize).unwrap();
        assert_eq!(seen.get(), Some(7));
        bus.publish_with("count", "seven").unwrap();
        assert_eq!(seen.get(), None);
    }

    #[test]
    fn subscriber_added_during_dispatch_misses_the_event() {
        let bus = EventBus::new();
        let late_calls = Rc::new(Cell::new(0));
        let held = Rc::new(RefCell::new(Vec::new()));

        let inner_bus = bus.clone();
        let inner_calls = Rc::clone(&late_calls);
        let inner_held = Rc::clone(&held);
        let _sub = bus.subscribe("open", move |_| {
            let calls = Rc::clone(&inner_calls);
            let sub = inner_bus.subscribe("open", move |_| {
                calls.set(calls.get() + 1);
                Ok(())
            });
            inner_held.borrow_mut().push(sub);
            Ok(())
        });

        bus.publish("open").unwrap();
        assert_eq!(late_calls.get(), 0);
        bus.publish("open").unwrap();
        assert_eq!(late_calls.get(), 1);
    }

    #[test]
    fn handler_unsubscribed_mid_dispatch_is_skipped() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let victim = Rc::new(RefCell::new(None::<Subscription>));

        let slot = Rc::clone(&victim);
        let _first = bus.subscribe("next", move |_| {
            slot.borrow_mut().take();
            Ok(())
        });
        *victim.borrow_mut() = Some(recorder(&bus, "next", &log, "victim"));

        bus.publish("next").unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn re_entrant_publish_skips_running_handler() {
        let bus = EventBus::new();
        let calls = Rc::new(Cell::new(0));

        let inner_bus = bus.clone();
        let counter = Rc::clone(&calls);
        let _sub = bus.subscribe("loop", move |_| {
            counter.set(counter.get() + 1);
            inner_bus.publish("loop")
        });

        bus.publish("loop").unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn first_error_is_returned_after_all_handlers_ran() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let _failing = bus.subscribe("swipe", |_| Err(Error::UnknownAction("bogus".into())));
        let _after = recorder(&bus, "swipe", &log, "after");

        let result = bus.publish("swipe");
        assert_eq!(result, Err(Error::UnknownAction("bogus".into())));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn clear_drops_all_subscribers() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sub = recorder(&bus, "next", &log, "a");

        bus.clear();
        bus.publish("next").unwrap();
        assert!(log.borrow().is_empty());
        drop(sub);
        assert_eq!(bus.subscriber_count("next"), 0);
    }
}
