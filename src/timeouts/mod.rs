// SPDX-License-Identifier: MPL-2.0
//! Delayed-callback registry driven by a host clock.
//!
//! The registry never reads a wall clock. The host advances it with
//! [`Timeouts::advance_to`] (or fires callbacks one at a time with
//! [`Timeouts::fire_next`]), which runs every due callback in deadline
//! order. Callbacks run with the registry unborrowed, so they may schedule
//! or clear other timeouts.

mod delay;

pub use delay::{Delay, Throttle};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Handle to a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeoutId(u64);

struct Pending {
    id: TimeoutId,
    deadline: Duration,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Inner {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    pending: RefCell<Vec<Pending>>,
}

/// Instance-scoped timer registry. Cloning yields another handle to the
/// same registry.
#[derive(Clone, Default)]
pub struct Timeouts {
    inner: Rc<Inner>,
}

impl Timeouts {
    #[must_use]
    pub fn new(now: Duration) -> Self {
        let timeouts = Self::default();
        timeouts.inner.now.set(now);
        timeouts
    }

    /// Current registry time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.now.get()
    }

    /// Runs `callback` once `delay` has elapsed.
    pub fn set_timeout(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TimeoutId {
        let id = TimeoutId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.pending.borrow_mut().push(Pending {
            id,
            deadline: self.now().saturating_add(delay),
            callback: Box::new(callback),
        });
        id
    }

    /// Cancels a pending callback. Returns false if it already ran or was
    /// cancelled.
    pub fn clear_timeout(&self, id: TimeoutId) -> bool {
        let mut pending = self.inner.pending.borrow_mut();
        let before = pending.len();
        pending.retain(|entry| entry.id != id);
        pending.len() != before
    }

    #[must_use]
    pub fn is_pending(&self, id: TimeoutId) -> bool {
        self.inner.pending.borrow().iter().any(|entry| entry.id == id)
    }

    /// Cancels every pending callback and returns how many were dropped.
    pub fn clear_all(&self) -> usize {
        let dropped = std::mem::take(&mut *self.inner.pending.borrow_mut());
        dropped.len()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.pending.borrow().len()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner
            .pending
            .borrow()
            .iter()
            .map(|entry| entry.deadline)
            .min()
    }

    /// Fires the earliest callback due at or before `until`, if any.
    ///
    /// While the callback runs, [`now`](Self::now) reads its deadline, so
    /// callbacks scheduled from inside it are timed from when it was due.
    pub fn fire_next(&self, until: Duration) -> bool {
        let due = {
            let mut pending = self.inner.pending.borrow_mut();
            let position = pending
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.deadline <= until)
                .min_by_key(|(_, entry)| (entry.deadline, entry.id))
                .map(|(position, _)| position);
            position.map(|position| pending.remove(position))
        };

        match due {
            Some(entry) => {
                if entry.deadline > self.now() {
                    self.inner.now.set(entry.deadline);
                }
                (entry.callback)();
                true
            }
            None => false,
        }
    }

    /// Advances the clock to `now`, firing every callback that comes due on
    /// the way. Returns the number of callbacks fired.
    pub fn advance_to(&self, now: Duration) -> usize {
        let mut fired = 0;
        while self.fire_next(now) {
            fired += 1;
        }
        if now > self.now() {
            self.inner.now.set(now);
        }
        fired
    }
}

impl fmt::Debug for Timeouts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeouts")
            .field("now", &self.now())
            .field("pending", &self.pending_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn logger() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |tag: &'static str| {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(tag)) as Box<dyn FnOnce()>
        };
        (log, make)
    }

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let timeouts = Timeouts::new(ms(0));
        let (log, make) = logger();
        timeouts.set_timeout(ms(20), make("late"));
        timeouts.set_timeout(ms(10), make("first"));
        timeouts.set_timeout(ms(10), make("second"));

        assert_eq!(timeouts.advance_to(ms(25)), 3);
        assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
        assert_eq!(timeouts.now(), ms(25));
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let timeouts = Timeouts::new(ms(100));
        let (log, make) = logger();
        timeouts.set_timeout(ms(50), make("a"));

        assert_eq!(timeouts.advance_to(ms(149)), 0);
        assert!(log.borrow().is_empty());
        assert_eq!(timeouts.advance_to(ms(150)), 1);
    }

    #[test]
    fn cleared_timeout_never_fires() {
        let timeouts = Timeouts::new(ms(0));
        let (log, make) = logger();
        let id = timeouts.set_timeout(ms(10), make("a"));

        assert!(timeouts.clear_timeout(id));
        assert!(!timeouts.clear_timeout(id));
        timeouts.advance_to(ms(100));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn callbacks_can_schedule_relative_to_their_deadline() {
        let timeouts = Timeouts::new(ms(0));
        let seen = Rc::new(Cell::new(Duration::ZERO));

        let inner = timeouts.clone();
        let sink = Rc::clone(&seen);
        timeouts.set_timeout(ms(10), move || {
            let clock = inner.clone();
            inner.set_timeout(ms(10), move || sink.set(clock.now()));
        });

        assert_eq!(timeouts.advance_to(ms(100)), 2);
        assert_eq!(seen.get(), ms(20));
    }

    #[test]
    fn clear_all_cancels_everything() {
        let timeouts = Timeouts::new(ms(0));
        let (log, make) = logger();
        timeouts.set_timeout(ms(1), make("a"));
        timeouts.set_timeout(ms(2), make("b"));

        assert_eq!(timeouts.clear_all(), 2);
        assert_eq!(timeouts.pending_count(), 0);
        timeouts.advance_to(ms(10));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn clock_never_moves_backwards() {
        let timeouts = Timeouts::new(ms(50));
        timeouts.advance_to(ms(10));
        assert_eq!(timeouts.now(), ms(50));
    }

    #[test]
    fn next_deadline_reports_earliest() {
        let timeouts = Timeouts::new(ms(0));
        assert_eq!(timeouts.next_deadline(), None);
        timeouts.set_timeout(ms(30), || {});
        timeouts.set_timeout(ms(5), || {});
        assert_eq!(timeouts.next_deadline(), Some(ms(5)));
    }
}
