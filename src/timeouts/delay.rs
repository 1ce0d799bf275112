// SPDX-License-Identifier: MPL-2.0
//! Single-slot timers built on [`Timeouts`].

use super::{TimeoutId, Timeouts};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// A timer slot: scheduling a new callback cancels the previous one.
#[derive(Debug)]
pub struct Delay {
    timeouts: Timeouts,
    slot: Cell<Option<TimeoutId>>,
}

impl Delay {
    #[must_use]
    pub fn new(timeouts: Timeouts) -> Self {
        Self {
            timeouts,
            slot: Cell::new(None),
        }
    }

    pub fn schedule(&self, delay: Duration, callback: impl FnOnce() + 'static) {
        self.cancel();
        self.slot
            .set(Some(self.timeouts.set_timeout(delay, callback)));
    }

    pub fn cancel(&self) {
        if let Some(id) = self.slot.take() {
            self.timeouts.clear_timeout(id);
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot
            .get()
            .is_some_and(|id| self.timeouts.is_pending(id))
    }
}

impl Drop for Delay {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Trailing-edge throttle: a call runs at the earliest `interval` after the
/// previous run, and only the most recent call in a burst runs.
#[derive(Debug)]
pub struct Throttle {
    delay: Delay,
    interval: Duration,
    last_run: Rc<Cell<Option<Duration>>>,
}

impl Throttle {
    #[must_use]
    pub fn new(timeouts: Timeouts, interval: Duration) -> Self {
        Self {
            delay: Delay::new(timeouts),
            interval,
            last_run: Rc::new(Cell::new(None)),
        }
    }

    pub fn call(&self, callback: impl FnOnce() + 'static) {
        let now = self.delay.timeouts.now();
        let wait = match self.last_run.get() {
            Some(last) => self.interval.saturating_sub(now.saturating_sub(last)),
            None => Duration::ZERO,
        };

        let last_run = Rc::clone(&self.last_run);
        let clock = self.delay.timeouts.clone();
        self.delay.schedule(wait, move || {
            last_run.set(Some(clock.now()));
            callback();
        });
    }

    pub fn cancel(&self) {
        self.delay.cancel();
    }
}
