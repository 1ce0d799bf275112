// SPDX-License-Identifier: MPL-2.0
//! Wheel and trackpad swipe recognizer.
//!
//! Horizontal wheel deltas first accumulate into an *intent*; a swipe
//! starts once the intent crosses the activation threshold. Trackpads keep
//! emitting decaying deltas after a fling, so a delta no larger than
//! [`GestureTuning::wheel_inertia_factor`](crate::config::GestureTuning)
//! times the last terminal delta is treated as residual momentum and never
//! starts a new gesture.

use super::{GestureContext, GestureEffect, SwipeState, WheelEvent};
use crate::config::defaults::WHEEL_STALL_FACTOR;
use crate::timeouts::{Delay, Timeouts};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Timer notifications the recognizer asked to receive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelTimer {
    /// The intent has been quiet for a swipe duration. Carries the intent
    /// value at scheduling time.
    IntentExpired(f32),
    /// Residual momentum has decayed.
    InertiaExpired,
    /// No wheel input for a while during a swipe. Carries the offset at
    /// scheduling time.
    Stalled(f32),
}

type Notify = Rc<dyn Fn(WheelTimer)>;

pub struct WheelSwipe {
    offset: f32,
    intent: f32,
    inertia: f32,
    started_at: Duration,
    intent_reset: Delay,
    inertia_reset: Delay,
    stall_reset: Delay,
    notify: Notify,
}

impl WheelSwipe {
    /// Creates a recognizer whose timers fire through `timeouts` and are
    /// reported back via `notify`.
    pub fn new(timeouts: &Timeouts, notify: impl Fn(WheelTimer) + 'static) -> Self {
        Self {
            offset: 0.0,
            intent: 0.0,
            inertia: 0.0,
            started_at: Duration::ZERO,
            intent_reset: Delay::new(timeouts.clone()),
            inertia_reset: Delay::new(timeouts.clone()),
            stall_reset: Delay::new(timeouts.clone()),
            notify: Rc::new(notify),
        }
    }

    pub fn handle(&mut self, event: &WheelEvent, cx: &GestureContext) -> GestureEffect {
        let WheelEvent { delta, modifiers } = *event;
        if modifiers.control() || delta.y.abs() > delta.x.abs() {
            return GestureEffect::None;
        }
        let dx = delta.x;

        match cx.swipe_state {
            SwipeState::None => self.accumulate_intent(dx, cx),
            SwipeState::Swipe => self.track(dx, cx),
            SwipeState::Pull | SwipeState::Animation => {
                self.set_inertia(dx, cx);
                GestureEffect::None
            }
        }
    }

    fn accumulate_intent(&mut self, dx: f32, cx: &GestureContext) -> GestureEffect {
        if dx.abs() <= cx.tuning.wheel_inertia_factor * self.inertia.abs() {
            self.set_inertia(dx, cx);
            return GestureEffect::None;
        }
        // Wheel deltas point opposite to the drag offset they emulate.
        if !cx.bounds.allows_offset(-dx) {
            return GestureEffect::None;
        }

        self.intent += dx;
        self.intent_reset.cancel();

        if self.intent.abs() > cx.tuning.swipe_threshold {
            self.intent = 0.0;
            self.set_inertia(0.0, cx);
            self.started_at = cx.now;
            tracing::trace!("wheel swipe recognized");
            return GestureEffect::SwipeStart;
        }

        let intent = self.intent;
        let notify = Rc::clone(&self.notify);
        self.intent_reset.schedule(cx.swipe_duration, move || {
            notify(WheelTimer::IntentExpired(intent));
        });
        GestureEffect::None
    }

    fn track(&mut self, dx: f32, cx: &GestureContext) -> GestureEffect {
        let moved = self.offset - dx;
        let offset = moved.abs().min(cx.container_width) * moved.signum();
        self.offset = offset;
        self.stall_reset.cancel();

        if offset.abs() > cx.tuning.wheel_commit_ratio * cx.container_width {
            self.set_inertia(dx, cx);
            return GestureEffect::SwipeFinish {
                offset,
                elapsed: cx.now.saturating_sub(self.started_at),
            };
        }

        let notify = Rc::clone(&self.notify);
        self.stall_reset
            .schedule(cx.swipe_duration * WHEEL_STALL_FACTOR, move || {
                notify(WheelTimer::Stalled(offset));
            });
        GestureEffect::SwipeProgress(offset)
    }

    fn set_inertia(&mut self, inertia: f32, cx: &GestureContext) {
        self.inertia = inertia;
        if inertia == 0.0 {
            self.inertia_reset.cancel();
            return;
        }
        let notify = Rc::clone(&self.notify);
        self.inertia_reset
            .schedule(cx.tuning.wheel_inertia_decay, move || {
                notify(WheelTimer::InertiaExpired);
            });
    }

    /// Handles a timer this recognizer scheduled.
    pub fn on_timer(&mut self, timer: WheelTimer, cx: &GestureContext) -> GestureEffect {
        match timer {
            WheelTimer::IntentExpired(intent) => {
                if self.intent == intent {
                    self.intent = 0.0;
                }
                GestureEffect::None
            }
            WheelTimer::InertiaExpired => {
                self.inertia = 0.0;
                GestureEffect::None
            }
            WheelTimer::Stalled(offset) => {
                if cx.swipe_state == SwipeState::Swipe && self.offset == offset {
                    GestureEffect::SwipeCancel { offset }
                } else {
                    GestureEffect::None
                }
            }
        }
    }

    /// Called whenever the controller's swipe state changes.
    pub fn on_state_change(&mut self, state: SwipeState) {
        if state != SwipeState::Swipe {
            self.offset = 0.0;
            self.started_at = Duration::ZERO;
            self.intent_reset.cancel();
            self.stall_reset.cancel();
        }
    }

    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }
}

impl fmt::Debug for WheelSwipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WheelSwipe")
            .field("offset", &self.offset)
            .field("intent", &self.intent)
            .field("inertia", &self.inertia)
            .finish_non_exhaustive()
    }
}
