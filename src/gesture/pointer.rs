// SPDX-License-Identifier: MPL-2.0
//! Pointer (mouse, touch, pen) swipe and pull recognizer.

use super::{GestureContext, GestureEffect, PointerEvent, PointerId, SensorEvent, SwipeState};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Gesture {
    #[default]
    None,
    Swipe,
    Pull,
}

/// Pointer gesture session.
///
/// Tracks every pointer that is down. A gesture starts only while no other
/// gesture runs and exactly one pointer is down; from then on only that
/// pointer drives it.
#[derive(Debug, Default)]
pub struct PointerSwipe {
    pointers: Vec<PointerEvent>,
    active: Option<PointerId>,
    gesture: Gesture,
    started_at: Duration,
    offset: f32,
}

impl PointerSwipe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn tracked_pointers(&self) -> usize {
        self.pointers.len()
    }

    pub fn handle(&mut self, event: &SensorEvent, cx: &GestureContext) -> GestureEffect {
        match event {
            SensorEvent::PointerDown(pointer) => {
                self.add_pointer(*pointer);
                GestureEffect::None
            }
            SensorEvent::PointerMove(pointer) => self.on_move(pointer, cx),
            SensorEvent::PointerUp(pointer) => self.on_release(pointer, cx, false),
            SensorEvent::PointerLeave(pointer) | SensorEvent::PointerCancel(pointer) => {
                self.on_release(pointer, cx, true)
            }
            _ => GestureEffect::None,
        }
    }

    /// Drops all session state without emitting anything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn add_pointer(&mut self, pointer: PointerEvent) {
        self.clear_pointer(pointer.pointer_id);
        self.pointers.push(pointer);
    }

    fn clear_pointer(&mut self, pointer_id: PointerId) {
        self.pointers.retain(|tracked| tracked.pointer_id != pointer_id);
    }

    fn start(&mut self, pointer: &PointerEvent, gesture: Gesture, now: Duration) {
        self.active = Some(pointer.pointer_id);
        self.gesture = gesture;
        self.started_at = now;
        self.offset = 0.0;
        // Measure the gesture from where it was recognized.
        self.add_pointer(*pointer);
    }

    fn on_move(&mut self, pointer: &PointerEvent, cx: &GestureContext) -> GestureEffect {
        let Some(origin) = self
            .pointers
            .iter()
            .find(|tracked| tracked.pointer_id == pointer.pointer_id)
            .copied()
        else {
            return GestureEffect::None;
        };

        let is_active = self.active == Some(pointer.pointer_id);

        // Buttons were released outside our view of events.
        if pointer.buttons == 0 {
            if is_active && self.offset != 0.0 {
                return self.on_release(pointer, cx, false);
            }
            if is_active {
                self.end_session();
            }
            self.clear_pointer(pointer.pointer_id);
            return GestureEffect::None;
        }

        let dx = pointer.position.x - origin.position.x;
        let dy = pointer.position.y - origin.position.y;

        if self.active.is_none() {
            let idle = matches!(cx.swipe_state, SwipeState::None | SwipeState::Animation);
            if !idle || self.pointers.len() != 1 {
                return GestureEffect::None;
            }

            let threshold = cx.tuning.swipe_threshold;
            if dx.abs() > threshold && dx.abs() > dy.abs() && cx.bounds.allows_offset(dx) {
                tracing::trace!(dx, "pointer swipe recognized");
                self.start(pointer, Gesture::Swipe, cx.now);
                return GestureEffect::SwipeStart;
            }
            if dy.abs() > dx.abs() && cx.pull.exceeds(dy, threshold) {
                tracing::trace!(dy, "pointer pull recognized");
                self.start(pointer, Gesture::Pull, cx.now);
                return GestureEffect::PullStart;
            }
            return GestureEffect::None;
        }

        if !is_active {
            return GestureEffect::None;
        }

        match self.gesture {
            Gesture::Swipe => {
                self.offset = dx;
                GestureEffect::SwipeProgress(dx)
            }
            Gesture::Pull => {
                self.offset = dy;
                GestureEffect::PullProgress(dy)
            }
            Gesture::None => GestureEffect::None,
        }
    }

    fn on_release(
        &mut self,
        pointer: &PointerEvent,
        cx: &GestureContext,
        cancel: bool,
    ) -> GestureEffect {
        let tracked = self
            .pointers
            .iter()
            .any(|tracked| tracked.pointer_id == pointer.pointer_id);

        let mut effect = GestureEffect::None;
        if tracked && self.active == Some(pointer.pointer_id) {
            let elapsed = cx.now.saturating_sub(self.started_at);
            let offset = self.offset;
            let tuning = &cx.tuning;

            effect = match self.gesture {
                Gesture::Swipe => {
                    let far_enough = offset.abs() > tuning.commit_ratio * cx.container_width;
                    let flick =
                        offset.abs() > tuning.flick_min_offset && elapsed < cx.swipe_duration;
                    if !cancel && (far_enough || flick) {
                        GestureEffect::SwipeFinish { offset, elapsed }
                    } else {
                        GestureEffect::SwipeCancel { offset }
                    }
                }
                Gesture::Pull => {
                    if !cancel && cx.pull.exceeds(offset, tuning.pull_commit_distance()) {
                        GestureEffect::PullFinish { offset }
                    } else {
                        GestureEffect::PullCancel { offset }
                    }
                }
                Gesture::None => GestureEffect::None,
            };
            self.end_session();
        }

        self.clear_pointer(pointer.pointer_id);
        effect
    }

    fn end_session(&mut self) {
        self.active = None;
        self.gesture = Gesture::None;
        self.offset = 0.0;
    }
}
