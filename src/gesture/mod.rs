// SPDX-License-Identifier: MPL-2.0
//! Gesture recognition.
//!
//! Raw host input ([`SensorEvent`]) is classified by the pointer and wheel
//! recognizers into [`GestureEffect`]s that the controller applies. The
//! recognizers own only their session scalars; everything they need to know
//! about the controller arrives in a [`GestureContext`].

pub mod pointer;
pub mod wheel;

pub use pointer::PointerSwipe;
pub use wheel::{WheelSwipe, WheelTimer};

use crate::config::GestureTuning;
use crate::events::topics;
use iced_core::keyboard::{Key, Modifiers};
use iced_core::{Point, Vector};
use std::time::Duration;

pub type PointerId = u64;

/// Bitmask of pressed buttons, as in DOM `PointerEvent.buttons`.
pub const PRIMARY_BUTTON: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: PointerId,
    pub position: Point,
    pub buttons: u8,
}

impl PointerEvent {
    #[must_use]
    pub fn new(pointer_id: PointerId, position: Point, buttons: u8) -> Self {
        Self {
            pointer_id,
            position,
            buttons,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta: Vector,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

/// Low-level input delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    PointerLeave(PointerEvent),
    PointerCancel(PointerEvent),
    Wheel(WheelEvent),
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
}

impl SensorEvent {
    /// Bus topic this event is republished under.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            SensorEvent::PointerDown(_) => topics::SENSOR_POINTER_DOWN,
            SensorEvent::PointerMove(_) => topics::SENSOR_POINTER_MOVE,
            SensorEvent::PointerUp(_) => topics::SENSOR_POINTER_UP,
            SensorEvent::PointerLeave(_) => topics::SENSOR_POINTER_LEAVE,
            SensorEvent::PointerCancel(_) => topics::SENSOR_POINTER_CANCEL,
            SensorEvent::Wheel(_) => topics::SENSOR_WHEEL,
            SensorEvent::KeyDown(_) => topics::SENSOR_KEY_DOWN,
            SensorEvent::KeyUp(_) => topics::SENSOR_KEY_UP,
        }
    }
}

/// Controller swipe state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SwipeState {
    #[default]
    None,
    Swipe,
    Pull,
    Animation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Prev,
    Next,
}

/// Mirrors a horizontal value for right-to-left layouts.
#[must_use]
pub fn rtl(value: f32, is_rtl: bool) -> f32 {
    if is_rtl {
        -value
    } else {
        value
    }
}

/// Which swipe directions the carousel currently accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwipeBounds {
    pub finite: bool,
    pub is_rtl: bool,
    pub slide_count: usize,
    pub current_index: usize,
}

impl SwipeBounds {
    #[must_use]
    pub fn allows(self, direction: NavDirection) -> bool {
        if self.slide_count == 0 {
            return false;
        }
        if !self.finite {
            return true;
        }
        match direction {
            NavDirection::Prev => self.current_index > 0,
            NavDirection::Next => self.current_index + 1 < self.slide_count,
        }
    }

    /// Validity of a horizontal drag offset: a positive offset (in reading
    /// direction) moves towards the previous slide.
    #[must_use]
    pub fn allows_offset(self, offset: f32) -> bool {
        match direction_for_offset(offset, self.is_rtl) {
            Some(direction) => self.allows(direction),
            None => self.slide_count > 0,
        }
    }
}

#[must_use]
pub fn direction_for_offset(offset: f32, is_rtl: bool) -> Option<NavDirection> {
    let offset = rtl(offset, is_rtl);
    if offset > 0.0 {
        Some(NavDirection::Prev)
    } else if offset < 0.0 {
        Some(NavDirection::Next)
    } else {
        None
    }
}

/// Pull-to-close directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PullDirections {
    pub up: bool,
    pub down: bool,
}

impl PullDirections {
    #[must_use]
    pub fn any(self) -> bool {
        self.up || self.down
    }

    /// Distance pulled in an enabled direction; zero otherwise.
    #[must_use]
    pub fn enabled_distance(self, offset: f32) -> f32 {
        if self.down && offset > 0.0 {
            offset
        } else if self.up && offset < 0.0 {
            -offset
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn exceeds(self, offset: f32, threshold: f32) -> bool {
        self.enabled_distance(offset) > threshold
    }
}

/// Carousel opacity while pulling by `offset`. Reaches the minimum at the
/// activation threshold.
#[must_use]
pub fn pull_opacity(offset: f32, pull: PullDirections, tuning: &GestureTuning) -> f32 {
    let distance = pull.enabled_distance(offset);
    let faded = 1.0 - distance / tuning.swipe_threshold * (1.0 - tuning.pull_min_opacity);
    let rounded = (faded * 100.0).round() / 100.0;
    rounded.clamp(tuning.pull_min_opacity, 1.0)
}

/// Everything a recognizer needs to know about the controller.
#[derive(Debug, Clone, Copy)]
pub struct GestureContext {
    pub now: Duration,
    pub container_width: f32,
    pub swipe_duration: Duration,
    pub swipe_state: SwipeState,
    pub bounds: SwipeBounds,
    pub pull: PullDirections,
    pub tuning: GestureTuning,
}

/// What a recognizer asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    None,
    SwipeStart,
    SwipeProgress(f32),
    SwipeFinish { offset: f32, elapsed: Duration },
    SwipeCancel { offset: f32 },
    PullStart,
    PullProgress(f32),
    PullFinish { offset: f32 },
    PullCancel { offset: f32 },
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    pub fn context(now_ms: u64) -> GestureContext {
        GestureContext {
            now: Duration::from_millis(now_ms),
            container_width: 300.0,
            swipe_duration: Duration::from_millis(500),
            swipe_state: SwipeState::None,
            bounds: SwipeBounds {
                finite: false,
                is_rtl: false,
                slide_count: 3,
                current_index: 1,
            },
            pull: PullDirections::default(),
            tuning: GestureTuning::default(),
        }
    }
}
