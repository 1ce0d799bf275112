// SPDX-License-Identifier: MPL-2.0
//! Well-known topic names.

/// Navigate backwards. Optional payload: [`NavigateParams`].
pub const ACTION_PREV: &str = "prev";
/// Navigate forwards. Optional payload: [`NavigateParams`].
pub const ACTION_NEXT: &str = "next";
/// Navigation state action. Payload: [`Action`](crate::state::Action).
pub const ACTION_SWIPE: &str = "swipe";
/// Start the close sequence.
pub const ACTION_CLOSE: &str = "close";

/// The global index changed. Payload: [`ViewChanged`].
pub const VIEW: &str = "view";
/// A toolbar or navigation button was activated. Payload: `String` key.
pub const BUTTON_PRESS: &str = "button-press";

pub const ACTIVE_SLIDE_LOADING: &str = "active-slide-loading";
pub const ACTIVE_SLIDE_PLAYING: &str = "active-slide-playing";
pub const ACTIVE_SLIDE_ERROR: &str = "active-slide-error";
pub const ACTIVE_SLIDE_COMPLETE: &str = "active-slide-complete";

/// Raw input, republished for plugins. Payload: the event struct.
pub const SENSOR_POINTER_DOWN: &str = "sensor.pointer-down";
pub const SENSOR_POINTER_MOVE: &str = "sensor.pointer-move";
pub const SENSOR_POINTER_UP: &str = "sensor.pointer-up";
pub const SENSOR_POINTER_LEAVE: &str = "sensor.pointer-leave";
pub const SENSOR_POINTER_CANCEL: &str = "sensor.pointer-cancel";
pub const SENSOR_WHEEL: &str = "sensor.wheel";
pub const SENSOR_KEY_DOWN: &str = "sensor.key-down";
pub const SENSOR_KEY_UP: &str = "sensor.key-up";

/// Payload of [`ACTION_PREV`] / [`ACTION_NEXT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateParams {
    /// Number of slides to move. Zero is treated as one.
    pub count: usize,
}

impl Default for NavigateParams {
    fn default() -> Self {
        Self { count: 1 }
    }
}

/// Payload of [`VIEW`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewChanged {
    pub index: usize,
    pub global_index: i64,
}
