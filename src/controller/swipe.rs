// SPDX-License-Identifier: MPL-2.0
//! Swipe resolution: how far to move and how long the settle takes.

use crate::config::defaults::FLICK_COMPRESSION_DIVISOR;
use crate::gesture::{rtl, NavDirection, SwipeBounds, SwipeState};
use std::time::Duration;

/// A finished drag or a programmatic navigation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeRequest {
    /// Drag offset at release; zero for programmatic moves.
    pub offset: f32,
    /// Time since the drag started.
    pub elapsed: Duration,
    /// Slides to move; zero cancels the drag.
    pub count: usize,
    /// Set for programmatic moves.
    pub direction: Option<NavDirection>,
}

impl SwipeRequest {
    #[must_use]
    pub fn navigate(direction: NavDirection, count: usize) -> Self {
        Self {
            offset: 0.0,
            elapsed: Duration::ZERO,
            count,
            direction: Some(direction),
        }
    }

    #[must_use]
    pub fn commit(offset: f32, elapsed: Duration) -> Self {
        Self {
            offset,
            elapsed,
            count: 1,
            direction: None,
        }
    }

    #[must_use]
    pub fn cancel(offset: f32) -> Self {
        Self {
            offset,
            elapsed: Duration::ZERO,
            count: 0,
            direction: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipePlan {
    pub increment: i64,
    pub duration: Duration,
    /// State the controller enters while the settle plays.
    pub state: SwipeState,
}

/// Resolves `request` against the carousel bounds.
///
/// `swipe_duration` is the duration of one full-width move. Returns `None`
/// when a programmatic move is blocked by a finite boundary; a drag towards
/// a blocked edge bounces back over half the swipe duration instead.
#[must_use]
pub fn plan_swipe(
    request: &SwipeRequest,
    swipe_duration: Duration,
    container_width: f32,
    is_rtl: bool,
    bounds: SwipeBounds,
) -> Option<SwipePlan> {
    let full = swipe_duration.as_secs_f64() * 1000.0;
    let width = f64::from(container_width);
    let offset = f64::from(request.offset.abs());
    let count = request.count;

    let mut duration = full * count as f64;
    let mut direction = request.direction;

    if direction.is_none() {
        if count == 0 {
            duration = full / 2.0;
        } else {
            let expected = if width > 0.0 { full / width * offset } else { full };
            let elapsed = request.elapsed.as_secs_f64() * 1000.0;
            if expected > 0.0 && elapsed < expected {
                // Fast flick: compress, but never below a fifth of the expected time.
                duration = duration / expected * elapsed.max(expected / FLICK_COMPRESSION_DIVISOR);
            } else if width > 0.0 {
                duration = full / width * (width - offset);
            }
            direction = Some(if rtl(request.offset, is_rtl) > 0.0 {
                NavDirection::Prev
            } else {
                NavDirection::Next
            });
        }
    }

    let mut increment = 0;
    let mut state = SwipeState::Animation;
    if let Some(direction) = direction {
        if bounds.allows(direction) {
            let count = i64::try_from(count).unwrap_or(i64::MAX);
            increment = match direction {
                NavDirection::Prev => -count,
                NavDirection::Next => count,
            };
        } else if request.direction.is_some() {
            return None;
        } else {
            state = SwipeState::None;
            duration = full / 2.0;
        }
    }

    Some(SwipePlan {
        increment,
        duration: Duration::from_millis(duration.max(0.0).round() as u64),
        state,
    })
}
