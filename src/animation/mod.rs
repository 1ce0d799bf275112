// SPDX-License-Identifier: MPL-2.0
//! Animation sequencer.
//!
//! An [`Animator`] plays at most one [`Transition`] at a time. A state
//! change that moves the animated element discontinuously first captures a
//! snapshot with [`Animator::prepare`]; the next layout pass calls
//! [`Animator::commit`] with the freshly laid-out rectangle, and the caller's
//! `compute` closure turns snapshot and rectangle into keyframes.
//!
//! ```
//! use iced_core::{Rectangle, Vector};
//! use slidelens::animation::{Animator, Easing, Keyframe, Transition};
//! use std::time::Duration;
//!
//! let mut animator = Animator::new();
//! animator.prepare(40.0_f32);
//! animator.commit(Duration::ZERO, Rectangle::default(), |offset, _rect, _translate| {
//!     Some(Transition::new(
//!         Keyframe::translate(Vector::new(*offset, 0.0)),
//!         Keyframe::IDENTITY,
//!         Duration::from_millis(100),
//!         Easing::Linear,
//!     ))
//! });
//!
//! let halfway = animator.sample(Duration::from_millis(50));
//! assert!((halfway.translate.x - 20.0).abs() < 1e-3);
//! assert!(!animator.is_playing(Duration::from_millis(100)));
//! ```

mod easing;

pub use easing::Easing;

use iced_core::{Rectangle, Vector};
use std::time::Duration;

/// A visual transform: translation plus opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub translate: Vector,
    pub opacity: f32,
}

impl Keyframe {
    pub const IDENTITY: Keyframe = Keyframe {
        translate: Vector::ZERO,
        opacity: 1.0,
    };

    #[must_use]
    pub fn translate(translate: Vector) -> Self {
        Self {
            translate,
            opacity: 1.0,
        }
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    fn lerp(self, to: Keyframe, t: f32) -> Keyframe {
        Keyframe {
            translate: Vector::new(
                self.translate.x + (to.translate.x - self.translate.x) * t,
                self.translate.y + (to.translate.y - self.translate.y) * t,
            ),
            opacity: self.opacity + (to.opacity - self.opacity) * t,
        }
    }

    /// Composes two transforms: translations add, opacities multiply.
    #[must_use]
    pub fn then(self, other: Keyframe) -> Keyframe {
        Keyframe {
            translate: self.translate + other.translate,
            opacity: self.opacity * other.opacity,
        }
    }
}

impl Default for Keyframe {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A from → to interpolation over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: Keyframe,
    pub to: Keyframe,
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    #[must_use]
    pub fn new(from: Keyframe, to: Keyframe, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
        }
    }

    /// Interpolated keyframe `elapsed` after the start.
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> Keyframe {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from.lerp(self.to, self.easing.apply(progress))
    }
}

#[derive(Debug, Clone, Copy)]
struct Running {
    transition: Transition,
    started_at: Duration,
}

/// Plays one transition at a time from a prepared snapshot of type `S`.
#[derive(Debug)]
pub struct Animator<S> {
    pending: Option<S>,
    running: Option<Running>,
    reduce_motion: bool,
}

impl<S> Animator<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: None,
            running: None,
            reduce_motion: false,
        }
    }

    /// When set, prepared snapshots are discarded instead of animated.
    pub fn set_reduce_motion(&mut self, reduce_motion: bool) {
        self.reduce_motion = reduce_motion;
        if reduce_motion {
            self.running = None;
        }
    }

    /// Captures the pre-change snapshot. A later snapshot replaces an
    /// uncommitted earlier one.
    pub fn prepare(&mut self, snapshot: S) {
        self.pending = Some(snapshot);
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consumes the prepared snapshot and starts the transition `compute`
    /// returns, superseding any running one. `compute` receives the
    /// snapshot, the laid-out rectangle and the in-flight translation at
    /// `now`. Returns whether a transition started.
    pub fn commit<F>(&mut self, now: Duration, rect: Rectangle, compute: F) -> bool
    where
        F: FnOnce(&S, Rectangle, Vector) -> Option<Transition>,
    {
        let Some(snapshot) = self.pending.take() else {
            return false;
        };
        if self.reduce_motion {
            return false;
        }

        let translate = self.sample(now).translate;
        match compute(&snapshot, rect, translate) {
            Some(transition) if !transition.duration.is_zero() => {
                self.running = Some(Running {
                    transition,
                    started_at: now,
                });
                true
            }
            _ => false,
        }
    }

    /// The animated transform at `now`; identity when idle.
    #[must_use]
    pub fn sample(&self, now: Duration) -> Keyframe {
        match self.running {
            Some(running) if self.is_playing(now) => running
                .transition
                .sample(now.saturating_sub(running.started_at)),
            _ => Keyframe::IDENTITY,
        }
    }

    #[must_use]
    pub fn is_playing(&self, now: Duration) -> bool {
        self.running.is_some_and(|running| {
            now.saturating_sub(running.started_at) < running.transition.duration
        })
    }

    /// Drops a finished transition. Returns true if one finished.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.running.is_some() && !self.is_playing(now) {
            self.running = None;
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.running = None;
    }

    /// When the running transition ends, if any.
    #[must_use]
    pub fn finishes_at(&self) -> Option<Duration> {
        self.running
            .map(|running| running.started_at + running.transition.duration)
    }
}

impl<S> Default for Animator<S> {
    fn default() -> Self {
        Self::new()
    }
}
