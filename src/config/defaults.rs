// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the lightbox. Constants are organized by category.
//!
//! # Categories
//!
//! - **Gesture**: Activation threshold and commit heuristics for pointer swipes
//! - **Pull**: Pull-to-close distance and opacity fade
//! - **Wheel**: Intent, inertia and commit tuning for wheel-driven swipes
//! - **Animation**: Fade and swipe durations
//! - **Carousel**: Preload window and geometry
//! - **Slideshow**: Autoplay delay bounds
//!
//! The gesture numbers are empirically tuned. They are exposed through
//! [`GestureTuning`](crate::config::GestureTuning) so hosts can adjust them.

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Distance (in pixels) a pointer must travel before a swipe or pull starts.
pub const SWIPE_THRESHOLD_PX: f32 = 30.0;

/// Fraction of the container width past which a released swipe commits.
pub const SWIPE_COMMIT_RATIO: f32 = 0.3;

/// Minimum travel (in pixels) for a fast flick to commit.
pub const FLICK_MIN_OFFSET_PX: f32 = 5.0;

/// Lower bound for compressed settle durations, as a divisor of the expected
/// time-to-complete.
pub const FLICK_COMPRESSION_DIVISOR: f64 = 5.0;

// ==========================================================================
// Pull Defaults
// ==========================================================================

/// Minimum carousel opacity while pulling.
pub const PULL_MIN_OPACITY: f32 = 0.5;

/// A pull commits (closes) past this multiple of [`SWIPE_THRESHOLD_PX`].
pub const PULL_COMMIT_FACTOR: f32 = 2.0;

// ==========================================================================
// Wheel Defaults
// ==========================================================================

/// Fraction of the container width past which a wheel swipe commits.
pub const WHEEL_COMMIT_RATIO: f32 = 0.2;

/// Deltas within this multiple of the previous terminal delta are treated
/// as residual momentum.
pub const WHEEL_INERTIA_FACTOR: f32 = 1.2;

/// Quiet period (in milliseconds) after which residual momentum is forgotten.
pub const WHEEL_INERTIA_DECAY_MS: u64 = 300;

/// An idle wheel swipe cancels after this many swipe durations.
pub const WHEEL_STALL_FACTOR: u32 = 2;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Default portal fade duration (in milliseconds).
pub const DEFAULT_FADE_MS: u64 = 250;

/// Default slide swipe duration (in milliseconds).
pub const DEFAULT_SWIPE_MS: u64 = 500;

/// Maximum accepted animation duration (in milliseconds).
pub const MAX_ANIMATION_MS: u64 = 10_000;

// ==========================================================================
// Carousel Defaults
// ==========================================================================

/// Default number of slides rendered on each side of the current one.
pub const DEFAULT_PRELOAD: usize = 2;

/// Maximum preload radius.
pub const MAX_PRELOAD: usize = 10;

/// Default slide padding.
pub const DEFAULT_PADDING: &str = "16px";

/// Default spacing between slides.
pub const DEFAULT_SPACING: &str = "30%";

// ==========================================================================
// Slideshow Defaults
// ==========================================================================

/// Default slideshow delay (in milliseconds).
pub const DEFAULT_SLIDESHOW_DELAY_MS: u64 = 3_000;

/// Minimum slideshow delay (in milliseconds).
pub const MIN_SLIDESHOW_DELAY_MS: u64 = 500;

/// Maximum slideshow delay (in milliseconds).
pub const MAX_SLIDESHOW_DELAY_MS: u64 = 60_000;

// ==========================================================================
// Counter Defaults
// ==========================================================================

/// Separator between the position and the total in the slide counter.
pub const DEFAULT_COUNTER_SEPARATOR: &str = " / ";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Gesture validation
    assert!(SWIPE_THRESHOLD_PX > 0.0);
    assert!(SWIPE_COMMIT_RATIO > 0.0 && SWIPE_COMMIT_RATIO < 1.0);
    assert!(FLICK_MIN_OFFSET_PX > 0.0);
    assert!(FLICK_MIN_OFFSET_PX < SWIPE_THRESHOLD_PX);
    assert!(FLICK_COMPRESSION_DIVISOR >= 1.0);

    // Pull validation
    assert!(PULL_MIN_OPACITY > 0.0 && PULL_MIN_OPACITY < 1.0);
    assert!(PULL_COMMIT_FACTOR >= 1.0);

    // Wheel validation
    assert!(WHEEL_COMMIT_RATIO > 0.0 && WHEEL_COMMIT_RATIO < 1.0);
    assert!(WHEEL_INERTIA_FACTOR >= 1.0);
    assert!(WHEEL_INERTIA_DECAY_MS > 0);
    assert!(WHEEL_STALL_FACTOR > 0);

    // Animation validation
    assert!(DEFAULT_FADE_MS <= MAX_ANIMATION_MS);
    assert!(DEFAULT_SWIPE_MS > 0);
    assert!(DEFAULT_SWIPE_MS <= MAX_ANIMATION_MS);

    // Carousel validation
    assert!(DEFAULT_PRELOAD <= MAX_PRELOAD);

    // Slideshow validation
    assert!(MIN_SLIDESHOW_DELAY_MS > 0);
    assert!(MAX_SLIDESHOW_DELAY_MS >= MIN_SLIDESHOW_DELAY_MS);
    assert!(DEFAULT_SLIDESHOW_DELAY_MS >= MIN_SLIDESHOW_DELAY_MS);
    assert!(DEFAULT_SLIDESHOW_DELAY_MS <= MAX_SLIDESHOW_DELAY_MS);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_defaults_are_valid() {
        assert_eq!(SWIPE_THRESHOLD_PX, 30.0);
        assert_eq!(SWIPE_COMMIT_RATIO, 0.3);
        assert_eq!(FLICK_MIN_OFFSET_PX, 5.0);
    }

    #[test]
    fn pull_commit_distance_is_twice_the_threshold() {
        assert_eq!(SWIPE_THRESHOLD_PX * PULL_COMMIT_FACTOR, 60.0);
        assert!(PULL_MIN_OPACITY < 1.0);
    }

    #[test]
    fn wheel_defaults_are_valid() {
        assert_eq!(WHEEL_COMMIT_RATIO, 0.2);
        assert_eq!(WHEEL_INERTIA_FACTOR, 1.2);
        assert_eq!(WHEEL_INERTIA_DECAY_MS, 300);
    }

    #[test]
    fn animation_defaults_are_valid() {
        assert_eq!(DEFAULT_FADE_MS, 250);
        assert_eq!(DEFAULT_SWIPE_MS, 500);
        assert!(DEFAULT_SWIPE_MS <= MAX_ANIMATION_MS);
    }

    #[test]
    fn slideshow_defaults_are_valid() {
        assert_eq!(DEFAULT_SLIDESHOW_DELAY_MS, 3_000);
        assert!(DEFAULT_SLIDESHOW_DELAY_MS >= MIN_SLIDESHOW_DELAY_MS);
        assert!(DEFAULT_SLIDESHOW_DELAY_MS <= MAX_SLIDESHOW_DELAY_MS);
    }
}
