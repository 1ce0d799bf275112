// SPDX-License-Identifier: MPL-2.0
//! Clamped value objects for carousel and slideshow configuration.

use crate::config::defaults::{
    DEFAULT_PRELOAD, DEFAULT_SLIDESHOW_DELAY_MS, MAX_PRELOAD, MAX_SLIDESHOW_DELAY_MS,
    MIN_SLIDESHOW_DELAY_MS,
};
use std::time::Duration;

// =============================================================================
// PreloadRadius
// =============================================================================

/// Number of slides rendered on each side of the current slide,
/// guaranteed to be within `0..=MAX_PRELOAD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadRadius(usize);

impl PreloadRadius {
    /// Creates a preload radius, clamping to the valid range.
    #[must_use]
    pub fn new(radius: usize) -> Self {
        Self(radius.min(MAX_PRELOAD))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Effective radius for a carousel of `slide_count` slides.
    ///
    /// A finite carousel never needs more than `n - 1` neighbours; an
    /// infinite one at most half the slides on each side. At least one
    /// neighbour is always kept.
    #[must_use]
    pub fn effective(self, slide_count: usize, finite: bool) -> usize {
        let limit = if finite {
            slide_count.saturating_sub(1)
        } else {
            slide_count / 2
        };
        self.0.min(limit.max(1))
    }
}

impl Default for PreloadRadius {
    fn default() -> Self {
        Self(DEFAULT_PRELOAD)
    }
}

// =============================================================================
// SlideshowDelay
// =============================================================================

/// Delay between slideshow advances, guaranteed to be within valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideshowDelay(Duration);

impl SlideshowDelay {
    /// Creates a slideshow delay from milliseconds, clamping to the valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(
            millis.clamp(MIN_SLIDESHOW_DELAY_MS, MAX_SLIDESHOW_DELAY_MS),
        ))
    }

    #[must_use]
    pub fn value(self) -> Duration {
        self.0
    }
}

impl Default for SlideshowDelay {
    fn default() -> Self {
        Self(Duration::from_millis(DEFAULT_SLIDESHOW_DELAY_MS))
    }
}
