// SPDX-License-Identifier: MPL-2.0
//! Domain layer - slide descriptions and geometry value objects.
//!
//! Types here carry no runtime wiring. They only depend on `std`, `serde`
//! for the configuration wire format and `iced_core` geometry.
//!
//! # Modules
//!
//! - [`slide`]: Slide descriptions ([`Slide`](slide::Slide),
//!   [`SlideContent`](slide::SlideContent), [`SlideStatus`](slide::SlideStatus))
//! - [`length`]: CSS-like lengths ([`LengthPercentage`](length::LengthPercentage))
//!   and slide rectangle computation
//! - [`newtypes`]: Clamped value objects ([`PreloadRadius`](newtypes::PreloadRadius),
//!   [`SlideshowDelay`](newtypes::SlideshowDelay))

pub mod length;
pub mod newtypes;
pub mod slide;

pub use length::{compute_slide_rect, LengthPercentage};
pub use newtypes::{PreloadRadius, SlideshowDelay};
pub use slide::{Slide, SlideContent, SlideStatus, VideoSource};
