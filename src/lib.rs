// SPDX-License-Identifier: MPL-2.0
//! `slidelens` is a headless, plugin-composable lightbox core.
//!
//! It keeps the navigation state of an image/video carousel, recognizes
//! pointer and wheel swipes, sequences the carousel transitions and wires
//! optional plugins (counter, captions, inline, slideshow) into a module
//! tree. It never draws: the host feeds it input and a clock, and renders
//! the [`View`](compose::View) it describes.
//!
//! ```
//! use iced_core::{Point, Rectangle, Size};
//! use slidelens::domain::Slide;
//! use slidelens::host::NoopHost;
//! use slidelens::plugins;
//! use slidelens::{Lightbox, LightboxProps};
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let props = LightboxProps::default()
//!     .with_slides(vec![Slide::image("a.jpg"), Slide::image("b.jpg")])
//!     .with_plugin(plugins::counter::plugin());
//! let container = Rectangle::new(Point::ORIGIN, Size::new(800.0, 600.0));
//! let mut lightbox =
//!     Lightbox::open(props, Rc::new(NoopHost), container, Duration::ZERO).unwrap();
//!
//! lightbox.next().unwrap();
//! assert_eq!(lightbox.current_index(), 1);
//!
//! let counter = lightbox.view();
//! assert_eq!(counter.find("counter").and_then(|c| c.text.as_deref()), Some("2 / 2"));
//! ```

#![doc(html_root_url = "https://docs.rs/slidelens/0.1.0")]

pub mod animation;
pub mod compose;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod events;
pub mod gesture;
pub mod host;
pub mod lightbox;
pub mod modules;
pub mod plugins;
pub mod props;
pub mod state;
pub mod timeouts;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{Error, Result};
pub use lightbox::Lightbox;
pub use props::LightboxProps;
