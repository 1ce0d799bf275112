// SPDX-License-Identifier: MPL-2.0
//! Public configuration of a lightbox instance.
//!
//! [`LightboxProps`] is what plugin augmentations transform. It combines the
//! persisted [`Settings`](crate::config::Settings) tables with runtime-only
//! parts: the slide list, render overrides, callbacks and plugins.

use crate::compose::{Plugin, RenderContext, View};
use crate::config::{
    AnimationSettings, CarouselSettings, ControllerSettings, CounterSettings, Labels,
    NoScrollSettings, Settings, SlideshowSettings,
};
use crate::domain::Slide;
use crate::events::topics::ViewChanged;
use iced_core::Rectangle;
use std::fmt;
use std::rc::Rc;

/// Renders a view from the current context.
pub type RenderFn = Rc<dyn Fn(&RenderContext<'_>) -> View>;

/// Renders a per-slide view; `None` falls back to the default.
pub type SlideRenderFn = Rc<dyn Fn(&RenderContext<'_>, &SlideInfo<'_>) -> Option<View>>;

pub type Callback = Rc<dyn Fn()>;

/// What a slide render override receives.
#[derive(Debug, Clone, Copy)]
pub struct SlideInfo<'a> {
    pub slide: &'a Slide,
    pub rect: Rectangle,
    /// Position relative to the current slide.
    pub offset: i64,
}

impl SlideInfo<'_> {
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.offset == 0
    }
}

/// Optional render overrides.
#[derive(Clone, Default)]
pub struct RenderOverrides {
    pub slide: Option<SlideRenderFn>,
    pub slide_header: Option<SlideRenderFn>,
    pub slide_footer: Option<SlideRenderFn>,
    /// Replaces the previous button; hidden when it renders an empty view.
    pub button_prev: Option<RenderFn>,
    pub button_next: Option<RenderFn>,
}

/// Lifecycle and navigation callbacks.
#[derive(Clone, Default)]
pub struct Callbacks {
    pub view: Option<Rc<dyn Fn(ViewChanged)>>,
    pub entering: Option<Callback>,
    pub entered: Option<Callback>,
    pub exiting: Option<Callback>,
    pub exited: Option<Callback>,
    pub slideshow_start: Option<Callback>,
    pub slideshow_stop: Option<Callback>,
}

impl Callbacks {
    pub(crate) fn fire(callback: &Option<Callback>) {
        if let Some(callback) = callback {
            callback();
        }
    }
}

/// One toolbar entry.
#[derive(Clone)]
pub enum ToolbarItem {
    /// A built-in button (`"close"`) or a placeholder a plugin may fill.
    Key(String),
    Button { key: String, render: RenderFn },
}

impl ToolbarItem {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            ToolbarItem::Key(key) | ToolbarItem::Button { key, .. } => key,
        }
    }
}

impl fmt::Debug for ToolbarItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolbarItem::Key(key) => f.debug_tuple("Key").field(key).finish(),
            ToolbarItem::Button { key, .. } => f.debug_struct("Button").field("key", key).finish(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Toolbar {
    pub buttons: Vec<ToolbarItem>,
}

impl Toolbar {
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.buttons.iter().map(ToolbarItem::key).collect()
    }
}

/// Puts a button into the toolbar: it takes the place of a placeholder with
/// the same key, or goes first when there is none.
#[must_use]
pub fn add_toolbar_button(mut toolbar: Toolbar, key: &str, render: RenderFn) -> Toolbar {
    let button = ToolbarItem::Button {
        key: key.to_string(),
        render,
    };
    let placeholder = toolbar
        .buttons
        .iter()
        .position(|item| matches!(item, ToolbarItem::Key(existing) if existing == key));
    match placeholder {
        Some(position) => toolbar.buttons[position] = button,
        None => toolbar.buttons.insert(0, button),
    }
    toolbar
}

#[derive(Clone)]
pub struct LightboxProps {
    pub slides: Rc<[Slide]>,
    pub index: usize,
    pub carousel: CarouselSettings,
    pub animation: AnimationSettings,
    pub controller: ControllerSettings,
    pub toolbar: Toolbar,
    pub labels: Labels,
    pub no_scroll: NoScrollSettings,
    pub slideshow: SlideshowSettings,
    pub counter: CounterSettings,
    pub render: RenderOverrides,
    pub on: Callbacks,
    /// Called once the close sequence has finished.
    pub close: Option<Callback>,
    pub plugins: Vec<Plugin>,
}

impl LightboxProps {
    #[must_use]
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            slides: Rc::from(Vec::new()),
            index: 0,
            carousel: settings.carousel,
            animation: settings.animation,
            controller: settings.controller,
            toolbar: Toolbar {
                buttons: settings
                    .toolbar
                    .buttons
                    .into_iter()
                    .map(ToolbarItem::Key)
                    .collect(),
            },
            labels: settings.labels,
            no_scroll: settings.no_scroll,
            slideshow: settings.slideshow,
            counter: settings.counter,
            render: RenderOverrides::default(),
            on: Callbacks::default(),
            close: None,
            plugins: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_slides(mut self, slides: impl Into<Rc<[Slide]>>) -> Self {
        self.slides = slides.into();
        self
    }

    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    #[must_use]
    pub fn with_plugin(mut self, plugin: Plugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    #[must_use]
    pub fn on_close(mut self, close: impl Fn() + 'static) -> Self {
        self.close = Some(Rc::new(close));
        self
    }
}

impl Default for LightboxProps {
    fn default() -> Self {
        Self::from_settings(Settings::default())
    }
}

impl fmt::Debug for LightboxProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightboxProps")
            .field("slides", &self.slides.len())
            .field("index", &self.index)
            .field("carousel", &self.carousel)
            .field("animation", &self.animation)
            .field("controller", &self.controller)
            .field("toolbar", &self.toolbar)
            .field("plugins", &self.plugins.len())
            .finish_non_exhaustive()
    }
}
