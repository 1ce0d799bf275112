// SPDX-License-Identifier: MPL-2.0
//! Embeds the carousel in the page instead of an overlay.
//!
//! The portal is swapped for a plain container with no fade or inert
//! handling, scroll locking is dropped, and the toolbar starts empty.

use super::INLINE;
use crate::compose::{Component, Module, Plugin, PluginApi, RenderContext, View};
use crate::domain::LengthPercentage;
use crate::modules::{NO_SCROLL, PORTAL};
use crate::props::Toolbar;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, Default)]
pub struct Inline;

impl Component for Inline {
    fn render(&self, _cx: &RenderContext<'_>, children: Vec<View>) -> View {
        View::new(INLINE).with_children(children)
    }
}

#[must_use]
pub fn plugin() -> Plugin {
    Rc::new(|api: &mut PluginApi<'_>| {
        api.augment(|mut props| {
            props.close = None;
            props.toolbar = Toolbar::default();
            props.controller.focus = false;
            props.carousel.padding = LengthPercentage::Pixels(0.0);
            props
        });
        api.remove(NO_SCROLL);
        api.replace(PORTAL, Module::new(INLINE, Inline));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::outline;
    use crate::plugins::testing::install;
    use crate::props::LightboxProps;

    #[test]
    fn replaces_portal_and_drops_scroll_lock() {
        let (tree, _) = install(plugin(), LightboxProps::default());
        assert_eq!(
            outline(&tree),
            "inline(controller(carousel, toolbar, navigation))"
        );
    }

    #[test]
    fn props_are_adjusted_for_embedding() {
        let props = LightboxProps::default().on_close(|| {});
        let (_, props) = install(plugin(), props);
        assert!(props.close.is_none());
        assert!(props.toolbar.buttons.is_empty());
        assert!(!props.controller.focus);
        assert_eq!(props.carousel.padding, LengthPercentage::Pixels(0.0));
    }
}
