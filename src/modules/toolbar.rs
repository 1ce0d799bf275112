// SPDX-License-Identifier: MPL-2.0
//! Toolbar: built-in and plugin buttons in configured order.

use super::TOOLBAR;
use crate::compose::{Component, Module, MountContext, Mounted, RenderContext, View};
use crate::events::topics;
use crate::props::ToolbarItem;

/// Key of the built-in close button.
pub const CLOSE: &str = "close";

/// A toolbar button view. Activation goes through
/// [`Lightbox::press`](crate::lightbox::Lightbox::press) with the same key.
#[must_use]
pub fn button(key: &str, label: &str) -> View {
    View::new("button")
        .with_key(key)
        .with_attribute("aria-label", label)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Toolbar;

impl Component for Toolbar {
    fn render(&self, cx: &RenderContext<'_>, children: Vec<View>) -> View {
        let labels = &cx.props.labels;
        let buttons = cx.props.toolbar.buttons.iter().filter_map(|item| match item {
            ToolbarItem::Key(key) if key == CLOSE => Some(button(CLOSE, labels.translate("Close"))),
            // Placeholder nobody filled.
            ToolbarItem::Key(_) => None,
            ToolbarItem::Button { key, render } => {
                let view = render(cx);
                (!view.is_empty()).then(|| view.with_key(key.clone()))
            }
        });
        View::new(TOOLBAR).with_children(buttons).with_children(children)
    }

    fn mount(&self, cx: &MountContext) -> Option<Mounted> {
        let bus = cx.bus.clone();
        let subscription = cx.bus.subscribe(topics::BUTTON_PRESS, move |event| {
            if event.downcast_ref::<String>().is_some_and(|key| key == CLOSE) {
                bus.publish(topics::ACTION_CLOSE)?;
            }
            Ok(())
        });
        Some(Mounted::new().with_subscription(subscription))
    }
}

#[must_use]
pub fn module() -> Module {
    Module::new(TOOLBAR, Toolbar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ControllerLayout, LayoutView};
    use crate::events::EventBus;
    use crate::host::NoopHost;
    use crate::props::{add_toolbar_button, LightboxProps};
    use crate::state::{NavigationState, Store};
    use crate::timeouts::Timeouts;
    use std::cell::Cell;
    use std::rc::Rc;

    fn render(props: &LightboxProps) -> View {
        let state = NavigationState::default();
        let layout = ControllerLayout::default();
        let cx = RenderContext {
            props,
            state: &state,
            layout: &layout,
        };
        Toolbar.render(&cx, Vec::new())
    }

    #[test]
    fn renders_close_and_plugin_buttons_in_order() {
        let mut props = LightboxProps::default();
        props.toolbar = add_toolbar_button(
            props.toolbar,
            "slideshow",
            Rc::new(|_| button("slideshow", "Play")),
        );
        let view = render(&props);
        let keys: Vec<_> = view.children.iter().filter_map(|c| c.key.as_deref()).collect();
        assert_eq!(keys, vec!["slideshow", "close"]);
    }

    #[test]
    fn unfilled_placeholders_and_empty_buttons_are_skipped() {
        let mut props = LightboxProps::default();
        props.toolbar.buttons.insert(0, ToolbarItem::Key("zoom".into()));
        props.toolbar = add_toolbar_button(props.toolbar, "hidden", Rc::new(|_| View::empty()));
        let view = render(&props);
        assert_eq!(view.children.len(), 1);
    }

    #[test]
    fn close_label_is_translated() {
        let mut props = LightboxProps::default();
        props.labels.insert("Close", "Fermer");
        let view = render(&props);
        assert_eq!(
            view.find_key(CLOSE).and_then(|b| b.attribute("aria-label")),
            Some("Fermer")
        );
    }

    #[test]
    fn pressing_close_publishes_close() {
        let bus = EventBus::new();
        let closed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&closed);
        let _watch = bus.subscribe(topics::ACTION_CLOSE, move |_| {
            flag.set(true);
            Ok(())
        });
        let cx = MountContext::new(
            bus.clone(),
            Timeouts::default(),
            Store::new(NavigationState::default()).view(),
            LayoutView::default(),
            Rc::new(LightboxProps::default()),
            Rc::new(NoopHost),
        );
        let _guard = Toolbar.mount(&cx);
        bus.publish_with(topics::BUTTON_PRESS, "close".to_string()).expect("press");
        assert!(closed.get());
    }
}
