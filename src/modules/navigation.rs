// SPDX-License-Identifier: MPL-2.0
//! Previous/next buttons and arrow-key navigation.

use super::NAVIGATION;
use crate::compose::{Component, Module, MountContext, Mounted, RenderContext, View};
use crate::events::topics::{self, NavigateParams};
use crate::events::EventBus;
use crate::gesture::{KeyEvent, SensorEvent};
use crate::timeouts::Throttle;
use iced_core::keyboard::{key::Named, Key};
use std::rc::Rc;

pub const PREV: &str = "prev";
pub const NEXT: &str = "next";

/// Whether a button in the given direction can do anything.
fn is_disabled(cx: &RenderContext<'_>, previous: bool) -> bool {
    let state = cx.state;
    if state.slide_count() == 0 {
        return true;
    }
    cx.props.carousel.finite && if previous { state.is_first() } else { state.is_last() }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Navigation;

impl Navigation {
    fn button(cx: &RenderContext<'_>, key: &'static str, label: &str, previous: bool) -> Option<View> {
        let overrides = &cx.props.render;
        let custom = if previous {
            overrides.button_prev.as_ref()
        } else {
            overrides.button_next.as_ref()
        };
        let view = match custom {
            Some(render) => render(cx),
            None => View::new("button").with_attribute("aria-label", cx.props.labels.translate(label)),
        };
        (!view.is_empty()).then(|| view.with_key(key).disabled(is_disabled(cx, previous)))
    }
}

impl Component for Navigation {
    fn render(&self, cx: &RenderContext<'_>, children: Vec<View>) -> View {
        // Swap visual sides in right-to-left layouts.
        let (left, right) = if cx.layout.is_rtl {
            (Self::button(cx, NEXT, "Next", false), Self::button(cx, PREV, "Previous", true))
        } else {
            (Self::button(cx, PREV, "Previous", true), Self::button(cx, NEXT, "Next", false))
        };
        View::new(NAVIGATION)
            .with_children(left)
            .with_children(right)
            .with_children(children)
    }

    fn mount(&self, cx: &MountContext) -> Option<Mounted> {
        let interval = cx.props.animation.navigation_duration() / 2;
        let throttle = Rc::new(Throttle::new(cx.timeouts.clone(), interval));

        let keys = {
            let bus = cx.bus.clone();
            let layout = cx.layout.clone();
            let throttle = Rc::clone(&throttle);
            cx.bus.subscribe(topics::SENSOR_KEY_DOWN, move |event| {
                let Some(SensorEvent::KeyDown(KeyEvent { key, .. })) = event.downcast_ref::<SensorEvent>()
                else {
                    return Ok(());
                };
                let forward = match key {
                    Key::Named(Named::ArrowLeft) => layout.get().is_rtl,
                    Key::Named(Named::ArrowRight) => !layout.get().is_rtl,
                    _ => return Ok(()),
                };
                let topic = if forward { topics::ACTION_NEXT } else { topics::ACTION_PREV };
                let bus = bus.clone();
                throttle.call(move || publish_navigation(&bus, topic));
                Ok(())
            })
        };

        let buttons = {
            let bus = cx.bus.clone();
            cx.bus.subscribe(topics::BUTTON_PRESS, move |event| {
                match event.downcast_ref::<String>().map(String::as_str) {
                    Some(PREV) => bus.publish_with(topics::ACTION_PREV, NavigateParams::default()),
                    Some(NEXT) => bus.publish_with(topics::ACTION_NEXT, NavigateParams::default()),
                    _ => Ok(()),
                }
            })
        };

        Some(
            Mounted::new()
                .with_subscription(keys)
                .with_subscription(buttons)
                .on_unmount(move || throttle.cancel()),
        )
    }
}

fn publish_navigation(bus: &EventBus, topic: &str) {
    if let Err(err) = bus.publish_with(topic, NavigateParams::default()) {
        tracing::warn!(topic, %err, "keyboard navigation failed");
    }
}

#[must_use]
pub fn module() -> Module {
    Module::new(NAVIGATION, Navigation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ControllerLayout, LayoutView};
    use crate::domain::Slide;
    use crate::host::NoopHost;
    use crate::props::LightboxProps;
    use crate::state::{NavigationState, Store};
    use crate::timeouts::Timeouts;
    use iced_core::keyboard::Modifiers;
    use std::cell::RefCell;
    use std::time::Duration;

    fn slides() -> Rc<[Slide]> {
        vec![Slide::image("a"), Slide::image("b"), Slide::image("c")].into()
    }

    fn render(props: &LightboxProps, index: usize, is_rtl: bool) -> View {
        let state = NavigationState::new(slides(), index);
        let layout = ControllerLayout {
            is_rtl,
            ..ControllerLayout::default()
        };
        let cx = RenderContext {
            props,
            state: &state,
            layout: &layout,
        };
        Navigation.render(&cx, Vec::new())
    }

    #[test]
    fn finite_edges_disable_buttons() {
        let mut props = LightboxProps::default();
        props.carousel.finite = true;
        let view = render(&props, 0, false);
        assert!(view.find_key(PREV).is_some_and(|b| b.disabled));
        assert!(view.find_key(NEXT).is_some_and(|b| !b.disabled));

        let view = render(&props, 2, false);
        assert!(view.find_key(NEXT).is_some_and(|b| b.disabled));
    }

    #[test]
    fn infinite_never_disables() {
        let view = render(&LightboxProps::default(), 0, false);
        assert!(view.children.iter().all(|b| !b.disabled));
    }

    #[test]
    fn rtl_swaps_sides() {
        let view = render(&LightboxProps::default(), 1, true);
        assert_eq!(view.children[0].key.as_deref(), Some(NEXT));
    }

    #[test]
    fn empty_override_hides_button() {
        let mut props = LightboxProps::default();
        props.render.button_prev = Some(Rc::new(|_| View::empty()));
        let view = render(&props, 1, false);
        assert!(view.find_key(PREV).is_none());
        assert!(view.find_key(NEXT).is_some());
    }

    #[test]
    fn arrow_keys_are_throttled() {
        let bus = EventBus::new();
        let timeouts = Timeouts::new(Duration::ZERO);
        let published = Rc::new(RefCell::new(Vec::new()));
        let _watch = {
            let published = Rc::clone(&published);
            bus.subscribe(topics::ACTION_NEXT, move |_| {
                published.borrow_mut().push("next");
                Ok(())
            })
        };
        let cx = MountContext::new(
            bus.clone(),
            timeouts.clone(),
            Store::new(NavigationState::default()).view(),
            LayoutView::default(),
            Rc::new(LightboxProps::default()),
            Rc::new(NoopHost),
        );
        let _guard = Navigation.mount(&cx);

        let right = SensorEvent::KeyDown(KeyEvent {
            key: Key::Named(Named::ArrowRight),
            modifiers: Modifiers::default(),
        });
        for _ in 0..3 {
            bus.publish_with(topics::SENSOR_KEY_DOWN, right.clone()).expect("key");
        }
        timeouts.advance_to(Duration::ZERO);
        assert_eq!(published.borrow().len(), 1);

        // Trailing call lands one interval (250ms) after the first.
        bus.publish_with(topics::SENSOR_KEY_DOWN, right).expect("key");
        timeouts.advance_to(Duration::from_millis(250));
        assert_eq!(published.borrow().len(), 2);
    }
}
