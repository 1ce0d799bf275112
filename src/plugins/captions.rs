// SPDX-License-Identifier: MPL-2.0
//! Slide titles and descriptions.
//!
//! Wraps the slide footer render override so captions follow whatever an
//! earlier plugin put there. A "captions" toolbar placeholder, when
//! configured, becomes a visibility toggle.

use super::CAPTIONS;
use crate::compose::{
    Component, Module, MountContext, Mounted, Plugin, PluginApi, RenderContext, View,
};
use crate::events::topics;
use crate::modules::toolbar;
use crate::props::{add_toolbar_button, SlideInfo, SlideRenderFn};
use std::cell::Cell;
use std::rc::Rc;

fn caption_view(info: &SlideInfo<'_>) -> Option<View> {
    let slide = info.slide;
    if slide.title.is_none() && slide.description.is_none() {
        return None;
    }
    let mut view = View::new(CAPTIONS);
    if let Some(title) = &slide.title {
        view = view.with_child(View::new("caption-title").with_text(title.clone()));
    }
    if let Some(description) = &slide.description {
        view = view.with_child(View::new("caption-description").with_text(description.clone()));
    }
    Some(view)
}

/// Holds the visibility toggle.
#[derive(Debug, Clone)]
struct Captions {
    visible: Rc<Cell<bool>>,
}

impl Component for Captions {
    fn render(&self, _cx: &RenderContext<'_>, children: Vec<View>) -> View {
        View::fragment(children)
    }

    fn mount(&self, cx: &MountContext) -> Option<Mounted> {
        let visible = Rc::clone(&self.visible);
        let subscription = cx.bus.subscribe(topics::BUTTON_PRESS, move |event| {
            if event.downcast_ref::<String>().is_some_and(|key| key == CAPTIONS) {
                visible.set(!visible.get());
            }
            Ok(())
        });
        Some(Mounted::new().with_subscription(subscription))
    }
}

#[must_use]
pub fn plugin() -> Plugin {
    Rc::new(|api: &mut PluginApi<'_>| {
        let visible = Rc::new(Cell::new(true));
        api.add_module(Module::new(
            CAPTIONS,
            Captions {
                visible: Rc::clone(&visible),
            },
        ));
        api.augment(move |mut props| {
            let previous = props.render.slide_footer.take();
            let shown = Rc::clone(&visible);
            let footer: SlideRenderFn = Rc::new(move |cx: &RenderContext<'_>, info: &SlideInfo<'_>| {
                let mut children: Vec<View> = previous
                    .as_ref()
                    .and_then(|render| render(cx, info))
                    .into_iter()
                    .collect();
                if shown.get() {
                    children.extend(caption_view(info));
                }
                (!children.is_empty()).then(|| View::fragment(children))
            });
            props.render.slide_footer = Some(footer);

            if props.toolbar.keys().contains(&CAPTIONS) {
                let shown = Rc::clone(&visible);
                props.toolbar = add_toolbar_button(
                    props.toolbar,
                    CAPTIONS,
                    Rc::new(move |cx: &RenderContext<'_>| {
                        let label = if shown.get() { "Hide captions" } else { "Show captions" };
                        toolbar::button(CAPTIONS, cx.props.labels.translate(label))
                    }),
                );
            }
            props
        });
    })
}
