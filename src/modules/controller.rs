// SPDX-License-Identifier: MPL-2.0
//! The carousel container. The behavior lives in [`crate::controller`];
//! this module renders the container and takes focus on open.

use super::CONTROLLER;
use crate::compose::{Component, Module, MountContext, Mounted, RenderContext, View};

#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerModule;

impl Component for ControllerModule {
    fn render(&self, cx: &RenderContext<'_>, children: Vec<View>) -> View {
        let dir = if cx.layout.is_rtl { "rtl" } else { "ltr" };
        View::new(CONTROLLER)
            .with_rect(cx.layout.container)
            .with_attribute("dir", dir)
            .with_attribute("aria-label", cx.props.labels.translate("Lightbox"))
            .with_children(children)
    }

    fn mount(&self, cx: &MountContext) -> Option<Mounted> {
        if cx.props.controller.focus {
            cx.host.focus_container();
        }
        None
    }
}

#[must_use]
pub fn module() -> Module {
    Module::new(CONTROLLER, ControllerModule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerLayout;
    use crate::props::LightboxProps;
    use crate::state::NavigationState;

    #[test]
    fn renders_direction_and_children() {
        let props = LightboxProps::default();
        let state = NavigationState::default();
        let layout = ControllerLayout {
            is_rtl: true,
            ..ControllerLayout::default()
        };
        let cx = RenderContext {
            props: &props,
            state: &state,
            layout: &layout,
        };
        let view = ControllerModule.render(&cx, vec![View::new("child")]);
        assert_eq!(view.attribute("dir"), Some("rtl"));
        assert_eq!(view.children.len(), 1);
    }
}
