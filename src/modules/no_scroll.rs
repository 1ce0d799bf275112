// SPDX-License-Identifier: MPL-2.0
//! Locks scrolling of the page behind the lightbox while it is mounted.

use super::NO_SCROLL;
use crate::compose::{Component, Module, MountContext, Mounted, RenderContext, View};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoScroll;

impl Component for NoScroll {
    fn render(&self, _cx: &RenderContext<'_>, children: Vec<View>) -> View {
        View::fragment(children)
    }

    fn mount(&self, cx: &MountContext) -> Option<Mounted> {
        if cx.props.no_scroll.disabled {
            return None;
        }
        cx.host.lock_scroll(true);
        let host = Rc::clone(&cx.host);
        Some(Mounted::new().on_unmount(move || host.lock_scroll(false)))
    }
}

#[must_use]
pub fn module() -> Module {
    Module::new(NO_SCROLL, NoScroll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::LayoutView;
    use crate::events::EventBus;
    use crate::host::testing::RecordingHost;
    use crate::props::LightboxProps;
    use crate::state::{NavigationState, Store};
    use crate::timeouts::Timeouts;

    fn context(props: LightboxProps, host: Rc<RecordingHost>) -> MountContext {
        MountContext::new(
            EventBus::new(),
            Timeouts::default(),
            Store::new(NavigationState::default()).view(),
            LayoutView::default(),
            Rc::new(props),
            host,
        )
    }

    #[test]
    fn locks_until_unmounted() {
        let host = Rc::new(RecordingHost::default());
        let guard = NoScroll.mount(&context(LightboxProps::default(), Rc::clone(&host)));
        assert_eq!(host.calls(), vec!["lock-scroll:true"]);
        drop(guard);
        assert_eq!(host.calls(), vec!["lock-scroll:true", "lock-scroll:false"]);
    }

    #[test]
    fn disabled_leaves_scrolling_alone() {
        let host = Rc::new(RecordingHost::default());
        let mut props = LightboxProps::default();
        props.no_scroll.disabled = true;
        assert!(NoScroll.mount(&context(props, Rc::clone(&host))).is_none());
        assert!(host.calls().is_empty());
    }
}
