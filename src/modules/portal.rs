// SPDX-License-Identifier: MPL-2.0
//! Overlay lifecycle.
//!
//! Opening marks the page inert and fades in (`entering` → `entered`).
//! A `close` action restores the page and fades out (`exiting` →
//! `exited`), then calls the `close` prop and asks the instance to unmount.

use super::PORTAL;
use crate::compose::{Component, Module, MountContext, Mounted, RenderContext, View};
use crate::events::topics;
use crate::props::Callbacks;
use crate::timeouts::Delay;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Closed,
    Entering,
    Open,
    Exiting,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Phase::Closed => "closed",
            Phase::Entering => "entering",
            Phase::Open => "open",
            Phase::Exiting => "exiting",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Portal {
    phase: Rc<Cell<Phase>>,
}

impl Portal {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase.get()
    }
}

fn fade(cx: &MountContext) -> Duration {
    if cx.host.prefers_reduced_motion() {
        Duration::ZERO
    } else {
        cx.props.animation.fade
    }
}

impl Component for Portal {
    fn render(&self, cx: &RenderContext<'_>, children: Vec<View>) -> View {
        let phase = self.phase.get();
        let opacity = if phase == Phase::Open || phase == Phase::Entering { 1.0 } else { 0.0 };
        View::new(PORTAL)
            .with_attribute("phase", phase.as_str())
            .with_attribute("opacity", opacity.to_string())
            .with_attribute("fade-easing", cx.props.animation.easing.fade.to_string())
            .with_children(children)
    }

    fn mount(&self, cx: &MountContext) -> Option<Mounted> {
        let fade = fade(cx);
        let timer = Rc::new(Delay::new(cx.timeouts.clone()));

        cx.host.set_siblings_inert(true);
        self.phase.set(Phase::Entering);
        Callbacks::fire(&cx.props.on.entering);
        {
            let phase = Rc::clone(&self.phase);
            let props = Rc::clone(&cx.props);
            timer.schedule(fade, move || {
                phase.set(Phase::Open);
                Callbacks::fire(&props.on.entered);
            });
        }

        let close = {
            let phase = Rc::clone(&self.phase);
            let timer = Rc::clone(&timer);
            let cx = cx.clone();
            cx.bus.clone().subscribe(topics::ACTION_CLOSE, move |_| {
                if matches!(phase.get(), Phase::Exiting | Phase::Closed) {
                    return Ok(());
                }
                tracing::debug!("closing lightbox");
                phase.set(Phase::Exiting);
                Callbacks::fire(&cx.props.on.exiting);
                cx.host.set_siblings_inert(false);
                cx.host.restore_focus();

                let phase = Rc::clone(&phase);
                let done = cx.clone();
                timer.schedule(fade, move || {
                    phase.set(Phase::Closed);
                    Callbacks::fire(&done.props.on.exited);
                    Callbacks::fire(&done.props.close);
                    done.request_removal();
                });
                Ok(())
            })
        };

        let phase = Rc::clone(&self.phase);
        let host = Rc::clone(&cx.host);
        Some(
            Mounted::new()
                .with_subscription(close)
                .on_unmount(move || {
                    timer.cancel();
                    // Unmounted without the close sequence.
                    if matches!(phase.get(), Phase::Entering | Phase::Open) {
                        host.set_siblings_inert(false);
                    }
                    phase.set(Phase::Closed);
                }),
        )
    }
}

#[must_use]
pub fn module() -> Module {
    Module::new(PORTAL, Portal::default())
}
