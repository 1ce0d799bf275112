// SPDX-License-Identifier: MPL-2.0
//! Automatic slide advance.
//!
//! While playing, the next slide is requested `delay` after each view
//! change. A slide reporting that it is loading or playing media holds the
//! timer until it reports an error or completion. Finite carousels stop at
//! the last slide.

use super::SLIDESHOW;
use crate::compose::{
    Component, Module, MountContext, Mounted, Plugin, PluginApi, RenderContext, View,
};
use crate::domain::SlideshowDelay;
use crate::events::topics::{self, NavigateParams};
use crate::events::EventBus;
use crate::modules::toolbar;
use crate::props::{add_toolbar_button, Callbacks, LightboxProps};
use crate::state::StateView;
use crate::timeouts::Delay;
use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Per-mount playback state.
struct Session {
    playing: Rc<Cell<bool>>,
    /// The active slide asked to hold the timer.
    held: Cell<bool>,
    timer: Delay,
    delay: Duration,
    bus: EventBus,
    state: StateView,
    props: Rc<LightboxProps>,
}

impl Session {
    fn at_end(&self) -> bool {
        self.props.carousel.finite && self.state.get().is_last()
    }

    fn start(self: &Rc<Self>) {
        if self.playing.get() || self.at_end() {
            return;
        }
        tracing::debug!(delay_ms = self.delay.as_millis() as u64, "slideshow started");
        self.playing.set(true);
        Callbacks::fire(&self.props.on.slideshow_start);
        self.schedule();
    }

    fn stop(&self) {
        if !self.playing.replace(false) {
            return;
        }
        tracing::debug!("slideshow stopped");
        self.timer.cancel();
        Callbacks::fire(&self.props.on.slideshow_stop);
    }

    fn toggle(self: &Rc<Self>) {
        if self.playing.get() {
            self.stop();
        } else {
            self.start();
        }
    }

    fn schedule(self: &Rc<Self>) {
        self.timer.cancel();
        if !self.playing.get() || self.held.get() {
            return;
        }
        if self.at_end() {
            self.stop();
            return;
        }
        let session: Weak<Self> = Rc::downgrade(self);
        self.timer.schedule(self.delay, move || {
            if let Some(session) = session.upgrade() {
                if let Err(err) = session
                    .bus
                    .publish_with(topics::ACTION_NEXT, NavigateParams::default())
                {
                    tracing::warn!(%err, "slideshow advance failed");
                }
            }
        });
    }

    fn hold(self: &Rc<Self>, held: bool) {
        self.held.set(held);
        self.schedule();
    }
}

#[derive(Debug, Clone)]
struct Slideshow {
    playing: Rc<Cell<bool>>,
}

impl Component for Slideshow {
    fn render(&self, _cx: &RenderContext<'_>, children: Vec<View>) -> View {
        View::fragment(children)
    }

    fn mount(&self, cx: &MountContext) -> Option<Mounted> {
        self.playing.set(false);
        let delay = u64::try_from(cx.props.slideshow.delay.as_millis()).unwrap_or(u64::MAX);
        let session = Rc::new(Session {
            playing: Rc::clone(&self.playing),
            held: Cell::new(false),
            timer: Delay::new(cx.timeouts.clone()),
            delay: SlideshowDelay::from_millis(delay).value(),
            bus: cx.bus.clone(),
            state: cx.state.clone(),
            props: Rc::clone(&cx.props),
        });

        let mut mounted = Mounted::new();
        let handlers: [(&'static str, fn(&Rc<Session>)); 5] = [
            (topics::VIEW, |s| s.schedule()),
            (topics::ACTIVE_SLIDE_LOADING, |s| s.hold(true)),
            (topics::ACTIVE_SLIDE_PLAYING, |s| s.hold(true)),
            (topics::ACTIVE_SLIDE_ERROR, |s| s.hold(false)),
            (topics::ACTIVE_SLIDE_COMPLETE, |s| s.hold(false)),
        ];
        for (topic, handler) in handlers {
            let session = Rc::clone(&session);
            mounted = mounted.with_subscription(cx.bus.subscribe(topic, move |_| {
                handler(&session);
                Ok(())
            }));
        }

        let press = {
            let session = Rc::clone(&session);
            cx.bus.subscribe(topics::BUTTON_PRESS, move |event| {
                if event.downcast_ref::<String>().is_some_and(|key| key == SLIDESHOW) {
                    session.toggle();
                }
                Ok(())
            })
        };

        if cx.props.slideshow.autoplay {
            session.start();
        }

        Some(mounted.with_subscription(press).on_unmount(move || {
            session.timer.cancel();
            session.playing.set(false);
        }))
    }
}

#[must_use]
pub fn plugin() -> Plugin {
    Rc::new(|api: &mut PluginApi<'_>| {
        let playing = Rc::new(Cell::new(false));
        api.add_module(Module::new(
            SLIDESHOW,
            Slideshow {
                playing: Rc::clone(&playing),
            },
        ));
        api.augment(move |mut props| {
            let playing = Rc::clone(&playing);
            props.toolbar = add_toolbar_button(
                props.toolbar,
                SLIDESHOW,
                Rc::new(move |cx: &RenderContext<'_>| {
                    let label = if playing.get() { "Pause" } else { "Play" };
                    let at_end = cx.props.carousel.finite && cx.state.is_last();
                    toolbar::button(SLIDESHOW, cx.props.labels.translate(label))
                        .disabled(cx.state.slide_count() == 0 || (at_end && !playing.get()))
                }),
            );
            props
        });
    })
}
