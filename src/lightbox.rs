// SPDX-License-Identifier: MPL-2.0
//! A running lightbox instance.
//!
//! [`Lightbox`] owns everything one open lightbox needs: the event bus, the
//! timer registry, the controller and the mounted component tree. The host
//! drives it with input events and its own clock, and renders from
//! [`Lightbox::view`] and [`Lightbox::transform`].
//!
//! Every entry point ends with a pump: queued controller work is applied,
//! callbacks that came due are run, and the layout is committed. When the
//! portal finishes its close sequence the instance unmounts itself.

use crate::animation::Keyframe;
use crate::compose::{
    create_node, mount_tree, render_tree, with_plugins, MountContext, Mounted, Node,
    RenderContext, View,
};
use crate::controller::Controller;
use crate::domain::{Slide, SlideStatus};
use crate::error::{Error, Result};
use crate::events::{topics, EventBus, Subscription};
use crate::gesture::SensorEvent;
use crate::host::HostEnvironment;
use crate::modules::{base_tree, root};
use crate::props::LightboxProps;
use crate::state::{Action, NavigationState};
use crate::timeouts::Timeouts;
use iced_core::Rectangle;
use std::cell::Ref;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Keeps the first error of a sequence of steps that must all run.
#[derive(Default)]
struct FirstError(Option<Error>);

impl FirstError {
    fn record(&mut self, result: Result<()>) {
        if let Err(err) = result {
            self.0.get_or_insert(err);
        }
    }

    fn finish<T>(self, value: T) -> Result<T> {
        self.0.map_or(Ok(value), Err)
    }
}

pub struct Lightbox {
    props: Rc<LightboxProps>,
    tree: Vec<Node>,
    bus: EventBus,
    timeouts: Timeouts,
    controller: Controller,
    mount: MountContext,
    mounted: Vec<Mounted>,
    open: bool,
}

impl Lightbox {
    /// Composes the plugins, mounts the tree and starts the entry fade.
    ///
    /// `now` is the host clock reading the instance starts from.
    pub fn open(
        props: LightboxProps,
        host: Rc<dyn HostEnvironment>,
        container: Rectangle,
        now: Duration,
    ) -> Result<Self> {
        let composition = with_plugins(base_tree(), &props.plugins);
        let props = Rc::new(composition.augment(props));
        let tree = vec![create_node(root(), composition.into_tree())];

        let bus = EventBus::new();
        let timeouts = Timeouts::new(now);
        let controller = Controller::new(
            Rc::clone(&props),
            bus.clone(),
            timeouts.clone(),
            Rc::clone(&host),
            container,
        );
        let mount = MountContext::new(
            bus.clone(),
            timeouts.clone(),
            controller.state_view(),
            controller.layout_view(),
            Rc::clone(&props),
            host,
        );
        let mounted = mount_tree(&tree, &mount);
        tracing::debug!(
            slides = props.slides.len(),
            index = props.index,
            mounted = mounted.len(),
            "lightbox opened"
        );

        let mut lightbox = Self {
            props,
            tree,
            bus,
            timeouts,
            controller,
            mount,
            mounted,
            open: true,
        };
        lightbox.pump()?;
        Ok(lightbox)
    }

    /// Advances the clock to `now`, running due callbacks in deadline order.
    ///
    /// Returns whether an animation is still playing, i.e. whether the host
    /// should keep requesting frames.
    pub fn advance(&mut self, now: Duration) -> Result<bool> {
        let mut errors = FirstError::default();
        errors.record(self.run_timers(now));
        // Navigation requested straight through the controller is queued.
        if self.open && self.controller.has_pending() {
            errors.record(self.pump());
        }
        let animating = self.open && self.controller.tick(now);
        errors.finish(animating)
    }

    /// Feeds one host input event. Callbacks due before `now` run first.
    pub fn handle_sensor(&mut self, event: &SensorEvent, now: Duration) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        let mut errors = FirstError::default();
        errors.record(self.run_timers(now));
        if self.open {
            errors.record(self.controller.handle_sensor(event));
            errors.record(self.pump());
        }
        errors.finish(())
    }

    pub fn prev(&mut self) -> Result<()> {
        self.prev_by(1)
    }

    pub fn next(&mut self) -> Result<()> {
        self.next_by(1)
    }

    /// Moves back `count` slides in one animation. A finite carousel
    /// ignores the move while on its first slide.
    pub fn prev_by(&mut self, count: usize) -> Result<()> {
        let result = self.controller.prev(count);
        self.settle(result)
    }

    /// Moves forward `count` slides in one animation.
    pub fn next_by(&mut self, count: usize) -> Result<()> {
        let result = self.controller.next(count);
        self.settle(result)
    }

    /// Starts the close sequence. The instance unmounts once it finishes.
    pub fn close(&mut self) -> Result<()> {
        let result = self.controller.close();
        self.settle(result)
    }

    pub fn focus(&self) {
        self.controller.focus();
    }

    /// Activates the toolbar or navigation button rendered with `key`.
    pub fn press(&mut self, key: &str) -> Result<()> {
        let result = self.bus.publish_with(topics::BUTTON_PRESS, key.to_string());
        self.settle(result)
    }

    /// Relays a render adapter's report about slide `index`. Reports about
    /// slides other than the current one are ignored.
    pub fn report_slide_status(&mut self, index: usize, status: SlideStatus) -> Result<()> {
        if index != self.controller.current_index() {
            tracing::trace!(index, ?status, "status of inactive slide ignored");
            return Ok(());
        }
        let topic = match status {
            SlideStatus::Loading => topics::ACTIVE_SLIDE_LOADING,
            SlideStatus::Playing => topics::ACTIVE_SLIDE_PLAYING,
            SlideStatus::Error => topics::ACTIVE_SLIDE_ERROR,
            SlideStatus::Complete => topics::ACTIVE_SLIDE_COMPLETE,
        };
        let result = self.bus.publish(topic);
        self.settle(result)
    }

    /// Replaces the slide list and jumps to `index`.
    pub fn update_slides(&mut self, slides: impl Into<Rc<[Slide]>>, index: usize) -> Result<()> {
        let action = Action::Update {
            slides: slides.into(),
            index,
        };
        let result = self.bus.publish_with(topics::ACTION_SWIPE, action);
        self.settle(result)
    }

    pub fn resize(&mut self, container: Rectangle) {
        self.controller.resize(container);
    }

    pub fn set_rtl(&mut self, is_rtl: bool) {
        self.controller.set_rtl(is_rtl);
    }

    /// Describes what to draw right now.
    #[must_use]
    pub fn view(&self) -> View {
        let state = self.controller.state();
        let layout = self.controller.layout_view().get();
        let cx = RenderContext {
            props: &self.props,
            state: &state,
            layout: &layout,
        };
        render_tree(&self.tree, &cx)
    }

    /// Carousel transform to apply at `now`.
    #[must_use]
    pub fn transform(&self, now: Duration) -> Keyframe {
        self.controller.transform(now)
    }

    #[must_use]
    pub fn props(&self) -> &LightboxProps {
        &self.props
    }

    #[must_use]
    pub fn state(&self) -> Ref<'_, NavigationState> {
        self.controller.state()
    }

    #[must_use]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.controller.current_index()
    }

    #[must_use]
    pub fn global_index(&self) -> i64 {
        self.controller.global_index()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The composed module tree, rooted at `root`.
    #[must_use]
    pub fn tree(&self) -> &[Node] {
        &self.tree
    }

    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Earliest pending callback; the host should call
    /// [`advance`](Self::advance) no later than this.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timeouts.next_deadline()
    }

    #[must_use]
    pub fn pending_timeouts(&self) -> usize {
        self.timeouts.pending_count()
    }

    /// See [`Controller::subscribe_sensors`].
    pub fn subscribe_sensors<F>(&self, topic: &'static str, handler: F) -> Subscription
    where
        F: FnMut(&SensorEvent) + 'static,
    {
        self.controller.subscribe_sensors(topic, handler)
    }

    /// Tears the instance down immediately, without the close sequence.
    pub fn unmount(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        let dropped = self.timeouts.clear_all();
        // Children first.
        while let Some(guard) = self.mounted.pop() {
            drop(guard);
        }
        self.bus.clear();
        tracing::debug!(dropped_timeouts = dropped, "lightbox unmounted");
    }

    fn settle(&mut self, result: Result<()>) -> Result<()> {
        let mut errors = FirstError::default();
        errors.record(result);
        errors.record(self.pump());
        errors.finish(())
    }

    /// Applies queued work, runs callbacks due at the current time and
    /// commits the layout.
    fn pump(&mut self) -> Result<()> {
        let mut errors = FirstError::default();
        errors.record(self.controller.process_pending());
        errors.record(self.run_timers(self.timeouts.now()));
        if self.open {
            self.controller.layout();
        }
        errors.finish(())
    }

    fn run_timers(&mut self, now: Duration) -> Result<()> {
        let mut errors = FirstError::default();
        while self.open && self.timeouts.fire_next(now) {
            errors.record(self.controller.process_pending());
            self.controller.layout();
            self.check_removal();
        }
        self.timeouts.advance_to(now);
        errors.finish(())
    }

    fn check_removal(&mut self) {
        if self.mount.removal_requested() {
            self.unmount();
        }
    }
}

impl Drop for Lightbox {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl fmt::Debug for Lightbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lightbox")
            .field("open", &self.open)
            .field("controller", &self.controller)
            .field("bus", &self.bus)
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::outline;
    use crate::host::testing::RecordingHost;
    use crate::plugins;
    use iced_core::{Point, Size};
    use std::cell::Cell;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn container() -> Rectangle {
        Rectangle::new(Point::ORIGIN, Size::new(300.0, 200.0))
    }

    fn props() -> LightboxProps {
        LightboxProps::default()
            .with_slides(vec![Slide::image("a"), Slide::image("b"), Slide::image("c")])
            .with_index(1)
    }

    fn open(props: LightboxProps) -> (Lightbox, Rc<RecordingHost>) {
        let host = Rc::new(RecordingHost::default());
        let lightbox =
            Lightbox::open(props, host.clone(), container(), Duration::ZERO).expect("open");
        (lightbox, host)
    }

    #[test]
    fn opening_mounts_the_base_tree() {
        let (lightbox, host) = open(props());
        assert_eq!(
            outline(lightbox.tree()),
            "root(portal(no-scroll(controller(carousel, toolbar, navigation))))"
        );
        assert_eq!(
            host.calls(),
            vec!["inert:true", "lock-scroll:true", "focus"]
        );
        assert!(lightbox.is_open());
    }

    #[test]
    fn view_reflects_portal_phase() {
        let (mut lightbox, _) = open(props());
        let phase = |lightbox: &Lightbox| {
            lightbox
                .view()
                .find(crate::modules::PORTAL)
                .and_then(|p| p.attribute("phase").map(str::to_string))
        };
        assert_eq!(phase(&lightbox).as_deref(), Some("entering"));
        lightbox.advance(ms(250)).expect("advance");
        assert_eq!(phase(&lightbox).as_deref(), Some("open"));
    }

    #[test]
    fn close_sequence_unmounts_and_calls_close() {
        let closed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&closed);
        let (mut lightbox, host) = open(props().on_close(move || counter.set(counter.get() + 1)));

        lightbox.close().expect("close");
        assert!(lightbox.is_open());
        lightbox.advance(ms(250)).expect("fade");

        assert!(!lightbox.is_open());
        assert_eq!(closed.get(), 1);
        assert_eq!(lightbox.pending_timeouts(), 0);
        assert_eq!(lightbox.bus().subscriber_count(topics::ACTION_NEXT), 0);
        let calls = host.calls();
        assert!(calls.contains(&"inert:false".to_string()));
        assert_eq!(calls.last().map(String::as_str), Some("lock-scroll:false"));
    }

    #[test]
    fn buttons_navigate() {
        let (mut lightbox, _) = open(props());
        lightbox.press("next").expect("next");
        assert_eq!(lightbox.current_index(), 2);
        lightbox.press("prev").expect("prev");
        lightbox.press("prev").expect("prev");
        assert_eq!(lightbox.current_index(), 0);
    }

    #[test]
    fn only_the_current_slide_reports_status() {
        let (mut lightbox, _) = open(props());
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        let _watch = lightbox.bus().subscribe(topics::ACTIVE_SLIDE_LOADING, move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });
        lightbox.report_slide_status(0, SlideStatus::Loading).expect("status");
        assert_eq!(seen.get(), 0);
        lightbox.report_slide_status(1, SlideStatus::Loading).expect("status");
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn update_slides_jumps_to_index() {
        let (mut lightbox, _) = open(props());
        lightbox
            .update_slides(vec![Slide::image("x"), Slide::image("y")], 1)
            .expect("update");
        assert_eq!(lightbox.state().slide_count(), 2);
        assert_eq!(lightbox.current_index(), 1);
    }

    #[test]
    fn unknown_swipe_payload_is_an_error() {
        let (mut lightbox, _) = open(props());
        let result = lightbox.bus().publish_with(topics::ACTION_SWIPE, 7_u8);
        assert!(matches!(result, Err(Error::UnknownAction(_))));
        assert_eq!(lightbox.current_index(), 1);
        lightbox.next().expect("still usable");
        assert_eq!(lightbox.current_index(), 2);
    }

    #[test]
    fn dropping_unmounts() {
        let (lightbox, host) = open(props());
        drop(lightbox);
        let calls = host.calls();
        assert!(calls.contains(&"lock-scroll:false".to_string()));
        assert!(calls.contains(&"inert:false".to_string()));
    }

    #[test]
    fn inline_plugin_skips_overlay_concerns() {
        let (lightbox, host) = open(props().with_plugin(plugins::inline::plugin()));
        assert_eq!(
            outline(lightbox.tree()),
            "root(inline(controller(carousel, toolbar, navigation)))"
        );
        assert!(host.calls().is_empty());
    }
}
