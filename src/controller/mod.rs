// SPDX-License-Identifier: MPL-2.0
//! Carousel controller.
//!
//! Owns the navigation [`Store`], the gesture recognizers and the carousel
//! animators. Input arrives through [`Controller::handle_sensor`]; bus
//! actions and the controller's own timers are queued as [`Message`]s and
//! applied by [`Controller::process_pending`], so a handler publishing from
//! inside another handler never touches controller state re-entrantly.
//!
//! After every entry point the owner calls [`Controller::layout`], which
//! commits prepared animation snapshots against the new state and
//! publishes the [`ControllerLayout`] components render from.

mod swipe;

pub use swipe::{plan_swipe, SwipePlan, SwipeRequest};

use crate::animation::{Animator, Keyframe, Transition};
use crate::domain::compute_slide_rect;
use crate::error::Result;
use crate::events::topics::{self, NavigateParams, ViewChanged};
use crate::events::{EventBus, Subscription};
use crate::gesture::{
    pull_opacity, rtl, GestureContext, GestureEffect, NavDirection, PointerSwipe, PullDirections,
    SensorEvent, SwipeBounds, SwipeState, WheelSwipe, WheelTimer,
};
use crate::host::HostEnvironment;
use crate::props::LightboxProps;
use crate::state::{Action, NavigationState, StateView, Store};
use crate::timeouts::{Delay, Timeouts};
use iced_core::keyboard::{key::Named, Key};
use iced_core::{Rectangle, Vector};
use std::cell::{Cell, Ref, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, trace};

/// Geometry and gesture state published to rendering components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControllerLayout {
    pub container: Rectangle,
    /// Container minus the configured padding.
    pub slide_rect: Rectangle,
    pub is_rtl: bool,
    pub swipe_state: SwipeState,
    /// Carousel transform at the last layout pass.
    pub transform: Keyframe,
}

/// Shared read handle to the latest [`ControllerLayout`].
#[derive(Debug, Clone, Default)]
pub struct LayoutView(Rc<Cell<ControllerLayout>>);

impl LayoutView {
    #[must_use]
    pub fn get(&self) -> ControllerLayout {
        self.0.get()
    }

    fn set(&self, layout: ControllerLayout) {
        self.0.set(layout);
    }
}

/// Work queued for the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Navigate { direction: NavDirection, count: usize },
    Dispatch(Action),
    SwipeSettled,
    PullSettled,
    AnimationSettled,
    Wheel(WheelTimer),
}

#[derive(Debug, Clone, Default)]
struct Inbox(Rc<RefCell<VecDeque<Message>>>);

impl Inbox {
    fn push(&self, message: Message) {
        self.0.borrow_mut().push_back(message);
    }

    fn pop(&self) -> Option<Message> {
        self.0.borrow_mut().pop_front()
    }

    fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// A timer callback that queues `message`.
    fn poster(&self, message: Message) -> impl FnOnce() + 'static {
        let inbox = self.clone();
        move || inbox.push(message)
    }
}

#[derive(Debug, Clone, Copy)]
struct CarouselSnapshot {
    rect: Rectangle,
    global_index: i64,
}

#[derive(Debug, Clone, Copy)]
struct PullSnapshot {
    rect: Rectangle,
    opacity: f32,
    duration: Duration,
}

pub struct Controller {
    props: Rc<LightboxProps>,
    bus: EventBus,
    timeouts: Timeouts,
    host: Rc<dyn HostEnvironment>,
    store: Store,
    inbox: Inbox,
    layout: LayoutView,
    _subscriptions: Vec<Subscription>,
    container: Rectangle,
    is_rtl: bool,
    swipe_state: SwipeState,
    swipe_offset: f32,
    pull_offset: f32,
    pointer: PointerSwipe,
    wheel: WheelSwipe,
    carousel_animation: Animator<CarouselSnapshot>,
    pull_animation: Animator<PullSnapshot>,
    swipe_settle: Delay,
    pull_settle: Delay,
    animation_clear: Delay,
    viewed: Option<i64>,
}

impl Controller {
    pub fn new(
        props: Rc<LightboxProps>,
        bus: EventBus,
        timeouts: Timeouts,
        host: Rc<dyn HostEnvironment>,
        container: Rectangle,
    ) -> Self {
        let store = Store::new(NavigationState::new(Rc::clone(&props.slides), props.index));
        let inbox = Inbox::default();

        let navigate = |direction| {
            let inbox = inbox.clone();
            move |event: &crate::events::Event<'_>| {
                let count = event
                    .downcast_ref::<NavigateParams>()
                    .map_or(1, |params| params.count.max(1));
                inbox.push(Message::Navigate { direction, count });
                Ok(())
            }
        };
        let actions = inbox.clone();
        let subscriptions = vec![
            bus.subscribe(topics::ACTION_PREV, navigate(NavDirection::Prev)),
            bus.subscribe(topics::ACTION_NEXT, navigate(NavDirection::Next)),
            bus.subscribe(topics::ACTION_SWIPE, move |event| {
                actions.push(Message::Dispatch(Action::from_event(event)?));
                Ok(())
            }),
        ];

        let wheel_inbox = inbox.clone();
        let wheel = WheelSwipe::new(&timeouts, move |timer| {
            wheel_inbox.push(Message::Wheel(timer));
        });

        let reduce_motion = host.prefers_reduced_motion();
        let mut carousel_animation = Animator::new();
        carousel_animation.set_reduce_motion(reduce_motion);
        let mut pull_animation = Animator::new();
        pull_animation.set_reduce_motion(reduce_motion);

        let controller = Self {
            swipe_settle: Delay::new(timeouts.clone()),
            pull_settle: Delay::new(timeouts.clone()),
            animation_clear: Delay::new(timeouts.clone()),
            props,
            bus,
            timeouts,
            host,
            store,
            inbox,
            layout: LayoutView::default(),
            _subscriptions: subscriptions,
            container,
            is_rtl: false,
            swipe_state: SwipeState::None,
            swipe_offset: 0.0,
            pull_offset: 0.0,
            pointer: PointerSwipe::new(),
            wheel,
            carousel_animation,
            pull_animation,
            viewed: None,
        };
        controller.publish_layout(controller.timeouts.now());
        controller
    }

    // Imperative operations. Each publishes on the bus; the effect lands on
    // the next `process_pending`.

    pub fn prev(&self, count: usize) -> Result<()> {
        self.bus.publish_with(topics::ACTION_PREV, NavigateParams { count })
    }

    pub fn next(&self, count: usize) -> Result<()> {
        self.bus.publish_with(topics::ACTION_NEXT, NavigateParams { count })
    }

    pub fn close(&self) -> Result<()> {
        self.bus.publish(topics::ACTION_CLOSE)
    }

    pub fn focus(&self) {
        self.host.focus_container();
    }

    /// Feeds one host input event through the recognizers.
    pub fn handle_sensor(&mut self, event: &SensorEvent) -> Result<()> {
        self.bus.publish_with(event.topic(), event.clone())?;

        if let SensorEvent::KeyUp(key) = event {
            if key.key == Key::Named(Named::Escape) {
                self.close()?;
            }
        }

        if !self.props.controller.disable_swipe_navigation {
            let cx = self.gesture_context();
            let effect = match event {
                SensorEvent::Wheel(wheel) => self.wheel.handle(wheel, &cx),
                other => self.pointer.handle(other, &cx),
            };
            self.apply_gesture(effect)?;
        }
        self.process_pending()
    }

    /// Applies queued messages until the inbox is empty, then reports a
    /// changed view.
    /// Whether messages are queued for [`Self::process_pending`].
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.inbox.is_empty()
    }

    pub fn process_pending(&mut self) -> Result<()> {
        while let Some(message) = self.inbox.pop() {
            self.update(message)?;
        }
        self.sync_view()
    }

    fn update(&mut self, message: Message) -> Result<()> {
        match message {
            Message::Navigate { direction, count } => {
                self.swipe(SwipeRequest::navigate(direction, count))
            }
            Message::Dispatch(action) => {
                if self.store.dispatch(&action) {
                    self.schedule_animation_clear();
                }
                Ok(())
            }
            Message::SwipeSettled => {
                self.swipe_offset = 0.0;
                self.set_swipe_state(SwipeState::None);
                Ok(())
            }
            Message::PullSettled => {
                self.pull_offset = 0.0;
                self.set_swipe_state(SwipeState::None);
                Ok(())
            }
            Message::AnimationSettled => {
                self.store.dispatch(&Action::swipe(0));
                Ok(())
            }
            Message::Wheel(timer) => {
                let cx = self.gesture_context();
                let effect = self.wheel.on_timer(timer, &cx);
                self.apply_gesture(effect)
            }
        }
    }

    fn schedule_animation_clear(&self) {
        let animation = self.store.get().animation().copied();
        if let Some(animation) = animation {
            if let (true, Some(duration)) = (animation.increment != 0, animation.duration) {
                self.animation_clear
                    .schedule(duration, self.inbox.poster(Message::AnimationSettled));
            }
        }
    }

    fn apply_gesture(&mut self, effect: GestureEffect) -> Result<()> {
        match effect {
            GestureEffect::None => Ok(()),
            GestureEffect::SwipeStart => {
                self.swipe_settle.cancel();
                self.pull_settle.cancel();
                self.swipe_offset = 0.0;
                self.set_swipe_state(SwipeState::Swipe);
                Ok(())
            }
            GestureEffect::SwipeProgress(offset) => {
                self.swipe_offset = offset;
                Ok(())
            }
            GestureEffect::SwipeFinish { offset, elapsed } => {
                self.swipe_offset = offset;
                self.swipe(SwipeRequest::commit(offset, elapsed))
            }
            GestureEffect::SwipeCancel { offset } => {
                self.swipe_offset = offset;
                self.swipe(SwipeRequest::cancel(offset))
            }
            GestureEffect::PullStart => {
                self.swipe_settle.cancel();
                self.pull_settle.cancel();
                self.pull_offset = 0.0;
                self.set_swipe_state(SwipeState::Pull);
                Ok(())
            }
            GestureEffect::PullProgress(offset) => {
                self.pull_offset = offset;
                Ok(())
            }
            GestureEffect::PullFinish { offset } => self.pull(offset, false),
            GestureEffect::PullCancel { offset } => self.pull(offset, true),
        }
    }

    fn swipe(&mut self, request: SwipeRequest) -> Result<()> {
        let now = self.timeouts.now();
        let animation = &self.props.animation;
        let programmatic = request.direction.is_some();
        let swipe_duration = if programmatic {
            animation.navigation_duration()
        } else {
            animation.swipe
        };
        let easing = if programmatic && !self.carousel_animation.is_playing(now) {
            animation.easing.navigation
        } else {
            animation.easing.swipe
        };

        let Some(plan) = plan_swipe(
            &request,
            swipe_duration,
            self.container.width,
            self.is_rtl,
            self.bounds(),
        ) else {
            trace!(direction = ?request.direction, "navigation blocked at boundary");
            return Ok(());
        };

        let snapshot = CarouselSnapshot {
            rect: self.carousel_rect(now),
            global_index: self.store.get().global_index(),
        };
        self.carousel_animation.prepare(snapshot);
        self.swipe_settle
            .schedule(plan.duration, self.inbox.poster(Message::SwipeSettled));
        self.set_swipe_state(plan.state);

        debug!(
            increment = plan.increment,
            duration_ms = plan.duration.as_millis() as u64,
            "swipe"
        );
        self.bus.publish_with(
            topics::ACTION_SWIPE,
            Action::Swipe {
                increment: plan.increment,
                duration: Some(plan.duration),
                easing: Some(easing),
            },
        )
    }

    fn pull(&mut self, offset: f32, cancel: bool) -> Result<()> {
        let pull = self.pull_directions();
        if !pull.any() {
            return Ok(());
        }
        let now = self.timeouts.now();
        self.pull_offset = offset;

        let fade = self.fade_duration();
        let duration = if cancel { fade * 2 } else { fade };
        let snapshot = PullSnapshot {
            rect: self.carousel_rect(now),
            opacity: pull_opacity(offset, pull, &self.props.controller.tuning),
            duration,
        };
        self.pull_animation.prepare(snapshot);
        self.pull_settle
            .schedule(duration, self.inbox.poster(Message::PullSettled));
        self.set_swipe_state(SwipeState::Animation);

        debug!(offset, cancel, "pull");
        if cancel {
            Ok(())
        } else {
            self.close()
        }
    }

    fn set_swipe_state(&mut self, state: SwipeState) {
        if self.swipe_state != state {
            trace!(from = ?self.swipe_state, to = ?state, "swipe state");
        }
        self.swipe_state = state;
        self.wheel.on_state_change(state);
    }

    fn sync_view(&mut self) -> Result<()> {
        let changed = {
            let state = self.store.get();
            ViewChanged {
                index: state.current_index(),
                global_index: state.global_index(),
            }
        };
        if self.viewed == Some(changed.global_index) {
            return Ok(());
        }
        self.viewed = Some(changed.global_index);
        if let Some(on_view) = &self.props.on.view {
            on_view(changed);
        }
        self.bus.publish_with(topics::VIEW, changed)
    }

    /// Commits prepared animation snapshots against the current state and
    /// publishes the resulting layout.
    pub fn layout(&mut self) {
        let now = self.timeouts.now();
        let rect = self.carousel_rect(now);
        let (global_index, animation) = {
            let state = self.store.get();
            (state.global_index(), state.animation().copied())
        };
        let width = self.container.width;
        let spacing = self.props.carousel.spacing.resolve(width);
        let is_rtl = self.is_rtl;
        let swipe_easing = self.props.animation.easing.swipe;

        self.carousel_animation
            .commit(now, rect, |snapshot, rect, translate| {
                let animation = animation?;
                let duration = animation.duration?;
                let distance = (global_index - snapshot.global_index) as f32 * (width + spacing);
                let x = rtl(distance, is_rtl) + snapshot.rect.x - rect.x + translate.x;
                Some(Transition::new(
                    Keyframe::translate(Vector::new(x, 0.0)),
                    Keyframe::IDENTITY,
                    duration,
                    animation.easing.unwrap_or(swipe_easing),
                ))
            });

        let fade_easing = self.props.animation.easing.fade;
        self.pull_animation
            .commit(now, rect, |snapshot, rect, translate| {
                let y = snapshot.rect.y - rect.y + translate.y;
                Some(Transition::new(
                    Keyframe::translate(Vector::new(0.0, y)).with_opacity(snapshot.opacity),
                    Keyframe::IDENTITY,
                    snapshot.duration,
                    fade_easing,
                ))
            });

        self.publish_layout(now);
    }

    /// Drops finished transitions. Returns whether anything is still playing.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.carousel_animation.tick(now);
        self.pull_animation.tick(now);
        self.publish_layout(now);
        self.is_animating(now)
    }

    #[must_use]
    pub fn is_animating(&self, now: Duration) -> bool {
        self.carousel_animation.is_playing(now) || self.pull_animation.is_playing(now)
    }

    /// Carousel transform at `now`: live gesture offset plus playing
    /// transitions.
    #[must_use]
    pub fn transform(&self, now: Duration) -> Keyframe {
        let carousel = self.carousel_animation.sample(now);
        let pull = self.pull_animation.sample(now);
        let live = match self.swipe_state {
            SwipeState::Swipe => Keyframe::translate(Vector::new(self.swipe_offset.round(), 0.0)),
            SwipeState::Pull => Keyframe::translate(Vector::new(0.0, self.pull_offset.round()))
                .with_opacity(pull_opacity(
                    self.pull_offset,
                    self.pull_directions(),
                    &self.props.controller.tuning,
                )),
            SwipeState::None | SwipeState::Animation => Keyframe::IDENTITY,
        };
        live.then(carousel).then(pull)
    }

    fn carousel_rect(&self, now: Duration) -> Rectangle {
        let translate = self.transform(now).translate;
        Rectangle {
            x: self.container.x + translate.x,
            y: self.container.y + translate.y,
            ..self.container
        }
    }

    fn publish_layout(&self, now: Duration) {
        self.layout.set(ControllerLayout {
            container: self.container,
            slide_rect: self.slide_rect(),
            is_rtl: self.is_rtl,
            swipe_state: self.swipe_state,
            transform: self.transform(now),
        });
    }

    fn gesture_context(&self) -> GestureContext {
        GestureContext {
            now: self.timeouts.now(),
            container_width: self.container.width,
            swipe_duration: self.props.animation.swipe,
            swipe_state: self.swipe_state,
            bounds: self.bounds(),
            pull: self.pull_directions(),
            tuning: self.props.controller.tuning,
        }
    }

    fn bounds(&self) -> SwipeBounds {
        let state = self.store.get();
        SwipeBounds {
            finite: self.props.carousel.finite,
            is_rtl: self.is_rtl,
            slide_count: state.slide_count(),
            current_index: state.current_index(),
        }
    }

    fn pull_directions(&self) -> PullDirections {
        PullDirections {
            up: self.props.controller.close_on_pull_up,
            down: self.props.controller.close_on_pull_down,
        }
    }

    fn fade_duration(&self) -> Duration {
        if self.host.prefers_reduced_motion() {
            Duration::ZERO
        } else {
            self.props.animation.fade
        }
    }

    /// Host reports a new container geometry.
    pub fn resize(&mut self, container: Rectangle) {
        self.container = container;
        self.publish_layout(self.timeouts.now());
    }

    pub fn set_rtl(&mut self, is_rtl: bool) {
        self.is_rtl = is_rtl;
        self.publish_layout(self.timeouts.now());
    }

    /// Swaps in re-augmented props. Navigation state is untouched.
    pub fn set_props(&mut self, props: Rc<LightboxProps>) {
        self.props = props;
    }

    #[must_use]
    pub fn state(&self) -> Ref<'_, NavigationState> {
        self.store.get()
    }

    #[must_use]
    pub fn state_view(&self) -> StateView {
        self.store.view()
    }

    #[must_use]
    pub fn layout_view(&self) -> LayoutView {
        self.layout.clone()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.store.get().current_index()
    }

    #[must_use]
    pub fn global_index(&self) -> i64 {
        self.store.get().global_index()
    }

    #[must_use]
    pub fn container_rect(&self) -> Rectangle {
        self.container
    }

    #[must_use]
    pub fn slide_rect(&self) -> Rectangle {
        compute_slide_rect(self.container, self.props.carousel.padding)
    }

    #[must_use]
    pub fn swipe_state(&self) -> SwipeState {
        self.swipe_state
    }

    #[must_use]
    pub fn swipe_offset(&self) -> f32 {
        self.swipe_offset
    }

    #[must_use]
    pub fn pull_offset(&self) -> f32 {
        self.pull_offset
    }

    /// Subscribes to raw input republished under the `sensor.*` topics.
    pub fn subscribe_sensors<F>(&self, topic: &'static str, mut handler: F) -> Subscription
    where
        F: FnMut(&SensorEvent) + 'static,
    {
        self.bus.subscribe(topic, move |event| {
            if let Some(sensor) = event.downcast_ref::<SensorEvent>() {
                handler(sensor);
            }
            Ok(())
        })
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("container", &self.container)
            .field("swipe_state", &self.swipe_state)
            .field("swipe_offset", &self.swipe_offset)
            .field("pull_offset", &self.pull_offset)
            .field("state", &*self.store.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Slide;
    use crate::gesture::{KeyEvent, PointerEvent, WheelEvent, PRIMARY_BUTTON};
    use crate::host::NoopHost;
    use crate::test_utils::assert_abs_diff_eq;
    use iced_core::keyboard::Modifiers;
    use iced_core::Point;

    struct Harness {
        timeouts: Timeouts,
        controller: Controller,
        closes: Rc<Cell<usize>>,
        _close: Subscription,
    }

    impl Harness {
        fn new(props: LightboxProps) -> Self {
            let bus = EventBus::new();
            let timeouts = Timeouts::new(Duration::ZERO);
            let closes = Rc::new(Cell::new(0));
            let counter = Rc::clone(&closes);
            let close = bus.subscribe(topics::ACTION_CLOSE, move |_| {
                counter.set(counter.get() + 1);
                Ok(())
            });
            let mut controller = Controller::new(
                Rc::new(props),
                bus,
                timeouts.clone(),
                Rc::new(NoopHost),
                Rectangle::new(Point::ORIGIN, iced_core::Size::new(300.0, 200.0)),
            );
            controller.process_pending().expect("open");
            controller.layout();
            Self {
                timeouts,
                controller,
                closes,
                _close: close,
            }
        }

        fn at(&mut self, ms: u64) {
            let now = Duration::from_millis(ms);
            while self.timeouts.fire_next(now) {
                self.controller.process_pending().expect("timer");
            }
            self.timeouts.advance_to(now);
            self.controller.layout();
        }

        fn send(&mut self, ms: u64, event: SensorEvent) {
            self.at(ms);
            self.controller.handle_sensor(&event).expect("sensor");
            self.controller.layout();
        }

        fn drag(&mut self, start_ms: u64, end_ms: u64, dx: f32, dy: f32) {
            let point = |x, y| PointerEvent::new(1, Point::new(x, y), PRIMARY_BUTTON);
            self.send(start_ms, SensorEvent::PointerDown(point(100.0, 100.0)));
            self.send(start_ms, SensorEvent::PointerMove(point(100.0 + dx, 100.0 + dy)));
            // Second move measures from the activation point.
            self.send(end_ms, SensorEvent::PointerMove(point(100.0 + 2.0 * dx, 100.0 + 2.0 * dy)));
            self.send(end_ms, SensorEvent::PointerUp(point(100.0 + 2.0 * dx, 100.0 + 2.0 * dy)));
        }

        fn index(&self) -> (usize, i64) {
            (self.controller.current_index(), self.controller.global_index())
        }
    }

    fn slides() -> Vec<Slide> {
        vec![Slide::image("a.jpg"), Slide::image("b.jpg"), Slide::image("c.jpg")]
    }

    fn props(finite: bool, index: usize) -> LightboxProps {
        let mut props = LightboxProps::default().with_slides(slides()).with_index(index);
        props.carousel.finite = finite;
        props
    }

    #[test]
    fn programmatic_next_advances_and_animates() {
        let mut h = Harness::new(props(false, 1));
        h.controller.next(1).expect("next");
        h.controller.process_pending().expect("pump");
        h.controller.layout();

        assert_eq!(h.index(), (2, 2));
        assert_eq!(h.controller.swipe_state(), SwipeState::Animation);
        assert!(h.controller.is_animating(Duration::from_millis(10)));

        h.at(600);
        assert_eq!(h.controller.swipe_state(), SwipeState::None);
        assert!(h.controller.state().animation().is_none());
    }

    #[test]
    fn finite_boundary_rejects_previous() {
        let mut h = Harness::new(props(true, 0));
        h.controller.prev(1).expect("prev");
        h.controller.process_pending().expect("pump");
        assert_eq!(h.index(), (0, 0));
        assert_eq!(h.controller.swipe_state(), SwipeState::None);

        // A drag towards the previous slide is never recognized.
        h.drag(0, 100, 50.0, 0.0);
        assert_eq!(h.index(), (0, 0));
        assert_eq!(h.controller.swipe_state(), SwipeState::None);
    }

    #[test]
    fn finite_boundary_rejects_next_at_last() {
        let mut h = Harness::new(props(true, 2));
        h.controller.next(1).expect("next");
        h.controller.process_pending().expect("pump");
        h.drag(0, 100, -50.0, 0.0);
        assert_eq!(h.index(), (2, 2));
    }

    #[test]
    fn long_drag_commits_in_offset_direction() {
        let mut h = Harness::new(props(false, 1));
        // Recognized at 50px, released 50px further on within the swipe duration.
        h.drag(0, 400, 50.0, 0.0);
        assert_eq!(h.index(), (0, 0));
        assert_eq!(h.controller.swipe_state(), SwipeState::Animation);
    }

    #[test]
    fn short_slow_drag_cancels_and_settles() {
        let mut h = Harness::new(props(false, 1));
        let point = |x| PointerEvent::new(1, Point::new(x, 100.0), PRIMARY_BUTTON);
        h.send(0, SensorEvent::PointerDown(point(100.0)));
        h.send(0, SensorEvent::PointerMove(point(140.0)));
        h.send(400, SensorEvent::PointerMove(point(160.0)));
        assert_eq!(h.controller.swipe_state(), SwipeState::Swipe);
        assert_abs_diff_eq!(h.controller.swipe_offset(), 20.0);

        h.send(600, SensorEvent::PointerUp(point(160.0)));
        assert_eq!(h.index(), (1, 1));
        assert_eq!(h.controller.swipe_state(), SwipeState::Animation);

        // The bounce starts at the released offset and ends at rest.
        let start = h.controller.transform(Duration::from_millis(600)).translate.x;
        assert_abs_diff_eq!(start, 20.0, epsilon = 0.5);
        h.at(900);
        assert_eq!(h.controller.swipe_state(), SwipeState::None);
        assert_abs_diff_eq!(h.controller.transform(Duration::from_millis(900)).translate.x, 0.0);
    }

    #[test]
    fn cancelled_gesture_leaves_no_timers_behind() {
        let mut h = Harness::new(props(false, 1));
        let point = |x| PointerEvent::new(1, Point::new(x, 100.0), PRIMARY_BUTTON);
        h.send(0, SensorEvent::PointerDown(point(100.0)));
        h.send(0, SensorEvent::PointerMove(point(140.0)));
        h.send(10, SensorEvent::PointerMove(point(150.0)));
        h.send(20, SensorEvent::PointerCancel(point(150.0)));

        h.at(10_000);
        assert_eq!(h.index(), (1, 1));
        assert_eq!(h.controller.swipe_state(), SwipeState::None);
        assert_abs_diff_eq!(h.controller.swipe_offset(), 0.0);
        assert_eq!(h.timeouts.pending_count(), 0);
    }

    #[test]
    fn new_drag_supersedes_pending_settle() {
        let mut h = Harness::new(props(false, 1));
        h.controller.next(1).expect("next");
        h.controller.process_pending().expect("pump");

        let point = |x| PointerEvent::new(1, Point::new(x, 100.0), PRIMARY_BUTTON);
        h.send(50, SensorEvent::PointerDown(point(100.0)));
        h.send(60, SensorEvent::PointerMove(point(60.0)));
        assert_eq!(h.controller.swipe_state(), SwipeState::Swipe);

        // The programmatic settle would have fired here.
        h.at(700);
        assert_eq!(h.controller.swipe_state(), SwipeState::Swipe);
    }

    #[test]
    fn escape_key_up_publishes_close() {
        let mut h = Harness::new(props(false, 0));
        h.send(
            0,
            SensorEvent::KeyUp(KeyEvent {
                key: Key::Named(Named::Escape),
                modifiers: Modifiers::default(),
            }),
        );
        assert_eq!(h.closes.get(), 1);
    }

    #[test]
    fn pull_down_past_threshold_closes() {
        let mut props = props(false, 0);
        props.controller.close_on_pull_down = true;
        let mut h = Harness::new(props);
        h.drag(0, 100, 0.0, 70.0);
        assert_eq!(h.closes.get(), 1);
        assert_eq!(h.controller.swipe_state(), SwipeState::Animation);
        h.at(1_000);
        assert_eq!(h.controller.swipe_state(), SwipeState::None);
        assert_abs_diff_eq!(h.controller.pull_offset(), 0.0);
    }

    #[test]
    fn pull_is_ignored_when_disabled() {
        let mut h = Harness::new(props(false, 0));
        h.drag(0, 100, 0.0, 40.0);
        assert_eq!(h.closes.get(), 0);
        assert_eq!(h.controller.swipe_state(), SwipeState::None);
    }

    #[test]
    fn disabled_swipe_navigation_ignores_drags() {
        let mut props = props(false, 1);
        props.controller.disable_swipe_navigation = true;
        let mut h = Harness::new(props);
        h.drag(0, 400, 50.0, 0.0);
        assert_eq!(h.index(), (1, 1));
    }

    #[test]
    fn wheel_fling_advances_once() {
        let mut h = Harness::new(props(false, 0));
        let wheel = |dx| {
            SensorEvent::Wheel(WheelEvent {
                delta: Vector::new(dx, 0.0),
                modifiers: Modifiers::default(),
            })
        };
        h.send(0, wheel(40.0));
        assert_eq!(h.controller.swipe_state(), SwipeState::Swipe);
        h.send(10, wheel(70.0));
        assert_eq!(h.index(), (1, 1));
        // Momentum tail.
        h.send(20, wheel(60.0));
        h.send(30, wheel(50.0));
        h.at(2_000);
        assert_eq!(h.index(), (1, 1));
    }

    #[test]
    fn view_changes_are_reported_once_each() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut props = props(false, 1);
        props.on.view = Some(Rc::new(move |view: ViewChanged| sink.borrow_mut().push(view.index)));

        let mut h = Harness::new(props);
        h.controller.next(1).expect("next");
        h.controller.process_pending().expect("pump");
        h.at(1_000);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn layout_reports_padded_slide_rect() {
        let h = Harness::new(props(false, 0));
        let layout = h.controller.layout_view().get();
        assert_abs_diff_eq!(layout.slide_rect.width, 268.0);
        assert_abs_diff_eq!(layout.slide_rect.x, 16.0);
    }

    #[test]
    fn unknown_swipe_payload_is_an_error() {
        let h = Harness::new(props(false, 0));
        let result = h.bus().publish_with(topics::ACTION_SWIPE, 42_u8);
        assert!(result.is_err());
    }

    impl Harness {
        fn bus(&self) -> &EventBus {
            &self.controller.bus
        }
    }
}
