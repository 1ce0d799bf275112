// SPDX-License-Identifier: MPL-2.0
//! Navigation state: the slide list, the wrap-around index and pending
//! swipe-animation metadata.
//!
//! The state is owned by the controller's [`Store`]. Everything else reads
//! it through a [`StateView`] and changes it by publishing an [`Action`] on
//! the [`ACTION_SWIPE`](crate::events::topics::ACTION_SWIPE) topic.

use crate::animation::Easing;
use crate::domain::Slide;
use crate::error::{Error, Result};
use crate::events::Event;
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Reduces a global index to a slide index: `((index % n) + n) % n`.
///
/// Returns 0 when there are no slides.
#[must_use]
pub fn slide_index(index: i64, slide_count: usize) -> usize {
    if slide_count == 0 {
        return 0;
    }
    let count = i64::try_from(slide_count).unwrap_or(i64::MAX);
    // rem_euclid is the non-negative remainder, i.e. ((i % n) + n) % n.
    usize::try_from(index.rem_euclid(count)).unwrap_or(0)
}

/// Metadata of the transition that produced the current index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeAnimation {
    pub increment: i64,
    pub duration: Option<Duration>,
    pub easing: Option<Easing>,
}

/// The two ways navigation state may change.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Move by `increment` slides, animating with the given timing.
    Swipe {
        increment: i64,
        duration: Option<Duration>,
        easing: Option<Easing>,
    },
    /// Replace the slide list and/or jump to `index`.
    Update { slides: Rc<[Slide]>, index: usize },
}

impl Action {
    /// A swipe without timing information.
    #[must_use]
    pub fn swipe(increment: i64) -> Self {
        Action::Swipe {
            increment,
            duration: None,
            easing: None,
        }
    }

    /// Extracts the action carried by a bus event.
    ///
    /// Anything other than an [`Action`] payload is a contract violation.
    pub fn from_event(event: &Event<'_>) -> Result<Action> {
        event.downcast_ref::<Action>().cloned().ok_or_else(|| {
            Error::UnknownAction(format!("unrecognized payload on topic `{}`", event.topic()))
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    slides: Rc<[Slide]>,
    current_index: usize,
    global_index: i64,
    animation: Option<SwipeAnimation>,
}

impl NavigationState {
    #[must_use]
    pub fn new(slides: Rc<[Slide]>, index: usize) -> Self {
        let current_index = slide_index(i64::try_from(index).unwrap_or(0), slides.len());
        Self {
            slides,
            current_index,
            global_index: i64::try_from(current_index).unwrap_or(0),
            animation: None,
        }
    }

    #[must_use]
    pub fn slides(&self) -> &Rc<[Slide]> {
        &self.slides
    }

    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn global_index(&self) -> i64 {
        self.global_index
    }

    #[must_use]
    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current_index)
    }

    #[must_use]
    pub fn animation(&self) -> Option<&SwipeAnimation> {
        self.animation.as_ref()
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.slides.len()
    }

    /// Applies `action` and returns whether anything changed.
    pub fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::Swipe {
                increment,
                duration,
                easing,
            } => {
                let global_index = self.global_index + increment;
                let animation = (*increment != 0 || duration.is_some()).then_some(SwipeAnimation {
                    increment: *increment,
                    duration: *duration,
                    easing: *easing,
                });
                let next = Self {
                    slides: Rc::clone(&self.slides),
                    current_index: slide_index(global_index, self.slides.len()),
                    global_index,
                    animation,
                };
                let changed = next != *self;
                *self = next;
                changed
            }
            Action::Update { slides, index } => {
                if Rc::ptr_eq(slides, &self.slides) && *index == self.current_index {
                    return false;
                }
                *self = Self::new(Rc::clone(slides), *index);
                true
            }
        }
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(Rc::from(Vec::new()), 0)
    }
}

/// Exclusive owner of the navigation state.
#[derive(Debug)]
pub struct Store {
    state: Rc<RefCell<NavigationState>>,
}

impl Store {
    #[must_use]
    pub fn new(state: NavigationState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn dispatch(&self, action: &Action) -> bool {
        let changed = self.state.borrow_mut().apply(action);
        if changed {
            let state = self.state.borrow();
            tracing::trace!(
                current = state.current_index,
                global = state.global_index,
                "navigation state changed"
            );
        }
        changed
    }

    #[must_use]
    pub fn get(&self) -> Ref<'_, NavigationState> {
        self.state.borrow()
    }

    #[must_use]
    pub fn view(&self) -> StateView {
        StateView {
            state: Rc::clone(&self.state),
        }
    }
}

/// Read-only handle to the navigation state.
#[derive(Debug, Clone)]
pub struct StateView {
    state: Rc<RefCell<NavigationState>>,
}

impl StateView {
    #[must_use]
    pub fn get(&self) -> Ref<'_, NavigationState> {
        self.state.borrow()
    }

    #[must_use]
    pub fn snapshot(&self) -> NavigationState {
        self.state.borrow().clone()
    }
}
