// SPDX-License-Identifier: MPL-2.0
//! Composition engine.
//!
//! The lightbox is a tree of named [`Module`]s. Plugins rewrite that tree
//! by module name and register augmentations over [`LightboxProps`]; the
//! result is rendered into a headless [`View`] and mounted to wire
//! behavior (subscriptions, timers, host calls) into the instance.

mod plugin;
mod tree;
mod view;

pub use plugin::{with_plugins, Augmentation, Composition, Plugin, PluginApi};
pub use tree::{
    add_child, add_parent, add_sibling, append, contains, create_node, mount_tree, outline,
    remove, render_node, render_tree, replace, traverse, Fragment, Module, Node,
};
pub use view::{View, FRAGMENT};

use crate::controller::{ControllerLayout, LayoutView};
use crate::events::{EventBus, Subscription};
use crate::host::HostEnvironment;
use crate::props::LightboxProps;
use crate::state::{NavigationState, StateView};
use crate::timeouts::Timeouts;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Behavior behind a module.
pub trait Component {
    /// Turns already-rendered children into this module's view.
    fn render(&self, cx: &RenderContext<'_>, children: Vec<View>) -> View;

    /// Called once when the lightbox opens. The returned guard lives until
    /// the lightbox unmounts.
    fn mount(&self, _cx: &MountContext) -> Option<Mounted> {
        None
    }
}

/// Read-only inputs of a render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub props: &'a LightboxProps,
    pub state: &'a NavigationState,
    pub layout: &'a ControllerLayout,
}

/// Per-instance services handed to components when they mount.
#[derive(Clone)]
pub struct MountContext {
    pub bus: EventBus,
    pub timeouts: Timeouts,
    pub state: StateView,
    pub layout: LayoutView,
    pub props: Rc<LightboxProps>,
    pub host: Rc<dyn HostEnvironment>,
    removal: Rc<Cell<bool>>,
}

impl MountContext {
    pub(crate) fn new(
        bus: EventBus,
        timeouts: Timeouts,
        state: StateView,
        layout: LayoutView,
        props: Rc<LightboxProps>,
        host: Rc<dyn HostEnvironment>,
    ) -> Self {
        Self {
            bus,
            timeouts,
            state,
            layout,
            props,
            host,
            removal: Rc::new(Cell::new(false)),
        }
    }

    /// Asks the instance to unmount once the current entry point returns.
    pub fn request_removal(&self) {
        self.removal.set(true);
    }

    pub(crate) fn removal_requested(&self) -> bool {
        self.removal.get()
    }
}

impl fmt::Debug for MountContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountContext")
            .field("bus", &self.bus)
            .field("timeouts", &self.timeouts)
            .field("removal", &self.removal.get())
            .finish_non_exhaustive()
    }
}

/// Keeps a mounted component's subscriptions alive and runs its unmount
/// hooks when dropped.
#[derive(Default)]
pub struct Mounted {
    subscriptions: Vec<Subscription>,
    teardown: Vec<Box<dyn FnOnce()>>,
}

impl Mounted {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.subscriptions.push(subscription);
        self
    }

    #[must_use]
    pub fn on_unmount(mut self, hook: impl FnOnce() + 'static) -> Self {
        self.teardown.push(Box::new(hook));
        self
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.subscriptions.clear();
        for hook in self.teardown.drain(..) {
            hook();
        }
    }
}

impl fmt::Debug for Mounted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mounted")
            .field("subscriptions", &self.subscriptions.len())
            .field("teardown", &self.teardown.len())
            .finish()
    }
}
