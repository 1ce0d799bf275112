// SPDX-License-Identifier: MPL-2.0
//! Host environment collaborator.
//!
//! Focus, inert marking, scroll locking and motion preferences belong to the
//! platform. The lightbox negotiates them through this trait; every method
//! defaults to a no-op so a host only implements what it supports.

pub trait HostEnvironment {
    /// Move keyboard focus to the lightbox container.
    fn focus_container(&self) {}

    /// Give focus back to whatever held it before the lightbox opened.
    fn restore_focus(&self) {}

    /// Mark the content behind the lightbox as inert (or restore it).
    fn set_siblings_inert(&self, _inert: bool) {}

    /// Lock (or unlock) scrolling of the content behind the lightbox.
    fn lock_scroll(&self, _locked: bool) {}

    fn prefers_reduced_motion(&self) -> bool {
        false
    }
}

/// Host that supports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl HostEnvironment for NoopHost {}

#[cfg(test)]
pub(crate) mod testing {
    use super::HostEnvironment;
    use std::cell::{Cell, RefCell};

    /// Records every host call.
    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub calls: RefCell<Vec<String>>,
        pub reduced_motion: Cell<bool>,
    }

    impl RecordingHost {
        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl HostEnvironment for RecordingHost {
        fn focus_container(&self) {
            self.calls.borrow_mut().push("focus".into());
        }

        fn restore_focus(&self) {
            self.calls.borrow_mut().push("restore-focus".into());
        }

        fn set_siblings_inert(&self, inert: bool) {
            self.calls.borrow_mut().push(format!("inert:{inert}"));
        }

        fn lock_scroll(&self, locked: bool) {
            self.calls.borrow_mut().push(format!("lock-scroll:{locked}"));
        }

        fn prefers_reduced_motion(&self) -> bool {
            self.reduced_motion.get()
        }
    }
}
