// SPDX-License-Identifier: MPL-2.0
//! "3 / 10" slide counter.

use super::COUNTER;
use crate::compose::{Component, Module, Plugin, PluginApi, RenderContext, View};
use crate::modules::CONTROLLER;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, Default)]
pub struct Counter;

impl Component for Counter {
    fn render(&self, cx: &RenderContext<'_>, children: Vec<View>) -> View {
        let count = cx.state.slide_count();
        if count == 0 {
            return View::fragment(children);
        }
        let text = format!(
            "{}{}{}",
            cx.state.current_index() + 1,
            cx.props.counter.separator,
            count
        );
        View::new(COUNTER).with_text(text).with_children(children)
    }
}

#[must_use]
pub fn plugin() -> Plugin {
    Rc::new(|api: &mut PluginApi<'_>| {
        api.add_child(CONTROLLER, Module::new(COUNTER, Counter), false);
    })
}
