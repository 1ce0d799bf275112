// SPDX-License-Identifier: MPL-2.0
//! Built-in modules and the base tree plugins edit.

pub mod carousel;
pub mod controller;
pub mod navigation;
pub mod no_scroll;
pub mod portal;
pub mod toolbar;

use crate::compose::{create_node, Component, Module, Node, RenderContext, View};

pub const ROOT: &str = "root";
pub const PORTAL: &str = "portal";
pub const NO_SCROLL: &str = "no-scroll";
pub const CONTROLLER: &str = "controller";
pub const CAROUSEL: &str = "carousel";
pub const TOOLBAR: &str = "toolbar";
pub const NAVIGATION: &str = "navigation";

/// Topmost node the instance wraps the composed forest in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Root;

impl Component for Root {
    fn render(&self, _cx: &RenderContext<'_>, children: Vec<View>) -> View {
        View::new(ROOT).with_children(children)
    }
}

#[must_use]
pub fn root() -> Module {
    Module::new(ROOT, Root)
}

/// `portal → no-scroll → controller → [carousel, toolbar, navigation]`
#[must_use]
pub fn base_tree() -> Vec<Node> {
    vec![create_node(
        portal::module(),
        vec![create_node(
            no_scroll::module(),
            vec![create_node(
                controller::module(),
                vec![
                    Node::leaf(carousel::module()),
                    Node::leaf(toolbar::module()),
                    Node::leaf(navigation::module()),
                ],
            )],
        )],
    )]
}
