// SPDX-License-Identifier: MPL-2.0
//! Plugin installation.

use super::tree::{self, Module, Node};
use crate::modules::CONTROLLER;
use crate::props::LightboxProps;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// Setup-time extension; invoked exactly once with the capability object.
pub type Plugin = Rc<dyn Fn(&mut PluginApi<'_>)>;

/// Pure transformation of the public configuration.
pub type Augmentation = Box<dyn Fn(LightboxProps) -> LightboxProps>;

/// Final module forest plus the combined augmentation chain.
pub struct Composition {
    tree: Vec<Node>,
    augmentations: Vec<Augmentation>,
}

impl Composition {
    #[must_use]
    pub fn new(tree: Vec<Node>) -> Self {
        Self {
            tree,
            augmentations: Vec::new(),
        }
    }

    #[must_use]
    pub fn tree(&self) -> &[Node] {
        &self.tree
    }

    #[must_use]
    pub fn into_tree(self) -> Vec<Node> {
        self.tree
    }

    /// Runs every augmentation in registration order.
    #[must_use]
    pub fn augment(&self, props: LightboxProps) -> LightboxProps {
        self.augmentations
            .iter()
            .fold(props, |props, augmentation| augmentation(props))
    }

    #[must_use]
    pub fn augmentation_count(&self) -> usize {
        self.augmentations.len()
    }
}

impl fmt::Debug for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composition")
            .field("tree", &tree::outline(&self.tree))
            .field("augmentations", &self.augmentations.len())
            .finish()
    }
}

/// What a plugin may do. Every edit addresses modules by name.
pub struct PluginApi<'a> {
    composition: &'a mut Composition,
}

impl PluginApi<'_> {
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        tree::contains(&self.composition.tree, name)
    }

    pub fn add_parent(&mut self, target: &str, module: Module) {
        if target.is_empty() || self.found(target) {
            self.composition.tree = tree::add_parent(&self.composition.tree, target, &module);
        }
    }

    pub fn append(&mut self, target: &str, module: Module) {
        if self.found(target) {
            self.composition.tree = tree::append(&self.composition.tree, target, &module);
        }
    }

    pub fn add_child(&mut self, target: &str, module: Module, precede: bool) {
        if self.found(target) {
            self.composition.tree =
                tree::add_child(&self.composition.tree, target, &module, precede);
        }
    }

    pub fn add_sibling(&mut self, target: &str, module: Module, precede: bool) {
        if self.found(target) {
            self.composition.tree =
                tree::add_sibling(&self.composition.tree, target, &module, precede);
        }
    }

    /// Same as `append(CONTROLLER, module)`.
    pub fn add_module(&mut self, module: Module) {
        self.append(CONTROLLER, module);
    }

    pub fn replace(&mut self, target: &str, module: Module) {
        if self.found(target) {
            self.composition.tree = tree::replace(&self.composition.tree, target, &module);
        }
    }

    pub fn remove(&mut self, target: &str) {
        if self.found(target) {
            self.composition.tree = tree::remove(&self.composition.tree, target);
        }
    }

    pub fn augment(&mut self, augmentation: impl Fn(LightboxProps) -> LightboxProps + 'static) {
        self.composition.augmentations.push(Box::new(augmentation));
    }

    fn found(&self, target: &str) -> bool {
        let found = self.contains(target);
        if !found {
            trace!(target, "composition target not found");
        }
        found
    }
}

/// Invokes each plugin once, in order, against `root`.
#[must_use]
pub fn with_plugins(root: Vec<Node>, plugins: &[Plugin]) -> Composition {
    let mut composition = Composition::new(root);
    for plugin in plugins {
        let mut api = PluginApi {
            composition: &mut composition,
        };
        plugin(&mut api);
    }
    debug!(
        plugins = plugins.len(),
        tree = %tree::outline(composition.tree()),
        "plugins installed"
    );
    composition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{create_node, outline, Fragment};
    use crate::modules::{CAROUSEL, ROOT, TOOLBAR};
    use crate::props::ToolbarItem;

    fn module(name: &'static str) -> Module {
        Module::new(name, Fragment)
    }

    fn base() -> Vec<Node> {
        vec![create_node(
            module(ROOT),
            vec![create_node(module(CONTROLLER), vec![Node::leaf(module(CAROUSEL))])],
        )]
    }

    #[test]
    fn add_child_keeps_existing_children() {
        let plugin: Plugin = Rc::new(|api| api.add_child(CONTROLLER, module(TOOLBAR), false));
        let composition = with_plugins(base(), &[plugin]);
        assert_eq!(
            outline(composition.tree()),
            "root(controller(carousel, toolbar))"
        );
    }

    #[test]
    fn plugins_run_in_order_and_see_earlier_edits() {
        let first: Plugin = Rc::new(|api| api.add_module(module("counter")));
        let second: Plugin = Rc::new(|api| {
            assert!(api.contains("counter"));
            api.remove("counter");
        });
        let composition = with_plugins(base(), &[first, second]);
        assert_eq!(outline(composition.tree()), "root(controller(carousel))");
    }

    #[test]
    fn edits_after_remove_are_no_ops() {
        let plugin: Plugin = Rc::new(|api| {
            api.remove(CAROUSEL);
            api.add_child(CAROUSEL, module("captions"), false);
            api.replace(CAROUSEL, module("captions"));
        });
        let composition = with_plugins(base(), &[plugin]);
        assert_eq!(outline(composition.tree()), "root(controller)");
    }

    #[test]
    fn augmentations_compose_in_registration_order() {
        let marker = |key: &'static str| -> Plugin {
            Rc::new(move |api| {
                api.augment(move |mut props| {
                    props.toolbar.buttons.push(ToolbarItem::Key(key.into()));
                    props
                });
            })
        };
        let composition = with_plugins(base(), &[marker("p1"), marker("p2")]);
        assert_eq!(composition.augmentation_count(), 2);

        let props = composition.augment(LightboxProps::default());
        assert_eq!(props.toolbar.keys(), vec!["close", "p1", "p2"]);
    }

    #[test]
    fn empty_target_wraps_forest() {
        let plugin: Plugin = Rc::new(|api| api.add_parent("", module("inline")));
        let composition = with_plugins(base(), &[plugin]);
        assert_eq!(
            outline(composition.tree()),
            "inline(root(controller(carousel)))"
        );
    }
}
