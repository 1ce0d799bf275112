// SPDX-License-Identifier: MPL-2.0
//! Persistent module trees and the name-keyed edits plugins apply to them.
//!
//! Every edit is a pure rebuild through [`traverse`]: a node whose module
//! name matches the target is replaced by whatever the edit returns (zero,
//! one or several nodes) and is not descended into; any other node is
//! rebuilt with its children rewritten the same way. Edits therefore apply
//! to every match, and a missing target leaves the tree as it was.

use super::{Component, MountContext, Mounted, RenderContext, View};
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// A named, renderable unit of the tree.
#[derive(Clone)]
pub struct Module {
    name: Cow<'static, str>,
    component: Rc<dyn Component>,
}

impl Module {
    pub fn new(name: impl Into<Cow<'static, str>>, component: impl Component + 'static) -> Self {
        Self {
            name: name.into(),
            component: Rc::new(component),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn component(&self) -> &dyn Component {
        self.component.as_ref()
    }
}

impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Module").field(&self.name).finish()
    }
}

/// Renders its children and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fragment;

impl Component for Fragment {
    fn render(&self, _cx: &RenderContext<'_>, children: Vec<View>) -> View {
        View::fragment(children)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub module: Module,
    pub children: Vec<Node>,
}

impl Node {
    #[must_use]
    pub fn leaf(module: Module) -> Self {
        create_node(module, Vec::new())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.module.name()
    }
}

#[must_use]
pub fn create_node(module: Module, children: Vec<Node>) -> Node {
    Node { module, children }
}

/// Rewrites every node named `target` with `edit`.
pub fn traverse<F>(nodes: &[Node], target: &str, edit: &F) -> Vec<Node>
where
    F: Fn(&Node) -> Vec<Node>,
{
    nodes
        .iter()
        .flat_map(|node| {
            if node.name() == target {
                edit(node)
            } else {
                vec![create_node(
                    node.module.clone(),
                    traverse(&node.children, target, edit),
                )]
            }
        })
        .collect()
}

#[must_use]
pub fn contains(nodes: &[Node], name: &str) -> bool {
    nodes
        .iter()
        .any(|node| node.name() == name || contains(&node.children, name))
}

/// Wraps each match in `module`. An empty `target` wraps the whole forest.
#[must_use]
pub fn add_parent(nodes: &[Node], target: &str, module: &Module) -> Vec<Node> {
    if target.is_empty() {
        return vec![create_node(module.clone(), nodes.to_vec())];
    }
    traverse(nodes, target, &|node| {
        vec![create_node(module.clone(), vec![node.clone()])]
    })
}

/// Splices `module` directly below each match, taking over its children.
#[must_use]
pub fn append(nodes: &[Node], target: &str, module: &Module) -> Vec<Node> {
    traverse(nodes, target, &|node| {
        vec![create_node(
            node.module.clone(),
            vec![create_node(module.clone(), node.children.clone())],
        )]
    })
}

#[must_use]
pub fn add_child(nodes: &[Node], target: &str, module: &Module, precede: bool) -> Vec<Node> {
    traverse(nodes, target, &|node| {
        let mut children = node.children.clone();
        let child = Node::leaf(module.clone());
        if precede {
            children.insert(0, child);
        } else {
            children.push(child);
        }
        vec![create_node(node.module.clone(), children)]
    })
}

#[must_use]
pub fn add_sibling(nodes: &[Node], target: &str, module: &Module, precede: bool) -> Vec<Node> {
    traverse(nodes, target, &|node| {
        let sibling = Node::leaf(module.clone());
        if precede {
            vec![sibling, node.clone()]
        } else {
            vec![node.clone(), sibling]
        }
    })
}

/// Swaps the module of each match, keeping its children.
#[must_use]
pub fn replace(nodes: &[Node], target: &str, module: &Module) -> Vec<Node> {
    traverse(nodes, target, &|node| {
        vec![create_node(module.clone(), node.children.clone())]
    })
}

/// Drops each match and splices its children into its place.
#[must_use]
pub fn remove(nodes: &[Node], target: &str) -> Vec<Node> {
    traverse(nodes, target, &|node| node.children.clone())
}

/// Compact `name(child, child)` rendering of a forest.
#[must_use]
pub fn outline(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|node| {
            if node.children.is_empty() {
                node.name().to_string()
            } else {
                format!("{}({})", node.name(), outline(&node.children))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders `node`: children first, in order, then the node's component.
#[must_use]
pub fn render_node(node: &Node, cx: &RenderContext<'_>) -> View {
    let children = node
        .children
        .iter()
        .map(|child| render_node(child, cx))
        .collect();
    node.module.component().render(cx, children)
}

#[must_use]
pub fn render_tree(nodes: &[Node], cx: &RenderContext<'_>) -> View {
    View::fragment(nodes.iter().map(|node| render_node(node, cx)).collect())
}

/// Mounts every component, depth-first pre-order.
#[must_use]
pub fn mount_tree(nodes: &[Node], cx: &MountContext) -> Vec<Mounted> {
    let mut mounted = Vec::new();
    mount_into(nodes, cx, &mut mounted);
    mounted
}

fn mount_into(nodes: &[Node], cx: &MountContext, mounted: &mut Vec<Mounted>) {
    for node in nodes {
        if let Some(guard) = node.module.component().mount(cx) {
            mounted.push(guard);
        }
        mount_into(&node.children, cx, mounted);
    }
}
