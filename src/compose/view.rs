// SPDX-License-Identifier: MPL-2.0
//! Headless render output.
//!
//! A [`View`] is a plain description tree: the host walks it and draws
//! whatever each `kind` means on its platform.

use crate::animation::Keyframe;
use iced_core::Rectangle;
use std::borrow::Cow;

/// Kind of a view that only groups its children.
pub const FRAGMENT: &str = "fragment";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct View {
    pub kind: Cow<'static, str>,
    pub key: Option<String>,
    pub text: Option<String>,
    pub rect: Option<Rectangle>,
    pub transform: Option<Keyframe>,
    pub disabled: bool,
    pub attributes: Vec<(Cow<'static, str>, String)>,
    pub children: Vec<View>,
}

impl View {
    #[must_use]
    pub fn new(kind: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn fragment(children: Vec<View>) -> Self {
        Self::new(FRAGMENT).with_children(children)
    }

    /// A fragment without children; renders nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(FRAGMENT)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind == FRAGMENT && self.children.is_empty()
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: Rectangle) -> Self {
        self.rect = Some(rect);
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Keyframe) -> Self {
        self.transform = Some(transform);
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: View) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = View>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First view of `kind`, depth-first, including `self`.
    #[must_use]
    pub fn find(&self, kind: &str) -> Option<&View> {
        if self.kind == kind {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(kind))
    }

    /// Every view of `kind`, depth-first pre-order.
    #[must_use]
    pub fn find_all(&self, kind: &str) -> Vec<&View> {
        let mut found = Vec::new();
        self.collect(kind, &mut found);
        found
    }

    fn collect<'a>(&'a self, kind: &str, found: &mut Vec<&'a View>) {
        if self.kind == kind {
            found.push(self);
        }
        for child in &self.children {
            child.collect(kind, found);
        }
    }

    /// First view carrying `key`, depth-first.
    #[must_use]
    pub fn find_key(&self, key: &str) -> Option<&View> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_key(key))
    }
}
