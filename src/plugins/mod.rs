// SPDX-License-Identifier: MPL-2.0
//! Optional plugins.
//!
//! Each plugin is a [`Plugin`](crate::compose::Plugin) value to push onto
//! [`LightboxProps::plugins`](crate::props::LightboxProps).

pub mod captions;
pub mod counter;
pub mod inline;
pub mod slideshow;

pub const CAPTIONS: &str = "captions";
pub const COUNTER: &str = "counter";
pub const INLINE: &str = "inline";
pub const SLIDESHOW: &str = "slideshow";

#[cfg(test)]
pub(crate) mod testing {
    use crate::compose::{with_plugins, Node, Plugin};
    use crate::modules::base_tree;
    use crate::props::LightboxProps;

    /// Installs `plugin` on the base tree and returns the resulting tree and
    /// augmented props.
    pub fn install(plugin: Plugin, props: LightboxProps) -> (Vec<Node>, LightboxProps) {
        let composition = with_plugins(base_tree(), &[plugin]);
        let props = composition.augment(props);
        (composition.into_tree(), props)
    }
}
