// SPDX-License-Identifier: MPL-2.0
//! Slide strip.
//!
//! Renders the current slide plus a preload window on each side. Item keys
//! combine the slide's global position with its slide key so that an
//! animated move keeps every item's identity.

use super::CAROUSEL;
use crate::compose::{Component, Module, RenderContext, View};
use crate::domain::{PreloadRadius, Slide, SlideContent};
use crate::props::SlideInfo;
use crate::state::slide_index;

#[derive(Debug, Clone, Copy, Default)]
pub struct Carousel;

/// Built-in rendering of slide content.
#[must_use]
pub fn default_slide_view(slide: &Slide) -> View {
    match &slide.content {
        SlideContent::Image {
            src,
            alt,
            width,
            height,
        } => {
            let mut view = View::new("image").with_attribute("src", src.clone());
            if let Some(alt) = alt {
                view = view.with_attribute("alt", alt.clone());
            }
            if let (Some(width), Some(height)) = (width, height) {
                view = view
                    .with_attribute("width", width.to_string())
                    .with_attribute("height", height.to_string());
            }
            view
        }
        SlideContent::Video {
            sources, poster, ..
        } => {
            let mut view = View::new("video").with_children(sources.iter().map(|source| {
                View::new("source")
                    .with_attribute("src", source.src.clone())
                    .with_attribute("type", source.mime_type.clone())
            }));
            if let Some(poster) = poster {
                view = view.with_attribute("poster", poster.clone());
            }
            view
        }
        SlideContent::Custom { kind } => View::new(kind.clone()),
    }
}

fn render_slide(cx: &RenderContext<'_>, info: &SlideInfo<'_>) -> View {
    let overrides = &cx.props.render;
    let content = overrides
        .slide
        .as_ref()
        .and_then(|render| render(cx, info))
        .unwrap_or_else(|| default_slide_view(info.slide));

    let mut children = Vec::with_capacity(3);
    if let Some(header) = overrides.slide_header.as_ref().and_then(|render| render(cx, info)) {
        children.push(header);
    }
    children.push(content);
    if let Some(footer) = overrides.slide_footer.as_ref().and_then(|render| render(cx, info)) {
        children.push(footer);
    }
    View::fragment(children)
}

impl Component for Carousel {
    fn render(&self, cx: &RenderContext<'_>, children: Vec<View>) -> View {
        let state = cx.state;
        let slides = state.slides();
        let count = slides.len();
        let carousel = &cx.props.carousel;
        let width = cx.layout.container.width;

        let mut view = View::new(CAROUSEL)
            .with_transform(cx.layout.transform)
            .with_attribute("spacing", carousel.spacing.resolve(width).to_string())
            .with_attribute("padding", carousel.padding.resolve(width).to_string());
        if count == 0 {
            return view.with_children(children);
        }

        let preload = PreloadRadius::new(carousel.preload).effective(count, carousel.finite);
        let preload = i64::try_from(preload).unwrap_or(0);
        let current = i64::try_from(state.current_index()).unwrap_or(0);
        let last = i64::try_from(count).unwrap_or(i64::MAX) - 1;

        for offset in -preload..=preload {
            let global = state.global_index() + offset;
            if carousel.finite && !(0..=last).contains(&(current + offset)) {
                view = view.with_child(
                    View::new("slide-placeholder").with_key(format!("placeholder-{global}")),
                );
                continue;
            }

            let index = slide_index(global, count);
            let slide = &slides[index];
            let key = match slide.slide_key() {
                Some(slide_key) => format!("{global}-{slide_key}"),
                None => format!("{global}-{index}"),
            };
            let info = SlideInfo {
                slide,
                rect: cx.layout.slide_rect,
                offset,
            };
            let mut item = View::new("slide")
                .with_key(key)
                .with_rect(cx.layout.slide_rect)
                .with_attribute("offset", offset.to_string())
                .with_child(render_slide(cx, &info));
            if !info.is_current() {
                item = item.with_attribute("aria-hidden", "true");
            }
            view = view.with_child(item);
        }
        view.with_children(children)
    }
}

#[must_use]
pub fn module() -> Module {
    Module::new(CAROUSEL, Carousel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerLayout;
    use crate::props::LightboxProps;
    use crate::state::{Action, NavigationState};
    use std::rc::Rc;

    fn slides(n: usize) -> Rc<[Slide]> {
        (0..n)
            .map(|i| Slide::image(format!("{i}.jpg")))
            .collect::<Vec<_>>()
            .into()
    }

    fn render(props: &LightboxProps, state: &NavigationState) -> View {
        let layout = ControllerLayout::default();
        let cx = RenderContext {
            props,
            state,
            layout: &layout,
        };
        Carousel.render(&cx, Vec::new())
    }

    fn keys(view: &View) -> Vec<String> {
        view.children
            .iter()
            .map(|child| child.key.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn renders_preload_window_around_current() {
        let props = LightboxProps::default();
        let state = NavigationState::new(slides(10), 5);
        let view = render(&props, &state);
        assert_eq!(
            keys(&view),
            vec!["3-3.jpg", "4-4.jpg", "5-5.jpg", "6-6.jpg", "7-7.jpg"]
        );
    }

    #[test]
    fn infinite_window_wraps() {
        let props = LightboxProps::default();
        let state = NavigationState::new(slides(3), 0);
        // min(2, max(3 / 2, 1)) = 1
        assert_eq!(keys(&render(&props, &state)), vec!["-1-2.jpg", "0-0.jpg", "1-1.jpg"]);
    }

    #[test]
    fn finite_edges_render_placeholders() {
        let mut props = LightboxProps::default();
        props.carousel.finite = true;
        let state = NavigationState::new(slides(3), 0);
        let view = render(&props, &state);
        // min(2, max(3 - 1, 1)) = 2
        assert_eq!(view.children.len(), 5);
        assert_eq!(view.children[0].kind, "slide-placeholder");
        assert_eq!(view.children[1].kind, "slide-placeholder");
        assert_eq!(view.children[2].key.as_deref(), Some("0-0.jpg"));
    }

    #[test]
    fn keys_follow_global_index() {
        let props = LightboxProps::default();
        let mut state = NavigationState::new(slides(3), 2);
        state.apply(&Action::swipe(1));
        let view = render(&props, &state);
        assert_eq!(view.children[1].key.as_deref(), Some("3-0.jpg"));
    }

    #[test]
    fn only_current_slide_is_exposed() {
        let props = LightboxProps::default();
        let state = NavigationState::new(slides(3), 1);
        let view = render(&props, &state);
        let exposed: Vec<_> = view
            .children
            .iter()
            .filter(|child| child.attribute("aria-hidden").is_none())
            .map(|child| child.attribute("offset"))
            .collect();
        assert_eq!(exposed, vec![Some("0")]);
    }

    #[test]
    fn slide_override_falls_back_to_default() {
        let mut props = LightboxProps::default();
        props.render.slide = Some(Rc::new(|_, info| {
            info.is_current().then(|| View::new("custom-current"))
        }));
        let state = NavigationState::new(slides(3), 1);
        let view = render(&props, &state);
        assert_eq!(view.find_all("custom-current").len(), 1);
        assert_eq!(view.find_all("image").len(), 2);
    }

    #[test]
    fn empty_carousel_has_no_items() {
        let props = LightboxProps::default();
        let state = NavigationState::default();
        assert!(render(&props, &state).children.is_empty());
    }
}
