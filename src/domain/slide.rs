// SPDX-License-Identifier: MPL-2.0
//! Slide descriptions.
//!
//! A slide only describes *what* to show. Decoding and drawing belong to the
//! host's render adapters; the core only hands them geometry.

use serde::{Deserialize, Serialize};

/// One entry of the carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Explicit key, used to keep rendered items stable across updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub content: SlideContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SlideContent {
    Image {
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
    },
    Video {
        sources: Vec<VideoSource>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        poster: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
    },
    /// Content rendered entirely by a host adapter, identified by `kind`.
    Custom { kind: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSource {
    pub src: String,
    pub mime_type: String,
}

impl Slide {
    #[must_use]
    pub fn image(src: impl Into<String>) -> Self {
        Self::from_content(SlideContent::Image {
            src: src.into(),
            alt: None,
            width: None,
            height: None,
        })
    }

    #[must_use]
    pub fn video(sources: Vec<VideoSource>) -> Self {
        Self::from_content(SlideContent::Video {
            sources,
            poster: None,
            width: None,
            height: None,
        })
    }

    #[must_use]
    pub fn custom(kind: impl Into<String>) -> Self {
        Self::from_content(SlideContent::Custom { kind: kind.into() })
    }

    fn from_content(content: SlideContent) -> Self {
        Self {
            key: None,
            title: None,
            description: None,
            content,
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Stable key for this slide: the explicit key, else the image source.
    #[must_use]
    pub fn slide_key(&self) -> Option<&str> {
        self.key.as_deref().or(match &self.content {
            SlideContent::Image { src, .. } => Some(src.as_str()),
            _ => None,
        })
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self.content, SlideContent::Image { .. })
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        matches!(self.content, SlideContent::Video { .. })
    }
}

/// Status of the active slide as reported by a render adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideStatus {
    Loading,
    Playing,
    Error,
    Complete,
}
