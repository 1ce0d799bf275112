// SPDX-License-Identifier: MPL-2.0
//! Length values expressed either in pixels or as a percentage of the
//! container width, as used for slide padding and spacing.

use crate::error::Error;
use iced_core::Rectangle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pixel length or a percentage of the container width.
///
/// Parses from `"16px"`, `"30%"` or a bare number (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LengthRepr", into = "String")]
pub enum LengthPercentage {
    Pixels(f32),
    Percent(f32),
}

impl LengthPercentage {
    /// Resolves the length against a container width.
    #[must_use]
    pub fn resolve(self, container_width: f32) -> f32 {
        match self {
            LengthPercentage::Pixels(px) => px,
            LengthPercentage::Percent(pct) => container_width / 100.0 * pct,
        }
    }
}

impl Default for LengthPercentage {
    fn default() -> Self {
        LengthPercentage::Pixels(0.0)
    }
}

impl FromStr for LengthPercentage {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (number, percent) = if let Some(number) = trimmed.strip_suffix('%') {
            (number, true)
        } else if let Some(number) = trimmed.strip_suffix("px") {
            (number, false)
        } else {
            (trimmed, false)
        };

        let parsed: f32 = number
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("invalid length `{value}`")))?;
        if !parsed.is_finite() {
            return Err(Error::Config(format!("invalid length `{value}`")));
        }

        Ok(if percent {
            LengthPercentage::Percent(parsed)
        } else {
            LengthPercentage::Pixels(parsed)
        })
    }
}

impl fmt::Display for LengthPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthPercentage::Pixels(px) => write!(f, "{px}px"),
            LengthPercentage::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

impl From<LengthPercentage> for String {
    fn from(value: LengthPercentage) -> Self {
        value.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Number(f32),
    Text(String),
}

impl TryFrom<LengthRepr> for LengthPercentage {
    type Error = Error;

    fn try_from(repr: LengthRepr) -> Result<Self, Self::Error> {
        match repr {
            LengthRepr::Number(px) if px.is_finite() => Ok(LengthPercentage::Pixels(px)),
            LengthRepr::Number(px) => Err(Error::Config(format!("invalid length `{px}`"))),
            LengthRepr::Text(text) => text.parse(),
        }
    }
}

/// Computes the slide rectangle: the container shrunk by `padding` on every
/// side. Sizes never go negative.
#[must_use]
pub fn compute_slide_rect(container: Rectangle, padding: LengthPercentage) -> Rectangle {
    let padding = padding.resolve(container.width).max(0.0);
    let width = (container.width - 2.0 * padding).max(0.0);
    let height = (container.height - 2.0 * padding).max(0.0);

    Rectangle {
        x: container.x + (container.width - width) / 2.0,
        y: container.y + (container.height - height) / 2.0,
        width,
        height,
    }
}
