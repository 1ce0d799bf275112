// SPDX-License-Identifier: MPL-2.0
//! CSS timing functions.
//!
//! Named curves map to their CSS cubic-bezier control points, so
//! `Easing::Ease.apply(t)` matches what a browser would compute for
//! `transition-timing-function: ease`.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Easing functions for transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Custom cubic bezier (x1, y1, x2, y2). `x1` and `x2` lie in `[0, 1]`.
    CubicBezier(f32, f32, f32, f32),
}

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f32 = 1e-6;
const SUBDIVISION_PRECISION: f32 = 1e-5;
const SUBDIVISION_MAX_ITERATIONS: usize = 20;

impl Easing {
    /// Apply easing to a progress value (0.0 - 1.0).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self.control_points() {
            None => t,
            Some((x1, y1, x2, y2)) => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                bezier(solve_parameter(t, x1, x2), y1, y2)
            }
        }
    }

    fn control_points(self) -> Option<(f32, f32, f32, f32)> {
        match self {
            Easing::Linear => None,
            Easing::Ease => Some((0.25, 0.1, 0.25, 1.0)),
            Easing::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            Easing::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            Easing::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            Easing::CubicBezier(x1, y1, x2, y2) => Some((x1, y1, x2, y2)),
        }
    }
}

/// One coordinate of a cubic bezier anchored at 0 and 1.
fn bezier(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

fn bezier_slope(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// Finds the curve parameter whose x coordinate equals `x`.
fn solve_parameter(x: f32, x1: f32, x2: f32) -> f32 {
    let mut t = x;
    for _ in 0..NEWTON_ITERATIONS {
        let slope = bezier_slope(t, x1, x2);
        if slope.abs() < NEWTON_MIN_SLOPE {
            break;
        }
        let error = bezier(t, x1, x2) - x;
        if error.abs() < SUBDIVISION_PRECISION {
            return t;
        }
        t -= error / slope;
    }

    // Newton diverged or stalled on a flat section: bisect.
    let (mut low, mut high) = (0.0_f32, 1.0_f32);
    t = x;
    for _ in 0..SUBDIVISION_MAX_ITERATIONS {
        let value = bezier(t, x1, x2);
        if (value - x).abs() < SUBDIVISION_PRECISION {
            break;
        }
        if value < x {
            low = t;
        } else {
            high = t;
        }
        t = (low + high) / 2.0;
    }
    t
}

impl FromStr for Easing {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        match value {
            "linear" => return Ok(Easing::Linear),
            "ease" => return Ok(Easing::Ease),
            "ease-in" => return Ok(Easing::EaseIn),
            "ease-out" => return Ok(Easing::EaseOut),
            "ease-in-out" => return Ok(Easing::EaseInOut),
            _ => {}
        }

        let invalid = || Error::Config(format!("invalid easing `{value}`"));
        let args = value
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let points = args
            .split(',')
            .map(|part| part.trim().parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        match points.as_slice() {
            &[x1, y1, x2, y2]
                if (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
                    && y1.is_finite()
                    && y2.is_finite() =>
            {
                Ok(Easing::CubicBezier(x1, y1, x2, y2))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("linear"),
            Easing::Ease => f.write_str("ease"),
            Easing::EaseIn => f.write_str("ease-in"),
            Easing::EaseOut => f.write_str("ease-out"),
            Easing::EaseInOut => f.write_str("ease-in-out"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

impl TryFrom<String> for Easing {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(value: Easing) -> Self {
        value.to_string()
    }
}
