// SPDX-License-Identifier: MPL-2.0
//! This module handles the lightbox configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use slidelens::config::{self, Settings};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut settings = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! settings.carousel.finite = true;
//!
//! // Save the modified configuration
//! config::save(&settings).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&settings, &temp_file).expect("Failed to save to path");
//! let loaded = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert!(loaded.carousel.finite);
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::animation::Easing;
use crate::domain::LengthPercentage;
use crate::error::Result;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "SlideLens";

/// Persisted lightbox settings. Every table is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub carousel: CarouselSettings,
    pub animation: AnimationSettings,
    pub controller: ControllerSettings,
    pub toolbar: ToolbarSettings,
    pub labels: Labels,
    pub no_scroll: NoScrollSettings,
    pub slideshow: SlideshowSettings,
    pub counter: CounterSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    /// Disable wrap-around at both ends.
    pub finite: bool,
    /// Slides rendered on each side of the current one.
    pub preload: usize,
    pub padding: LengthPercentage,
    pub spacing: LengthPercentage,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            finite: false,
            preload: DEFAULT_PRELOAD,
            padding: LengthPercentage::Pixels(16.0),
            spacing: LengthPercentage::Percent(30.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    #[serde(with = "millis")]
    pub fade: Duration,
    #[serde(with = "millis")]
    pub swipe: Duration,
    /// Duration of programmatic navigation; falls back to `swipe`.
    #[serde(with = "millis_option", skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Duration>,
    pub easing: EasingSettings,
}

impl AnimationSettings {
    /// Duration of a programmatic (non-drag) move.
    #[must_use]
    pub fn navigation_duration(&self) -> Duration {
        self.navigation.unwrap_or(self.swipe)
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            fade: Duration::from_millis(DEFAULT_FADE_MS),
            swipe: Duration::from_millis(DEFAULT_SWIPE_MS),
            navigation: None,
            easing: EasingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EasingSettings {
    pub fade: Easing,
    pub swipe: Easing,
    pub navigation: Easing,
}

impl Default for EasingSettings {
    fn default() -> Self {
        Self {
            fade: Easing::Ease,
            swipe: Easing::EaseOut,
            navigation: Easing::EaseInOut,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Focus the container when the lightbox opens.
    pub focus: bool,
    pub close_on_pull_up: bool,
    pub close_on_pull_down: bool,
    /// Turn off pointer and wheel swiping.
    pub disable_swipe_navigation: bool,
    pub tuning: GestureTuning,
}

impl ControllerSettings {
    #[must_use]
    pub fn pull_enabled(&self) -> bool {
        self.close_on_pull_up || self.close_on_pull_down
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            focus: true,
            close_on_pull_up: false,
            close_on_pull_down: false,
            disable_swipe_navigation: false,
            tuning: GestureTuning::default(),
        }
    }
}

/// Gesture heuristics. Defaults reproduce the behavior users expect from
/// touch carousels; hosts may adjust them per device class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureTuning {
    pub swipe_threshold: f32,
    pub commit_ratio: f32,
    pub flick_min_offset: f32,
    pub pull_min_opacity: f32,
    pub wheel_commit_ratio: f32,
    pub wheel_inertia_factor: f32,
    #[serde(with = "millis")]
    pub wheel_inertia_decay: Duration,
}

impl GestureTuning {
    /// Pull distance past which releasing closes the lightbox.
    #[must_use]
    pub fn pull_commit_distance(&self) -> f32 {
        self.swipe_threshold * PULL_COMMIT_FACTOR
    }
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            swipe_threshold: SWIPE_THRESHOLD_PX,
            commit_ratio: SWIPE_COMMIT_RATIO,
            flick_min_offset: FLICK_MIN_OFFSET_PX,
            pull_min_opacity: PULL_MIN_OPACITY,
            wheel_commit_ratio: WHEEL_COMMIT_RATIO,
            wheel_inertia_factor: WHEEL_INERTIA_FACTOR,
            wheel_inertia_decay: Duration::from_millis(WHEEL_INERTIA_DECAY_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarSettings {
    /// Ordered button keys. Built-in keys render built-in buttons; other
    /// keys are placeholders that plugins may fill.
    pub buttons: Vec<String>,
}

impl Default for ToolbarSettings {
    fn default() -> Self {
        Self {
            buttons: vec!["close".to_string()],
        }
    }
}

/// Label overrides, keyed by the English default text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(BTreeMap<String, String>);

impl Labels {
    /// Returns the label for `key`, or `key` itself when not overridden.
    #[must_use]
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.0.get(key).map_or(key, String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.0.insert(key.into(), label.into());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoScrollSettings {
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideshowSettings {
    pub autoplay: bool,
    #[serde(with = "millis")]
    pub delay: Duration,
}

impl Default for SlideshowSettings {
    fn default() -> Self {
        Self {
            autoplay: false,
            delay: Duration::from_millis(DEFAULT_SLIDESHOW_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterSettings {
    pub separator: String,
}

impl Default for CounterSettings {
    fn default() -> Self {
        Self {
            separator: DEFAULT_COUNTER_SEPARATOR.to_string(),
        }
    }
}

/// Durations are stored as whole milliseconds.
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

mod millis_option {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => super::millis::serialize(duration, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Option::<u64>::deserialize(deserializer).map(|value| value.map(Duration::from_millis))
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Settings> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Settings::default())
}

pub fn save(settings: &Settings) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(settings, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), %err, "invalid settings file, using defaults");
        Settings::default()
    }))
}

pub fn save_to_path(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(settings)?;
    fs::write(path, content)?;
    Ok(())
}
