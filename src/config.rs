//! Scene configuration parsed from JSON or environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bounded::{BoundedProperty, BoundedPropertyConfig};
use crate::camera::{Camera, Size};
use crate::consts::{
    DEFAULT_KEY_PAN_SPEED, DEFAULT_KEY_ZOOM_SPEED, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH,
    DEFAULT_ZOOM_EASE_RATE, DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MIN,
};
use crate::error::SceneError;
use crate::input::KeyAction;

/// Top-level scene options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Camera options. Required; a scene cannot be built without them.
    #[serde(default)]
    pub view: Option<ViewConfig>,
    /// Installs an input binding when present.
    #[serde(default)]
    pub input: Option<InputConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { view: Some(ViewConfig::default()), input: None }
    }
}

/// Camera and screen options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Lower clamp for zoom.
    pub zoom_min: BoundedPropertyConfig,
    /// Upper clamp for zoom.
    pub zoom_max: BoundedPropertyConfig,
    #[serde(default = "default_zoom_ease_rate")]
    pub zoom_ease_rate: f64,
    #[serde(default = "default_screen_width")]
    pub width: f64,
    #[serde(default = "default_screen_height")]
    pub height: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_min: BoundedPropertyConfig::fixed(DEFAULT_ZOOM_MIN),
            zoom_max: BoundedPropertyConfig::fixed(DEFAULT_ZOOM_MAX),
            zoom_ease_rate: DEFAULT_ZOOM_EASE_RATE,
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

impl ViewConfig {
    /// Reject zoom ranges and screen sizes the camera cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the zoom minimum is not positive, exceeds
    /// the maximum, the ease rate is not positive, or the screen is empty.
    pub fn validate(&self) -> Result<(), SceneError> {
        let min = self.zoom_min.clamped_value();
        let max = self.zoom_max.clamped_value();
        if !(min.is_finite() && min > 0.0) {
            return Err(SceneError::Configuration(format!("zoom_min must be positive, got {min}")));
        }
        if !max.is_finite() || min > max {
            return Err(SceneError::Configuration(format!("zoom_min {min} exceeds zoom_max {max}")));
        }
        if !(self.zoom_ease_rate.is_finite() && self.zoom_ease_rate > 0.0) {
            return Err(SceneError::Configuration(format!(
                "zoom_ease_rate must be positive, got {}",
                self.zoom_ease_rate
            )));
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(SceneError::Configuration(format!(
                "screen must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Validate and build the camera these options describe.
    ///
    /// # Errors
    ///
    /// See [`ViewConfig::validate`].
    pub fn build_camera(&self) -> Result<Camera, SceneError> {
        self.validate()?;
        Ok(Camera::new(
            BoundedProperty::from_config(&self.zoom_min),
            BoundedProperty::from_config(&self.zoom_max),
            self.zoom_ease_rate,
            Size::new(self.width, self.height),
        ))
    }
}

/// Input binding options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_pan_speed")]
    pub pan_speed: f64,
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f64,
    /// Per-action key overrides, e.g. `{ "up": ["ArrowUp", "w"] }`.
    #[serde(default)]
    pub keys: Option<BTreeMap<KeyAction, Vec<String>>>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { pan_speed: DEFAULT_KEY_PAN_SPEED, zoom_speed: DEFAULT_KEY_ZOOM_SPEED, keys: None }
    }
}

impl SceneConfig {
    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` on malformed JSON. A missing `view` is accepted
    /// here and rejected when the scene is built.
    pub fn from_json(raw: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Build configuration from environment variables.
    ///
    /// Optional (defaults in parentheses):
    /// - `STAGEHAND_ZOOM_MIN` (0.1)
    /// - `STAGEHAND_ZOOM_MAX` (2)
    /// - `STAGEHAND_ZOOM_EASE_RATE` (10)
    /// - `STAGEHAND_SCREEN_WIDTH` / `STAGEHAND_SCREEN_HEIGHT` (500)
    /// - `STAGEHAND_PAN_SPEED`: installs an input binding when set
    #[must_use]
    pub fn from_env() -> Self {
        let view = ViewConfig {
            zoom_min: BoundedPropertyConfig::fixed(env_parse("STAGEHAND_ZOOM_MIN", DEFAULT_ZOOM_MIN)),
            zoom_max: BoundedPropertyConfig::fixed(env_parse("STAGEHAND_ZOOM_MAX", DEFAULT_ZOOM_MAX)),
            zoom_ease_rate: env_parse("STAGEHAND_ZOOM_EASE_RATE", DEFAULT_ZOOM_EASE_RATE),
            width: env_parse("STAGEHAND_SCREEN_WIDTH", DEFAULT_SCREEN_WIDTH),
            height: env_parse("STAGEHAND_SCREEN_HEIGHT", DEFAULT_SCREEN_HEIGHT),
        };
        let input = env_value::<f64>("STAGEHAND_PAN_SPEED")
            .map(|pan_speed| InputConfig { pan_speed, ..InputConfig::default() });
        Self { view: Some(view), input }
    }

    /// The view options, or a `Configuration` error naming the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when `view` is absent.
    pub fn require_view(&self) -> Result<&ViewConfig, SceneError> {
        self.view.as_ref().ok_or_else(|| {
            SceneError::Configuration(format!(
                "view options are missing (defaults: zoom_min {DEFAULT_ZOOM_MIN}, zoom_max {DEFAULT_ZOOM_MAX})"
            ))
        })
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    env_value(key).unwrap_or(default)
}

/// Parsed value of `key`; unset and unparsable both read as `None`.
fn env_value<T: std::str::FromStr>(key: &str) -> Option<T> {
    match std::env::var(key).map(|raw| raw.trim().parse::<T>()) {
        Ok(Ok(value)) => Some(value),
        _ => None,
    }
}

fn default_zoom_ease_rate() -> f64 {
    DEFAULT_ZOOM_EASE_RATE
}

fn default_screen_width() -> f64 {
    DEFAULT_SCREEN_WIDTH
}

fn default_screen_height() -> f64 {
    DEFAULT_SCREEN_HEIGHT
}

fn default_pan_speed() -> f64 {
    DEFAULT_KEY_PAN_SPEED
}

fn default_zoom_speed() -> f64 {
    DEFAULT_KEY_ZOOM_SPEED
}
