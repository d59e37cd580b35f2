//! Host-supplied control parameters.
//!
//! The host hands the canvas a mode string and a zoom percentage, once at
//! startup and again whenever its parameters change. Both are kept here in
//! their raw form and interpreted leniently.

use crate::constants::{DEFAULT_SCALE_PERCENT, MAX_SCALE_PERCENT, MIN_SCALE_PERCENT};
use crate::gesture::EligibilityFilter;
use crate::types::Mode;
use serde::{Deserialize, Serialize};

impl Mode {
    /// Parses a mode parameter. Unknown values fall back to [`Mode::Edit`].
    pub fn from_config_str(value: &str) -> Mode {
        match value.trim().to_ascii_lowercase().as_str() {
            "add" => Mode::Add,
            "edit" => Mode::Edit,
            "connect" => Mode::Connect,
            other => {
                log::warn!("unknown mode {other:?}, falling back to edit");
                Mode::Edit
            }
        }
    }
}

/// Parameters the host controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Interaction mode as supplied by the host ("add", "edit" or "connect")
    pub mode: String,
    /// Zoom percentage applied to the whole scene (100 = 1.0x)
    pub scale: f32,
    /// Which nodes take part in hit-testing and selection
    pub eligibility: EligibilityFilter,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Edit.as_str().to_string(),
            scale: DEFAULT_SCALE_PERCENT,
            eligibility: EligibilityFilter::default(),
        }
    }
}

impl ControlConfig {
    /// The interpreted mode.
    pub fn mode(&self) -> Mode {
        Mode::from_config_str(&self.mode)
    }

    /// Stores `mode` as the mode parameter.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode.as_str().to_string();
    }

    /// Scale percentage clamped to the supported range.
    pub fn scale_percent(&self) -> f32 {
        if self.scale.is_finite() {
            self.scale.clamp(MIN_SCALE_PERCENT, MAX_SCALE_PERCENT)
        } else {
            DEFAULT_SCALE_PERCENT
        }
    }

    /// Scale as a multiplier (100% = 1.0).
    pub fn zoom_factor(&self) -> f32 {
        self.scale_percent() / 100.0
    }

    /// Eligibility predicate described by this configuration.
    pub fn eligibility(&self) -> EligibilityFilter {
        self.eligibility.clone()
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
