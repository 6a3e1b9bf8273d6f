//! Widget configuration
//!
//! All options are optional. Configs can be built in code or loaded from
//! TOML:
//!
//! ```toml
//! distance = 320.0
//! max_point = 4
//! disable_3d = true
//! transition_duration = 500
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settle transition length when none is configured
pub const DEFAULT_TRANSITION_DURATION_MS: u32 = 350;

/// Movement (in page units) that commits or aborts an armed gesture
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Click swallowing continues this long after a drag is released
pub const CLICK_SUPPRESS_MS: f64 = 200.0;

/// Overscroll moves at 1/3 speed
pub const RUBBER_BAND_DIVISOR: f32 = 3.0;

/// Snap widget options
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Panel step; computed from the container extent when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
    /// Last panel index; computed from the element children when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_point: Option<usize>,
    /// Ignore all pointer input
    pub disable_touch: bool,
    /// Use `translate` even when 3-D composition is available
    pub disable_3d: bool,
    /// Default transition length in milliseconds
    pub transition_duration: u32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            distance: None,
            max_point: None,
            disable_touch: false,
            disable_3d: false,
            transition_duration: DEFAULT_TRANSITION_DURATION_MS,
        }
    }
}

impl SnapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn with_max_point(mut self, max_point: usize) -> Self {
        self.max_point = Some(max_point);
        self
    }

    pub fn with_disable_touch(mut self, disable_touch: bool) -> Self {
        self.disable_touch = disable_touch;
        self
    }

    pub fn with_disable_3d(mut self, disable_3d: bool) -> Self {
        self.disable_3d = disable_3d;
        self
    }

    pub fn with_transition_duration(mut self, duration_ms: u32) -> Self {
        self.transition_duration = duration_ms;
        self
    }

    /// Parse from TOML text
    pub fn from_toml(input: &str) -> Result<Self> {
        let config: SnapConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject overrides that cannot describe a layout
    pub fn validate(&self) -> Result<()> {
        if let Some(distance) = self.distance {
            if !distance.is_finite() || distance <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "distance must be a positive number, got {distance}"
                )));
            }
        }
        Ok(())
    }
}
