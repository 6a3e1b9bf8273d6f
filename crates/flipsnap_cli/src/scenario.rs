//! Scenario definition for headless gesture replays.
//!
//! A scenario describes the container, the host's capabilities, the widget
//! config and a list of steps. JSON and TOML are both accepted:
//!
//! ```json
//! {
//!   "container": { "children": 4, "scroll_height": 400 },
//!   "host": "legacy",
//!   "steps": [
//!     { "type": "down", "y": 200 },
//!     { "type": "move", "y": 120 },
//!     { "type": "up" },
//!     { "type": "wait", "ms": 400 },
//!     { "type": "assert_point", "point": 1 }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use flipsnap::{Modality, SnapConfig};
use flipsnap_platform::headless::HeadlessProbe;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sequence of replay steps against one container.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    #[serde(default)]
    pub container: ContainerSpec,
    #[serde(default)]
    pub host: HostPreset,
    #[serde(default)]
    pub config: SnapConfig,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from TOML text.
    pub fn from_toml(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load a scenario from file. `.toml` files are read as TOML, anything
    /// else as JSON.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let scenario = if is_toml {
            Self::from_toml(&raw)
        } else {
            Self::from_json(&raw)
        };
        scenario.with_context(|| format!("Invalid scenario {}", path.display()))
    }
}

/// Panel container simulated by the headless host.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ContainerSpec {
    #[serde(default = "default_children")]
    pub children: usize,
    #[serde(default = "default_scroll_height")]
    pub scroll_height: f32,
}

impl Default for ContainerSpec {
    fn default() -> Self {
        Self {
            children: default_children(),
            scroll_height: default_scroll_height(),
        }
    }
}

fn default_children() -> usize {
    4
}

fn default_scroll_height() -> f32 {
    400.0
}

/// Capability profile of the simulated host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostPreset {
    /// Unprefixed 3-D transforms and transitions
    #[default]
    Standard,
    /// Standard plus platform pointer events
    PointerEvents,
    Webkit,
    /// Transforms without 3-D composition
    Transform2d,
    /// Positioning only; settles run on the tween fallback
    Legacy,
}

impl HostPreset {
    pub fn probe(self) -> HeadlessProbe {
        match self {
            HostPreset::Standard => HeadlessProbe::standard(),
            HostPreset::PointerEvents => HeadlessProbe::standard().with_pointer_events(true),
            HostPreset::Webkit => HeadlessProbe::webkit(),
            HostPreset::Transform2d => HeadlessProbe::transform_2d(),
            HostPreset::Legacy => HeadlessProbe::legacy(),
        }
    }
}

/// Input modality as written in scenario files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    #[default]
    Touch,
    Mouse,
    Pointer,
}

impl From<PointerKind> for Modality {
    fn from(kind: PointerKind) -> Self {
        match kind {
            PointerKind::Touch => Modality::Touch,
            PointerKind::Mouse => Modality::Mouse,
            PointerKind::Pointer => Modality::Pointer,
        }
    }
}

/// One replay step.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Down {
        #[serde(default)]
        pointer: PointerKind,
        #[serde(default)]
        x: f32,
        y: f32,
    },
    Move {
        #[serde(default)]
        pointer: PointerKind,
        #[serde(default)]
        x: f32,
        y: f32,
    },
    Up {
        #[serde(default)]
        pointer: PointerKind,
    },
    Click,
    GestureStart,
    GestureEnd,
    TransitionEnd,
    /// Advance the clock, ticking animation every frame
    Wait { ms: u64 },
    Next {
        #[serde(default)]
        duration_ms: Option<u32>,
    },
    Prev {
        #[serde(default)]
        duration_ms: Option<u32>,
    },
    MoveTo {
        point: i64,
        #[serde(default)]
        duration_ms: Option<u32>,
    },
    Refresh,
    /// Change the container's content; takes effect on the next refresh
    SetChildren {
        count: usize,
        #[serde(default)]
        scroll_height: Option<f32>,
    },
    /// Cancel the next `count` moving notifications at the element
    CancelMoving {
        #[serde(default = "default_cancel_count")]
        count: u32,
    },
    Destroy,
    AssertPoint { point: usize },
    AssertOffset { offset: f32 },
}

fn default_cancel_count() -> u32 {
    1
}
