//! Report output model for gesture replays.

use anyhow::Result;
use flipsnap::{EventDisposition, Notification};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Report status for a replay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// A notification observed at the container, tagged with its step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationRecord {
    DragArmed {
        step: usize,
    },
    Moving {
        step: usize,
        delta: f32,
        direction: i8,
    },
    Settled {
        step: usize,
        moved: bool,
        original_point: usize,
        new_point: usize,
        cancelled: bool,
    },
    PointChanged {
        step: usize,
        previous: usize,
        current: usize,
    },
}

impl NotificationRecord {
    pub fn new(step: usize, notification: &Notification) -> Self {
        match *notification {
            Notification::DragArmed => NotificationRecord::DragArmed { step },
            Notification::Moving { delta, direction } => NotificationRecord::Moving {
                step,
                delta,
                direction: direction.signum(),
            },
            Notification::Settled(outcome) => NotificationRecord::Settled {
                step,
                moved: outcome.moved,
                original_point: outcome.original_point,
                new_point: outcome.new_point,
                cancelled: outcome.cancelled,
            },
            Notification::PointChanged { previous, current } => {
                NotificationRecord::PointChanged {
                    step,
                    previous,
                    current,
                }
            }
        }
    }
}

/// What the widget asked the host to do with a platform event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispositionRecord {
    pub step: usize,
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl DispositionRecord {
    pub fn new(step: usize, disposition: EventDisposition) -> Self {
        Self {
            step,
            prevent_default: disposition.prevent_default,
            stop_propagation: disposition.stop_propagation,
        }
    }
}

/// Widget state when the run ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalState {
    pub adapter: String,
    pub current_point: usize,
    pub current_offset: f32,
    pub max_point: usize,
    pub distance: f32,
    pub gesture: String,
    pub destroyed: bool,
}

/// Machine-readable result of a replay run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub elapsed_ms: f64,
    pub final_state: FinalState,
    pub notifications: Vec<NotificationRecord>,
    /// Only events the widget claimed are listed
    pub dispositions: Vec<DispositionRecord>,
}

impl ReplayReport {
    pub fn is_failed(&self) -> bool {
        self.status == ReportStatus::Failed
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
