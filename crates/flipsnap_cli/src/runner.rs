//! Scenario runner that replays steps against a headless snap widget.

use std::rc::Rc;

use anyhow::{Context, Result};
use flipsnap::{Capabilities, InputEvent, SnapConfig, SnapWidget};
use flipsnap_animation::FRAME_INTERVAL_MS;
use flipsnap_platform::headless::HeadlessElement;
use tracing::{debug, info};

use crate::report::{
    DispositionRecord, FinalState, NotificationRecord, ReplayReport, ReportStatus,
};
use crate::scenario::{Scenario, ScenarioStep};

/// Tolerance for `assert_offset`
const OFFSET_EPSILON: f32 = 0.01;

/// Execute scenario JSON.
pub fn run_scenario(input: &str) -> Result<ReplayReport> {
    let scenario = Scenario::from_json(input)?;
    run_loaded_scenario(&scenario, None)
}

/// Execute a pre-loaded scenario. `config_override` replaces the scenario's
/// own widget config.
pub fn run_loaded_scenario(
    scenario: &Scenario,
    config_override: Option<&SnapConfig>,
) -> Result<ReplayReport> {
    let element = Rc::new(HeadlessElement::new(
        scenario.host.probe(),
        scenario.container.children,
        scenario.container.scroll_height,
    ));
    let capabilities = Capabilities::detect(element.as_ref());
    let config = config_override.unwrap_or(&scenario.config).clone();
    let widget = SnapWidget::with_capabilities(element.clone(), config, &capabilities)
        .context("Failed to create snap widget")?;
    info!(
        adapter = ?widget.adapter_kind(),
        steps = scenario.steps.len(),
        "replaying scenario"
    );

    let mut replay = Replay {
        element,
        widget,
        now_ms: 0.0,
        notifications: Vec::new(),
        dispositions: Vec::new(),
    };

    for (step_index, step) in scenario.steps.iter().enumerate() {
        debug!(step_index, ?step, "step");
        let failure = replay.apply(step_index, step);
        replay.collect_notifications(step_index);
        if let Some((assertion, message)) = failure {
            return Ok(replay.finish(Some((step_index, assertion, message))));
        }
    }

    Ok(replay.finish(None))
}

struct Replay {
    element: Rc<HeadlessElement>,
    widget: SnapWidget,
    now_ms: f64,
    notifications: Vec<NotificationRecord>,
    dispositions: Vec<DispositionRecord>,
}

impl Replay {
    /// Apply one step; returns `(assertion, message)` when an assertion fails
    fn apply(&mut self, step_index: usize, step: &ScenarioStep) -> Option<(&'static str, String)> {
        match step {
            ScenarioStep::Down { pointer, x, y } => {
                let event = InputEvent::pointer_down((*pointer).into(), *x, *y, self.now_ms);
                self.input(step_index, event);
            }
            ScenarioStep::Move { pointer, x, y } => {
                let event = InputEvent::pointer_move((*pointer).into(), *x, *y, self.now_ms);
                self.input(step_index, event);
            }
            ScenarioStep::Up { pointer } => {
                let event = InputEvent::pointer_up((*pointer).into(), 0.0, 0.0, self.now_ms);
                self.input(step_index, event);
            }
            ScenarioStep::Click => {
                let event = InputEvent::Click {
                    timestamp_ms: self.now_ms,
                };
                self.input(step_index, event);
            }
            ScenarioStep::GestureStart => self.input(step_index, InputEvent::GestureStart),
            ScenarioStep::GestureEnd => self.input(step_index, InputEvent::GestureEnd),
            ScenarioStep::TransitionEnd => self.input(step_index, InputEvent::TransitionEnd),
            ScenarioStep::Wait { ms } => self.wait(*ms),
            ScenarioStep::Next { duration_ms } => self.widget.to_next(*duration_ms),
            ScenarioStep::Prev { duration_ms } => self.widget.to_prev(*duration_ms),
            ScenarioStep::MoveTo { point, duration_ms } => {
                self.widget.move_to_point(*point, *duration_ms)
            }
            ScenarioStep::Refresh => self.widget.refresh(),
            ScenarioStep::SetChildren {
                count,
                scroll_height,
            } => {
                self.element.set_children(*count);
                if let Some(scroll_height) = scroll_height {
                    self.element.set_scroll_height(*scroll_height);
                }
            }
            ScenarioStep::CancelMoving { count } => self.element.cancel_next_moving(*count),
            ScenarioStep::Destroy => self.widget.destroy(),
            ScenarioStep::AssertPoint { point } => {
                let actual = self.widget.current_point();
                if actual != *point {
                    return Some((
                        "assert_point",
                        format!("expected point {point}, found {actual}"),
                    ));
                }
            }
            ScenarioStep::AssertOffset { offset } => {
                let actual = self.widget.current_offset();
                if (actual - offset).abs() > OFFSET_EPSILON {
                    return Some((
                        "assert_offset",
                        format!("expected offset {offset}, found {actual}"),
                    ));
                }
            }
        }
        None
    }

    fn input(&mut self, step_index: usize, event: InputEvent) {
        let disposition = self.widget.handle(event);
        if !disposition.is_none() {
            self.dispositions
                .push(DispositionRecord::new(step_index, disposition));
        }
    }

    /// Advance the clock frame by frame, then land exactly on the target
    fn wait(&mut self, ms: u64) {
        let target = self.now_ms + ms as f64;
        while self.now_ms + FRAME_INTERVAL_MS < target {
            self.now_ms += FRAME_INTERVAL_MS;
            self.widget.tick(self.now_ms);
        }
        self.now_ms = target;
        self.widget.tick(self.now_ms);
    }

    fn collect_notifications(&mut self, step_index: usize) {
        self.notifications.extend(
            self.element
                .take_dispatched()
                .iter()
                .map(|notification| NotificationRecord::new(step_index, notification)),
        );
    }

    fn finish(self, failure: Option<(usize, &'static str, String)>) -> ReplayReport {
        let final_state = FinalState {
            adapter: format!("{:?}", self.widget.adapter_kind()),
            current_point: self.widget.current_point(),
            current_offset: self.widget.current_offset(),
            max_point: self.widget.max_point(),
            distance: self.widget.distance(),
            gesture: format!("{:?}", self.widget.gesture_state()),
            destroyed: self.widget.is_destroyed(),
        };
        let (status, failed_step_index, assertion, message) = match failure {
            Some((index, assertion, message)) => (
                ReportStatus::Failed,
                Some(index),
                Some(assertion.to_string()),
                Some(message),
            ),
            None => (ReportStatus::Passed, None, None, None),
        };
        ReplayReport {
            status,
            failed_step_index,
            assertion,
            message,
            elapsed_ms: self.now_ms,
            final_state,
            notifications: self.notifications,
            dispositions: self.dispositions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scenario_passes() {
        let report = run_scenario(r#"{ "steps": [] }"#).unwrap();
        assert!(!report.is_failed());
        assert_eq!(report.final_state.max_point, 3);
        assert_eq!(report.final_state.adapter, "Transform3d");
        assert!(report.notifications.is_empty());
    }

    #[test]
    fn test_wait_lands_on_exact_time() {
        let report = run_scenario(
            r#"{ "steps": [ { "type": "wait", "ms": 25 }, { "type": "wait", "ms": 10 } ] }"#,
        )
        .unwrap();
        assert_eq!(report.elapsed_ms, 35.0);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let result = run_scenario(r#"{ "config": { "distance": -1.0 }, "steps": [] }"#);
        assert!(result.is_err());
    }
}
