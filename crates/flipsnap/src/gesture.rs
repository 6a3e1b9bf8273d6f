//! Drag gesture state machine
//!
//! One press/move/release sequence at a time. A press arms a session; the
//! first move past [`DRAG_THRESHOLD`] either commits it to a vertical drag
//! or, for horizontal movement, hands the gesture back to the platform.
//!
//! ```text
//! Idle ──press──▶ Arming ──vertical > 5──▶ Dragging ──release──▶ Settling ──▶ Idle
//!                   │                        │
//!                   ├─horizontal > 5─▶ Idle  └─moving cancelled─▶ Settling
//!                   └─release──▶ Idle
//! ```
//!
//! The machine only decides. Applying offsets, notifying subscribers and
//! driving animation is left to the widget.

use flipsnap_core::{
    Direction, EventId, Modality, PagePoint, SettleOutcome, StateCell, StateTransitions,
};
use flipsnap_platform::AnimationToken;

use crate::config::{CLICK_SUPPRESS_MS, DRAG_THRESHOLD, RUBBER_BAND_DIVISOR};
use crate::layout::OffsetRange;

/// Gesture event IDs
pub mod gesture_events {
    use flipsnap_core::EventId;

    /// Pointer pressed
    pub const ARM: EventId = 1;
    /// Vertical movement passed the threshold
    pub const COMMIT: EventId = 2;
    /// Horizontal movement passed the threshold
    pub const PASS_THROUGH: EventId = 3;
    /// Pointer released
    pub const RELEASE: EventId = 4;
    /// A `moving` notification was cancelled
    pub const CANCEL: EventId = 5;
    /// Settle animation finished (or none was needed)
    pub const SETTLED: EventId = 6;
}

/// Gesture lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pressed, direction not yet decided
    Arming,
    /// Following the pointer vertically
    Dragging,
    /// Released, snapping to a panel
    Settling,
}

impl StateTransitions for GestureState {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use gesture_events::*;

        match (self, event) {
            // A press pre-empts an in-flight settle
            (GestureState::Idle, ARM) | (GestureState::Settling, ARM) => {
                Some(GestureState::Arming)
            }

            (GestureState::Arming, COMMIT) => Some(GestureState::Dragging),
            (GestureState::Arming, PASS_THROUGH) => Some(GestureState::Idle),
            (GestureState::Arming, RELEASE) => Some(GestureState::Idle),

            (GestureState::Dragging, RELEASE) => Some(GestureState::Settling),
            (GestureState::Dragging, CANCEL) => Some(GestureState::Settling),

            (GestureState::Settling, SETTLED) => Some(GestureState::Idle),

            _ => None,
        }
    }
}

/// Pointer bookkeeping for one press/release sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Only events of this modality are honoured until release
    pub modality: Modality,
    pub start: PagePoint,
    /// Position of the previous sample
    pub last: PagePoint,
    pub direction: Direction,
    /// Vertical threshold crossed
    pub committed: bool,
    /// Cleared on pass-through and cancel; later samples are ignored
    pub scrolling: bool,
}

impl GestureSession {
    fn new(modality: Modality, position: PagePoint) -> Self {
        Self {
            modality,
            start: position,
            last: position,
            direction: Direction::None,
            committed: false,
            scrolling: true,
        }
    }
}

/// One movement step of a committed drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    /// Movement since the previous sample
    pub delta: f32,
    pub direction: Direction,
    /// Offset to apply if the step is not cancelled
    pub offset: f32,
}

/// What a move sample means for the widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// No active session for this modality, or a platform gesture is running
    Ignored,
    /// Still below both thresholds
    Pending,
    /// Vertical threshold crossed on this sample; the drag starts with the next
    Committed,
    /// Horizontal threshold crossed; the platform keeps the gesture
    PassThrough,
    Drag(DragStep),
}

/// What a release means for the widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// No session for this modality
    Ignored,
    /// Session ended without a drag to settle
    Inert,
    /// Snap according to the last movement direction
    Settle { direction: Direction },
}

/// Clicks are swallowed from drag commit until shortly after release
#[derive(Debug, Clone, Copy, Default)]
struct ClickGuard {
    engaged: bool,
    expires_at_ms: Option<f64>,
}

impl ClickGuard {
    fn engage(&mut self) {
        self.engaged = true;
        self.expires_at_ms = None;
    }

    fn release_at(&mut self, now_ms: f64) {
        if self.engaged {
            self.expires_at_ms = Some(now_ms + CLICK_SUPPRESS_MS);
        }
    }

    fn expire(&mut self, now_ms: f64) {
        if matches!(self.expires_at_ms, Some(at) if now_ms >= at) {
            *self = Self::default();
        }
    }
}

/// Round half toward positive infinity
pub fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// Damped offset while the pointer is beyond either end
pub fn rubber_band(current_offset: f32, total_delta: f32) -> f32 {
    round_half_up(current_offset + total_delta / RUBBER_BAND_DIVISOR)
}

/// Panel to settle on, rounding toward the direction of travel
pub fn target_point(offset: f32, distance: f32, direction: Direction, max_point: usize) -> usize {
    if distance <= 0.0 {
        return 0;
    }
    let raw = -offset / distance;
    let rounded = match direction {
        Direction::Forward => raw.ceil(),
        Direction::Backward => raw.floor(),
        Direction::None => round_half_up(raw),
    };
    if !(rounded > 0.0) {
        return 0;
    }
    (rounded as usize).min(max_point)
}

/// Gesture recognizer
#[derive(Debug, Default)]
pub struct GestureMachine {
    state: StateCell<GestureState>,
    session: Option<GestureSession>,
    click_guard: ClickGuard,
    platform_gesture: bool,
    animation: Option<AnimationToken>,
}

impl GestureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state.current()
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Start a session. Returns false when the press is rejected.
    pub fn arm(&mut self, modality: Modality, position: PagePoint, disable_touch: bool) -> bool {
        if disable_touch || self.platform_gesture || self.session.is_some() {
            return false;
        }
        if self.state.send(gesture_events::ARM).is_none() {
            return false;
        }
        self.session = Some(GestureSession::new(modality, position));
        true
    }

    /// Classify a move sample
    pub fn sample(
        &mut self,
        modality: Modality,
        position: PagePoint,
        current_offset: f32,
        range: OffsetRange,
    ) -> Sample {
        if self.platform_gesture {
            return Sample::Ignored;
        }
        let Some(session) = self.session.as_mut() else {
            return Sample::Ignored;
        };
        if session.modality != modality || !session.scrolling {
            return Sample::Ignored;
        }

        let sample = if session.committed {
            let step = position.y - session.last.y;
            let raw = current_offset + step;
            let offset = if range.is_overscroll(raw) {
                rubber_band(current_offset, position.y - session.start.y)
            } else {
                raw
            };
            session.direction = Direction::from_step(step, session.direction);
            Sample::Drag(DragStep {
                delta: step,
                direction: session.direction,
                offset,
            })
        } else {
            // Vertical wins when both axes cross on the same sample
            let dx = (position.x - session.start.x).abs();
            let dy = (position.y - session.start.y).abs();
            if dy > DRAG_THRESHOLD {
                session.committed = true;
                Sample::Committed
            } else if dx > DRAG_THRESHOLD {
                session.scrolling = false;
                Sample::PassThrough
            } else {
                Sample::Pending
            }
        };
        session.last = position;

        match sample {
            Sample::Committed => {
                self.state.send(gesture_events::COMMIT);
                self.click_guard.engage();
            }
            Sample::PassThrough => {
                self.state.send(gesture_events::PASS_THROUGH);
            }
            _ => {}
        }
        sample
    }

    /// A `moving` notification was cancelled: stop following the pointer.
    /// The session stays held until release.
    pub fn cancel_drag(&mut self, point: usize, now_ms: f64) -> SettleOutcome {
        if let Some(session) = self.session.as_mut() {
            session.scrolling = false;
            session.committed = false;
        }
        self.state.send(gesture_events::CANCEL);
        self.state.send(gesture_events::SETTLED);
        self.click_guard.release_at(now_ms);
        SettleOutcome::cancelled(point)
    }

    /// End the session for `modality`
    pub fn release(&mut self, modality: Modality, now_ms: f64) -> Release {
        match self.session {
            Some(session) if session.modality == modality => {}
            _ => return Release::Ignored,
        }
        let Some(session) = self.session.take() else {
            return Release::Ignored;
        };

        if session.scrolling && session.committed {
            self.state.send(gesture_events::RELEASE);
            self.click_guard.release_at(now_ms);
            Release::Settle {
                direction: session.direction,
            }
        } else {
            self.state.send(gesture_events::RELEASE);
            Release::Inert
        }
    }

    /// Settle animation finished
    pub fn finish_settle(&mut self) {
        if self.state.is_in(GestureState::Settling) {
            self.state.send(gesture_events::SETTLED);
        }
    }

    /// Whether a click arriving now should be swallowed
    pub fn swallows_click(&self) -> bool {
        self.click_guard.engaged
    }

    pub fn expire_click_guard(&mut self, now_ms: f64) {
        self.click_guard.expire(now_ms);
    }

    pub fn set_platform_gesture(&mut self, active: bool) {
        self.platform_gesture = active;
    }

    pub fn platform_gesture(&self) -> bool {
        self.platform_gesture
    }

    /// In-flight offset animation, if any
    pub fn animation(&self) -> Option<AnimationToken> {
        self.animation
    }

    pub fn take_animation(&mut self) -> Option<AnimationToken> {
        self.animation.take()
    }

    pub(crate) fn animation_slot(&mut self) -> &mut Option<AnimationToken> {
        &mut self.animation
    }

    /// Drop all gesture state; returns the animation to cancel
    pub fn reset(&mut self) -> Option<AnimationToken> {
        self.session = None;
        self.click_guard = ClickGuard::default();
        self.platform_gesture = false;
        self.state.reset(GestureState::Idle);
        self.animation.take()
    }
}
