//! Input events and widget notifications
//!
//! Input arrives as [`InputEvent`] values produced by a thin per-platform
//! adapter (touch, mouse and pointer APIs all map onto the same variants).
//! Output leaves as [`SnapEvent`]s wrapping a [`Notification`].

use std::fmt;

/// The input mechanism generating a pointer stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Touch,
    Mouse,
    /// Platform pointer events (pen and unified pointer APIs)
    Pointer,
}

impl Modality {
    /// All modalities, in the order start handlers are attached
    pub const ALL: [Modality; 3] = [Modality::Touch, Modality::Mouse, Modality::Pointer];

    pub fn name(&self) -> &'static str {
        match self {
            Modality::Touch => "touch",
            Modality::Mouse => "mouse",
            Modality::Pointer => "pointer",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Page coordinates of a pointer sample
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PagePoint {
    pub x: f32,
    pub y: f32,
}

impl PagePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A raw input event delivered to the widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown {
        modality: Modality,
        position: PagePoint,
        timestamp_ms: f64,
    },
    PointerMove {
        modality: Modality,
        position: PagePoint,
        timestamp_ms: f64,
    },
    PointerUp {
        modality: Modality,
        position: PagePoint,
        timestamp_ms: f64,
    },
    /// Click on the container (possibly synthesized after a touch release)
    Click { timestamp_ms: f64 },
    /// Platform multi-finger gesture began
    GestureStart,
    /// Platform multi-finger gesture ended
    GestureEnd,
    /// The composited transition on the container finished
    TransitionEnd,
}

impl InputEvent {
    pub fn pointer_down(modality: Modality, x: f32, y: f32, timestamp_ms: f64) -> Self {
        InputEvent::PointerDown {
            modality,
            position: PagePoint::new(x, y),
            timestamp_ms,
        }
    }

    pub fn pointer_move(modality: Modality, x: f32, y: f32, timestamp_ms: f64) -> Self {
        InputEvent::PointerMove {
            modality,
            position: PagePoint::new(x, y),
            timestamp_ms,
        }
    }

    pub fn pointer_up(modality: Modality, x: f32, y: f32, timestamp_ms: f64) -> Self {
        InputEvent::PointerUp {
            modality,
            position: PagePoint::new(x, y),
            timestamp_ms,
        }
    }

    /// Timestamp carried by the event, if any
    pub fn timestamp_ms(&self) -> Option<f64> {
        match self {
            InputEvent::PointerDown { timestamp_ms, .. }
            | InputEvent::PointerMove { timestamp_ms, .. }
            | InputEvent::PointerUp { timestamp_ms, .. }
            | InputEvent::Click { timestamp_ms } => Some(*timestamp_ms),
            InputEvent::GestureStart | InputEvent::GestureEnd | InputEvent::TransitionEnd => None,
        }
    }

    /// Modality of a pointer event
    pub fn modality(&self) -> Option<Modality> {
        match self {
            InputEvent::PointerDown { modality, .. }
            | InputEvent::PointerMove { modality, .. }
            | InputEvent::PointerUp { modality, .. } => Some(*modality),
            _ => None,
        }
    }
}

/// What the host must do with the platform event after the widget saw it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventDisposition {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl EventDisposition {
    /// Leave the platform event alone
    pub const NONE: EventDisposition = EventDisposition {
        prevent_default: false,
        stop_propagation: false,
    };

    /// Prevent the default action only
    pub const PREVENT: EventDisposition = EventDisposition {
        prevent_default: true,
        stop_propagation: false,
    };

    /// Prevent the default action and stop propagation
    pub const SWALLOW: EventDisposition = EventDisposition {
        prevent_default: true,
        stop_propagation: true,
    };

    pub fn is_none(&self) -> bool {
        !self.prevent_default && !self.stop_propagation
    }
}

/// Direction of travel through the panels
///
/// `Forward` means the offset is decreasing (moving toward higher panel
/// indices, finger travelling up); `Backward` means the offset is increasing
/// toward 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    Backward,
    #[default]
    None,
    Forward,
}

impl Direction {
    /// Direction implied by a per-sample page delta.
    ///
    /// A zero delta keeps `previous`: some platforms emit a trailing
    /// zero-delta move right before release.
    pub fn from_step(step: f32, previous: Direction) -> Direction {
        if step > 0.0 {
            Direction::Backward
        } else if step < 0.0 {
            Direction::Forward
        } else {
            previous
        }
    }

    pub fn signum(&self) -> i8 {
        match self {
            Direction::Backward => -1,
            Direction::None => 0,
            Direction::Forward => 1,
        }
    }
}

/// Kind of notification, used as the subscription key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    DragArmed,
    Moving,
    Settled,
    PointChanged,
}

impl NotificationKind {
    pub fn name(&self) -> &'static str {
        match self {
            NotificationKind::DragArmed => "drag-armed",
            NotificationKind::Moving => "moving",
            NotificationKind::Settled => "settled",
            NotificationKind::PointChanged => "point-changed",
        }
    }

    /// Only `moving` can be cancelled by a subscriber
    pub fn is_cancelable(&self) -> bool {
        matches!(self, NotificationKind::Moving)
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a released or cancelled drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleOutcome {
    /// Whether the committed panel differs from the one the drag started on
    pub moved: bool,
    pub original_point: usize,
    pub new_point: usize,
    /// The drag was aborted by a subscriber cancelling `moving`
    pub cancelled: bool,
}

impl SettleOutcome {
    pub fn committed(original_point: usize, new_point: usize) -> Self {
        Self {
            moved: new_point != original_point,
            original_point,
            new_point,
            cancelled: false,
        }
    }

    pub fn cancelled(point: usize) -> Self {
        Self {
            moved: false,
            original_point: point,
            new_point: point,
            cancelled: true,
        }
    }
}

/// Notification payloads published by the widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    /// A pointer went down and a gesture session was armed
    DragArmed,
    /// A drag sample is about to be applied
    Moving { delta: f32, direction: Direction },
    /// A drag was released or cancelled
    Settled(SettleOutcome),
    /// The current panel changed
    PointChanged { previous: usize, current: usize },
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::DragArmed => NotificationKind::DragArmed,
            Notification::Moving { .. } => NotificationKind::Moving,
            Notification::Settled(_) => NotificationKind::Settled,
            Notification::PointChanged { .. } => NotificationKind::PointChanged,
        }
    }
}

/// A notification in flight, with DOM-like cancel and propagation flags
#[derive(Debug, Clone)]
pub struct SnapEvent {
    notification: Notification,
    bubbles: bool,
    cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl SnapEvent {
    pub fn new(notification: Notification) -> Self {
        Self {
            cancelable: notification.kind().is_cancelable(),
            notification,
            bubbles: true,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn kind(&self) -> NotificationKind {
        self.notification.kind()
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Cancel the event. Has no effect on non-cancelable notifications.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Skip the remaining subscribers for this notification
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
