//! flipsnap core
//!
//! Platform-neutral primitives shared by the snap-scrolling widget:
//!
//! - **Input Events**: a tagged variant over pointer, click and platform
//!   gesture events, carrying modality, page coordinates and timestamps
//! - **Notifications**: the events the widget publishes to the host, with
//!   cancellation for `moving`
//! - **Dispatch**: a listener registry that hands each handler a
//!   [`Navigate`] context so handlers can drive the widget re-entrantly
//! - **State Transitions**: enum-based state machines with history
//!
//! # Example
//!
//! ```rust
//! use flipsnap_core::{Direction, Notification, SnapEvent};
//!
//! let mut event = SnapEvent::new(Notification::Moving {
//!     delta: -12.0,
//!     direction: Direction::Forward,
//! });
//! event.prevent_default();
//! assert!(event.default_prevented());
//! ```

pub mod dispatch;
pub mod events;
pub mod fsm;

pub use dispatch::{EventDispatcher, ListenerId, Navigate, NotificationHandler};
pub use events::{
    Direction, EventDisposition, InputEvent, Modality, Notification, NotificationKind, PagePoint,
    SettleOutcome, SnapEvent,
};
pub use fsm::{EventId, StateCell, StateTransitions};
