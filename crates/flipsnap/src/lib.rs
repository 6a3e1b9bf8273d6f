//! Flipsnap
//!
//! Vertical snap-scrolling for a container of equal-height panels. The
//! container follows a vertical drag (with damped overscroll past either
//! end) and, on release, snaps to a panel chosen by the drag direction.
//! Panels can also be navigated programmatically.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use flipsnap::prelude::*;
//! use flipsnap_platform::headless::{HeadlessElement, HeadlessProbe};
//!
//! let element = Rc::new(HeadlessElement::new(HeadlessProbe::standard(), 4, 400.0));
//! let capabilities = Capabilities::detect(element.as_ref());
//! let mut widget =
//!     SnapWidget::with_capabilities(element, SnapConfig::default(), &capabilities).unwrap();
//!
//! widget.on(NotificationKind::PointChanged, |event, _nav| {
//!     if let Notification::PointChanged { current, .. } = event.notification() {
//!         println!("now showing panel {current}");
//!     }
//! });
//!
//! widget.to_next(None);
//! assert_eq!(widget.current_point(), 1);
//! assert_eq!(widget.current_offset(), -100.0);
//! ```

pub mod config;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod navigation;
pub mod widget;

pub use config::{
    SnapConfig, CLICK_SUPPRESS_MS, DEFAULT_TRANSITION_DURATION_MS, DRAG_THRESHOLD,
    RUBBER_BAND_DIVISOR,
};
pub use error::{Error, Result};
pub use gesture::{GestureMachine, GestureSession, GestureState};
pub use layout::{Layout, OffsetRange};
pub use navigation::Navigator;
pub use widget::SnapWidget;

pub use flipsnap_core::{
    Direction, EventDisposition, InputEvent, ListenerId, Modality, Navigate, Notification,
    NotificationKind, PagePoint, SettleOutcome, SnapEvent,
};
pub use flipsnap_platform::{AdapterKind, Capabilities, ContainerRef, Document, Element};

/// Common imports
pub mod prelude {
    pub use crate::{
        Capabilities, ContainerRef, Direction, EventDisposition, InputEvent, Modality, Navigate,
        Notification, NotificationKind, SettleOutcome, SnapConfig, SnapEvent, SnapWidget,
    };
}
