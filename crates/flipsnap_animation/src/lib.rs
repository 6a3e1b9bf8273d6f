//! flipsnap animation
//!
//! Timed offset animation for hosts without composited transitions.
//!
//! # Features
//!
//! - **Easing**: CSS-compatible curves, including the snap curve
//! - **Tweens**: pure functions of elapsed time, no captured loop state
//! - **Scheduler**: slotmap-keyed tweens whose ids double as cancellation
//!   tokens, stepped at a fixed frame interval

pub mod easing;
pub mod scheduler;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{AnimationScheduler, TweenFrame, TweenId, FRAME_INTERVAL_MS};
pub use tween::{Tween, TweenSample};
