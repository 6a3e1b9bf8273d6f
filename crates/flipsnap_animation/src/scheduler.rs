//! Animation scheduler
//!
//! Owns the active tweens and steps them at a fixed frame interval. The
//! [`TweenId`] returned by [`AnimationScheduler::start`] is the cancellation
//! token for that tween.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::tween::Tween;

new_key_type! {
    pub struct TweenId;
}

/// Fallback loop period (~100Hz)
pub const FRAME_INTERVAL_MS: f64 = 10.0;

/// A value produced by one scheduler step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenFrame {
    pub id: TweenId,
    pub value: f32,
    pub finished: bool,
}

/// The animation scheduler that ticks all active tweens
pub struct AnimationScheduler {
    tweens: SlotMap<TweenId, Tween>,
    last_frame_ms: Option<f64>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
            last_frame_ms: None,
        }
    }

    pub fn start(&mut self, tween: Tween) -> TweenId {
        let id = self.tweens.insert(tween);
        tracing::trace!(?id, from = tween.from(), to = tween.to(), "tween started");
        id
    }

    /// Cancel a tween. Returns the tween if it was still running.
    pub fn cancel(&mut self, id: TweenId) -> Option<Tween> {
        let tween = self.tweens.remove(id);
        if tween.is_some() {
            tracing::trace!(?id, "tween cancelled");
        }
        tween
    }

    fn is_frame_due(&self, now_ms: f64) -> bool {
        match self.last_frame_ms {
            Some(last) => now_ms - last >= FRAME_INTERVAL_MS,
            None => true,
        }
    }

    /// Step all tweens if a frame is due. Finished tweens are removed after
    /// reporting their final value.
    pub fn tick(&mut self, now_ms: f64) -> SmallVec<[TweenFrame; 2]> {
        let mut frames = SmallVec::new();
        if self.tweens.is_empty() || !self.is_frame_due(now_ms) {
            return frames;
        }
        self.last_frame_ms = Some(now_ms);

        for (id, tween) in self.tweens.iter() {
            let sample = tween.sample(now_ms);
            frames.push(TweenFrame {
                id,
                value: sample.value,
                finished: sample.finished,
            });
        }
        for frame in frames.iter().filter(|f| f.finished) {
            self.tweens.remove(frame.id);
        }
        frames
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_reports_and_retires() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.start(Tween::new(0.0, -100.0, 100, 0.0));

        let frames = scheduler.tick(50.0);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].id, id);
        assert!(!frames[0].finished);
        assert!(frames[0].value < 0.0 && frames[0].value > -100.0);

        let frames = scheduler.tick(150.0);
        assert_eq!(frames[0].value, -100.0);
        assert!(frames[0].finished);
        assert!(scheduler.cancel(id).is_none());
        assert!(scheduler.tick(300.0).is_empty());
    }

    #[test]
    fn test_frame_interval_gates_ticks() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.start(Tween::new(0.0, 10.0, 1000, 0.0));

        assert_eq!(scheduler.tick(0.0).len(), 1);
        assert!(scheduler.tick(4.0).is_empty());
        assert_eq!(scheduler.tick(10.0).len(), 1);
    }

    #[test]
    fn test_cancel_token() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.start(Tween::new(0.0, 10.0, 1000, 0.0));

        assert!(scheduler.cancel(id).is_some());
        assert!(scheduler.cancel(id).is_none());
        assert!(scheduler.tick(20.0).is_empty());
    }
}
