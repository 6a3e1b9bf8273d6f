//! Offset tweens indexed by elapsed time

use crate::easing::Easing;

/// A single animated value from `from` to `to`
///
/// A tween holds no loop state: its value is a pure function of the time
/// elapsed since `started_at_ms`, so any host timer can drive it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: u32,
    started_at_ms: f64,
}

/// Value of a tween at a point in time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSample {
    pub value: f32,
    pub finished: bool,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: u32, started_at_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            started_at_ms,
        }
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    pub fn to(&self) -> f32 {
        self.to
    }

    /// Sample the tween. The end value is reported once the elapsed time
    /// exceeds the duration.
    pub fn sample(&self, now_ms: f64) -> TweenSample {
        let elapsed = (now_ms - self.started_at_ms).max(0.0);
        let duration = self.duration_ms as f64;
        if elapsed > duration || self.duration_ms == 0 {
            return TweenSample {
                value: self.to,
                finished: true,
            };
        }
        let progress = Easing::EaseOutQuad.apply((elapsed / duration) as f32);
        TweenSample {
            value: progress * (self.to - self.from) + self.from,
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_progress() {
        let tween = Tween::new(0.0, -400.0, 400, 1000.0);

        let start = tween.sample(1000.0);
        assert_eq!(start.value, 0.0);
        assert!(!start.finished);

        // Ease-out quad is 0.75 of the way at half time
        let half = tween.sample(1200.0);
        assert!((half.value - -300.0).abs() < 1e-3);
        assert!(!half.finished);

        // Exactly at the duration is still in flight
        let edge = tween.sample(1400.0);
        assert!((edge.value - -400.0).abs() < 1e-3);
        assert!(!edge.finished);

        let done = tween.sample(1401.0);
        assert_eq!(done.value, -400.0);
        assert!(done.finished);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let tween = Tween::new(-100.0, -200.0, 0, 0.0);
        let sample = tween.sample(0.0);
        assert_eq!(sample.value, -200.0);
        assert!(sample.finished);
    }

    #[test]
    fn test_clock_before_start_holds_origin() {
        let tween = Tween::new(10.0, 20.0, 100, 50.0);
        assert_eq!(tween.sample(0.0).value, 10.0);
        assert!((tween.sample(100.0).value - 17.5).abs() < 1e-4);
    }
}
