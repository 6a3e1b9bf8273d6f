//! Easing functions for offset animation

/// Easing function type
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// `-(t) * (t - 2)`: the fallback settle curve
    EaseOutQuad,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// The deceleration curve used for composited snap transitions
    pub const SNAP: Easing = Easing::CubicBezier(0.0, 0.0, 0.25, 1.0);

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::EaseOutQuad => -t * (t - 2.0),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }

    /// CSS `transition-timing-function` value for this curve
    pub fn to_css(&self) -> String {
        match self {
            Easing::EaseOutQuad => css_bezier(0.25, 0.46, 0.45, 0.94),
            Easing::CubicBezier(x1, y1, x2, y2) => css_bezier(*x1, *y1, *x2, *y2),
        }
    }
}

fn css_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> String {
    format!("cubic-bezier({x1},{y1},{x2},{y2})")
}

/// Cubic bezier easing (matches browser implementations).
///
/// Newton-Raphson with a bisection fallback, computed in f64.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³, in Horner form
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [Easing::EaseOutQuad, Easing::SNAP] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_ease_out_quad_matches_fallback_curve() {
        // -(t/d)*(t/d - 2) at the halfway point
        assert!((Easing::EaseOutQuad.apply(0.5) - 0.75).abs() < 1e-6);
        assert!((Easing::EaseOutQuad.apply(0.25) - 0.4375).abs() < 1e-6);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(Easing::EaseOutQuad.apply(1.5), 1.0);
        assert_eq!(Easing::SNAP.apply(-0.5), 0.0);
    }

    #[test]
    fn test_snap_curve_decelerates() {
        let early = Easing::SNAP.apply(0.2);
        let late = Easing::SNAP.apply(0.8);
        assert!(early > 0.2);
        assert!(late > 0.8);
        assert!(Easing::SNAP.apply(0.5) < Easing::SNAP.apply(0.6));
    }

    #[test]
    fn test_css_value() {
        assert_eq!(Easing::SNAP.to_css(), "cubic-bezier(0,0,0.25,1)");
        assert_eq!(
            Easing::EaseOutQuad.to_css(),
            "cubic-bezier(0.25,0.46,0.45,0.94)"
        );
    }
}
