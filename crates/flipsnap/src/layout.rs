//! Layout model
//!
//! Panel count, panel step and valid offset range, derived from container
//! measurements or explicit overrides. Offsets are `<= 0` and grow more
//! negative as the panel index increases.

use flipsnap_platform::Element;

use crate::config::SnapConfig;

/// Valid offset interval `[max, min]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetRange {
    /// Offset of the first panel (always 0)
    pub min: f32,
    /// Offset of the last panel
    pub max: f32,
}

impl OffsetRange {
    pub fn contains(&self, offset: f32) -> bool {
        offset <= self.min && offset >= self.max
    }

    /// Whether `offset` lies past either end
    pub fn is_overscroll(&self, offset: f32) -> bool {
        offset > self.min || offset < self.max
    }
}

/// Last panel index: the override, else element children - 1 (never negative)
pub fn compute_max_point(child_count: usize, max_point_override: Option<usize>) -> usize {
    max_point_override.unwrap_or_else(|| child_count.saturating_sub(1))
}

/// Panel step: the override, else the scroll extent split evenly
pub fn compute_distance(
    scroll_extent: f32,
    max_point: usize,
    distance_override: Option<f32>,
) -> f32 {
    distance_override.unwrap_or_else(|| scroll_extent / (max_point as f32 + 1.0))
}

pub fn compute_offset_range(distance: f32, max_point: usize) -> OffsetRange {
    OffsetRange {
        min: 0.0,
        max: -distance * max_point as f32,
    }
}

/// Measured layout of a snap container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub max_point: usize,
    pub distance: f32,
    pub range: OffsetRange,
}

impl Layout {
    pub fn new(max_point: usize, distance: f32) -> Self {
        Self {
            max_point,
            distance,
            range: compute_offset_range(distance, max_point),
        }
    }

    /// Measure `element`, honouring the config overrides
    pub fn measure(element: &dyn Element, config: &SnapConfig) -> Self {
        let max_point = compute_max_point(element.child_element_count(), config.max_point);
        let distance = compute_distance(element.scroll_height(), max_point, config.distance);
        Self::new(max_point, distance)
    }

    /// Clamp a requested panel index into `[0, max_point]`
    pub fn clamp_point(&self, point: i64) -> usize {
        point.clamp(0, self.max_point as i64) as usize
    }

    /// Resting offset of a panel
    pub fn offset_for(&self, point: usize) -> f32 {
        -(point as f32) * self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipsnap_platform::headless::{HeadlessElement, HeadlessProbe};

    #[test]
    fn test_max_point_from_children() {
        assert_eq!(compute_max_point(4, None), 3);
        assert_eq!(compute_max_point(1, None), 0);
        assert_eq!(compute_max_point(0, None), 0);
        assert_eq!(compute_max_point(4, Some(7)), 7);
    }

    #[test]
    fn test_distance() {
        assert_eq!(compute_distance(400.0, 3, None), 100.0);
        assert_eq!(compute_distance(400.0, 0, None), 400.0);
        assert_eq!(compute_distance(400.0, 3, Some(250.0)), 250.0);
        assert_eq!(compute_distance(0.0, 0, None), 0.0);
    }

    #[test]
    fn test_offset_range() {
        let range = compute_offset_range(100.0, 3);
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, -300.0);
        assert!(range.contains(-150.0));
        assert!(range.contains(0.0));
        assert!(range.contains(-300.0));
        assert!(range.is_overscroll(1.0));
        assert!(range.is_overscroll(-301.0));
        assert!(!range.is_overscroll(0.0));
    }

    #[test]
    fn test_measure_element() {
        let element = HeadlessElement::new(HeadlessProbe::standard(), 5, 1000.0);
        let layout = Layout::measure(&element, &SnapConfig::default());
        assert_eq!(layout.max_point, 4);
        assert_eq!(layout.distance, 200.0);
        assert_eq!(layout.range.max, -800.0);

        let layout = Layout::measure(&element, &SnapConfig::new().with_max_point(1));
        assert_eq!(layout.max_point, 1);
        assert_eq!(layout.distance, 500.0);
    }

    #[test]
    fn test_clamp_and_offsets() {
        let layout = Layout::new(3, 100.0);
        assert_eq!(layout.clamp_point(-2), 0);
        assert_eq!(layout.clamp_point(2), 2);
        assert_eq!(layout.clamp_point(99), 3);
        assert_eq!(layout.offset_for(2), -200.0);
    }
}
