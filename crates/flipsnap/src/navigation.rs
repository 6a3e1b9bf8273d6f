//! Programmatic navigation
//!
//! [`Navigator`] borrows the widget's parts for the duration of one call.
//! It is what notification handlers receive as `&mut dyn Navigate`, and the
//! widget's own navigation methods go through it as well, so both paths
//! share clamping, rendering and `point-changed` semantics.

use flipsnap_core::{Navigate, Notification};
use flipsnap_platform::{AnimationToken, Element, RenderingAdapter};
use tracing::debug;

use crate::config::SnapConfig;
use crate::layout::Layout;

/// Panel position of a widget
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub point: usize,
    /// Applied vertical offset (`<= 0` at rest)
    pub offset: f32,
}

/// Borrowed navigation context
pub struct Navigator<'a> {
    pub(crate) element: &'a dyn Element,
    pub(crate) config: &'a SnapConfig,
    pub(crate) layout: &'a mut Layout,
    pub(crate) position: &'a mut Position,
    pub(crate) adapter: &'a mut dyn RenderingAdapter,
    pub(crate) animation: &'a mut Option<AnimationToken>,
    /// Notifications raised during the call, delivered by the widget afterwards
    pub(crate) pending: &'a mut Vec<Notification>,
    pub(crate) now_ms: f64,
}

impl Navigate for Navigator<'_> {
    fn current_point(&self) -> usize {
        self.position.point
    }

    fn max_point(&self) -> usize {
        self.layout.max_point
    }

    fn move_to_point(&mut self, point: Option<i64>, duration_ms: Option<u32>) {
        let previous = self.position.point;
        let target = match point {
            Some(point) => self.layout.clamp_point(point),
            None => previous.min(self.layout.max_point),
        };
        let duration_ms = duration_ms.unwrap_or(self.config.transition_duration);

        self.position.point = target;
        self.position.offset = self.layout.offset_for(target);
        *self.animation = self
            .adapter
            .set_offset(self.position.offset, duration_ms, self.now_ms);

        debug!(
            previous,
            current = target,
            offset = self.position.offset,
            duration_ms,
            "move to point"
        );

        if previous != target {
            self.pending.push(Notification::PointChanged {
                previous,
                current: target,
            });
        }
    }

    fn refresh(&mut self) {
        *self.layout = Layout::measure(self.element, self.config);
        debug!(
            max_point = self.layout.max_point,
            distance = self.layout.distance,
            "re-measured layout"
        );
        self.move_to_point(None, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipsnap_platform::headless::{HeadlessElement, HeadlessProbe};
    use flipsnap_platform::{Capabilities, PositionAdapter, TransformAdapter};

    struct Parts {
        element: HeadlessElement,
        config: SnapConfig,
        layout: Layout,
        position: Position,
        animation: Option<AnimationToken>,
        pending: Vec<Notification>,
    }

    impl Parts {
        fn new(children: usize) -> Self {
            let element =
                HeadlessElement::new(HeadlessProbe::legacy(), children, children as f32 * 100.0);
            let config = SnapConfig::default();
            let layout = Layout::measure(&element, &config);
            Self {
                element,
                config,
                layout,
                position: Position::default(),
                animation: None,
                pending: Vec::new(),
            }
        }

        fn navigator<'a>(&'a mut self, adapter: &'a mut dyn RenderingAdapter) -> Navigator<'a> {
            Navigator {
                element: &self.element,
                config: &self.config,
                layout: &mut self.layout,
                position: &mut self.position,
                adapter,
                animation: &mut self.animation,
                pending: &mut self.pending,
                now_ms: 0.0,
            }
        }
    }

    fn transform_adapter() -> TransformAdapter {
        let element = std::rc::Rc::new(HeadlessElement::new(HeadlessProbe::standard(), 4, 400.0));
        let caps = Capabilities::detect(element.as_ref());
        let props = caps.transform_properties().cloned().unwrap();
        TransformAdapter::new(element, props, true)
    }

    #[test]
    fn test_move_clamps_and_notifies() {
        let mut parts = Parts::new(4);
        let mut adapter = transform_adapter();
        {
            let mut nav = parts.navigator(&mut adapter);
            nav.move_to_point(Some(9), None);
            assert_eq!(nav.current_point(), 3);
            assert!(!nav.has_next());
        }
        assert_eq!(parts.position.offset, -300.0);
        assert!(parts.animation.is_some());
        assert_eq!(
            parts.pending,
            vec![Notification::PointChanged {
                previous: 0,
                current: 3
            }]
        );
    }

    #[test]
    fn test_same_point_re_anchors_silently() {
        let mut parts = Parts::new(4);
        let mut adapter = transform_adapter();
        {
            let mut nav = parts.navigator(&mut adapter);
            nav.move_to_point(Some(-4), Some(0));
            nav.to_prev(None);
        }
        assert_eq!(parts.position, Position { point: 0, offset: 0.0 });
        assert!(parts.pending.is_empty());
    }

    #[test]
    fn test_refresh_shrinks_layout() {
        let mut parts = Parts::new(4);
        let element = std::rc::Rc::new(HeadlessElement::new(HeadlessProbe::legacy(), 4, 400.0));
        let mut adapter = PositionAdapter::new(element);
        {
            let mut nav = parts.navigator(&mut adapter);
            nav.move_to_point(Some(3), Some(0));
        }
        parts.element.set_children(2);
        parts.element.set_scroll_height(400.0);
        {
            let mut nav = parts.navigator(&mut adapter);
            nav.refresh();
        }
        assert_eq!(parts.layout.max_point, 1);
        assert_eq!(parts.layout.distance, 200.0);
        assert_eq!(parts.position, Position { point: 1, offset: -200.0 });
        assert_eq!(
            parts.pending.last(),
            Some(&Notification::PointChanged {
                previous: 3,
                current: 1
            })
        );
    }
}
