//! Rendering adapters
//!
//! Two ways to put the panel container at a vertical offset:
//!
//! - [`TransformAdapter`]: composited `translate`/`translate3d` with a CSS
//!   transition. Completion arrives from the host as a transition-end event.
//! - [`PositionAdapter`]: `position: relative` plus `top`, animated by a tween
//!   stepped from [`RenderingAdapter::tick`].

use std::rc::Rc;

use flipsnap_animation::{AnimationScheduler, Easing, Tween, TweenId};

use crate::capabilities::{Capabilities, TransformProperties};
use crate::element::{parse_px, Element};

/// Which rendering path an adapter uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    Transform3d,
    Transform2d,
    Position,
}

/// Cancellation token for an in-flight offset animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationToken(TokenKind);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Transition(u64),
    Tween(TweenId),
}

/// Applies and reads the container's vertical offset
pub trait RenderingAdapter {
    fn kind(&self) -> AdapterKind;

    /// Move to `y`, animated over `duration_ms` (0 applies immediately).
    /// Returns a token while an animation is in flight.
    fn set_offset(&mut self, y: f32, duration_ms: u32, now_ms: f64) -> Option<AnimationToken>;

    /// Current visual offset
    fn offset(&self) -> f32;

    /// Stop transitions so following offsets apply immediately
    fn freeze(&mut self);

    /// Cancel an in-flight animation. Stale tokens are ignored.
    fn cancel(&mut self, token: AnimationToken);

    /// Advance timed animation; returns the token of an animation that
    /// finished during this step
    fn tick(&mut self, now_ms: f64) -> Option<AnimationToken>;

    /// The host reported the end of a composited transition
    fn transition_ended(&mut self) -> Option<AnimationToken>;

    fn is_animating(&self) -> bool;
}

/// Pick the adapter for the detected capabilities
pub fn select_adapter(
    element: Rc<dyn Element>,
    capabilities: &Capabilities,
    disable_3d: bool,
) -> Box<dyn RenderingAdapter> {
    match capabilities.transform_properties() {
        Some(properties) => {
            let use_3d = capabilities.transform3d && !disable_3d;
            Box::new(TransformAdapter::new(element, properties.clone(), use_3d))
        }
        None => Box::new(PositionAdapter::new(element)),
    }
}

// ============================================================================
// Transform path
// ============================================================================

/// Offsets via composited transform with a CSS transition
pub struct TransformAdapter {
    element: Rc<dyn Element>,
    properties: TransformProperties,
    use_3d: bool,
    offset: f32,
    generation: u64,
    in_flight: Option<AnimationToken>,
}

impl TransformAdapter {
    /// Create the adapter and install the base transition styles
    pub fn new(element: Rc<dyn Element>, properties: TransformProperties, use_3d: bool) -> Self {
        let adapter = Self {
            element,
            properties,
            use_3d,
            offset: 0.0,
            generation: 0,
            in_flight: None,
        };
        let props = &adapter.properties;
        adapter.element.set_style(
            &props.transition_property.style_name,
            &props.transform.css_name,
        );
        adapter.element.set_style(
            &props.transition_timing_function.style_name,
            &Easing::SNAP.to_css(),
        );
        adapter
            .element
            .set_style(&props.transition_duration.style_name, "0ms");
        adapter
            .element
            .set_style(&props.transform.style_name, &adapter.translate(0.0));
        adapter
    }

    fn translate(&self, y: f32) -> String {
        if self.use_3d {
            format!("translate3d(0,{y}px,0)")
        } else {
            format!("translate(0,{y}px)")
        }
    }

    fn set_duration(&self, duration_ms: u32) {
        self.element.set_style(
            &self.properties.transition_duration.style_name,
            &format!("{duration_ms}ms"),
        );
    }
}

impl RenderingAdapter for TransformAdapter {
    fn kind(&self) -> AdapterKind {
        if self.use_3d {
            AdapterKind::Transform3d
        } else {
            AdapterKind::Transform2d
        }
    }

    fn set_offset(&mut self, y: f32, duration_ms: u32, _now_ms: f64) -> Option<AnimationToken> {
        let previous = self.offset;
        self.set_duration(duration_ms);
        self.offset = y;
        self.element
            .set_style(&self.properties.transform.style_name, &self.translate(y));

        // No transition runs (and no transition-end arrives) when nothing changes
        self.in_flight = if duration_ms > 0 && previous != y {
            self.generation += 1;
            Some(AnimationToken(TokenKind::Transition(self.generation)))
        } else {
            None
        };
        tracing::trace!(y, duration_ms, animating = self.in_flight.is_some(), "transform offset");
        self.in_flight
    }

    fn offset(&self) -> f32 {
        self.offset
    }

    fn freeze(&mut self) {
        self.set_duration(0);
        self.in_flight = None;
    }

    fn cancel(&mut self, token: AnimationToken) {
        if self.in_flight == Some(token) {
            self.freeze();
        }
    }

    fn tick(&mut self, _now_ms: f64) -> Option<AnimationToken> {
        None
    }

    fn transition_ended(&mut self) -> Option<AnimationToken> {
        self.in_flight.take()
    }

    fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }
}

// ============================================================================
// Positional fallback
// ============================================================================

/// Offsets via `top`, animated with an ease-out tween
pub struct PositionAdapter {
    element: Rc<dyn Element>,
    scheduler: AnimationScheduler,
    in_flight: Option<TweenId>,
    target: f32,
}

impl PositionAdapter {
    /// Create the adapter and install relative positioning
    pub fn new(element: Rc<dyn Element>) -> Self {
        element.set_style("position", "relative");
        element.set_style("top", "0px");
        Self {
            element,
            scheduler: AnimationScheduler::new(),
            in_flight: None,
            target: 0.0,
        }
    }

    fn write_top(&self, y: f32) {
        self.element.set_style("top", &format!("{y}px"));
    }

    fn stop(&mut self) {
        if let Some(id) = self.in_flight.take() {
            self.scheduler.cancel(id);
        }
    }
}

impl RenderingAdapter for PositionAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Position
    }

    fn set_offset(&mut self, y: f32, duration_ms: u32, now_ms: f64) -> Option<AnimationToken> {
        self.stop();
        self.target = y;
        let from = self.offset();
        if duration_ms == 0 || from == y {
            self.write_top(y);
            return None;
        }
        let id = self.scheduler.start(Tween::new(from, y, duration_ms, now_ms));
        self.in_flight = Some(id);
        tracing::trace!(from, to = y, duration_ms, "positional tween");
        Some(AnimationToken(TokenKind::Tween(id)))
    }

    fn offset(&self) -> f32 {
        self.element
            .style("top")
            .as_deref()
            .and_then(parse_px)
            .unwrap_or(self.target)
    }

    fn freeze(&mut self) {
        self.stop();
    }

    fn cancel(&mut self, token: AnimationToken) {
        if let AnimationToken(TokenKind::Tween(id)) = token {
            if self.in_flight == Some(id) {
                self.stop();
            }
        }
    }

    fn tick(&mut self, now_ms: f64) -> Option<AnimationToken> {
        let id = self.in_flight?;
        let frames = self.scheduler.tick(now_ms);
        let frame = frames.iter().find(|frame| frame.id == id)?;
        self.write_top(frame.value);
        if frame.finished {
            self.in_flight = None;
            return Some(AnimationToken(TokenKind::Tween(id)));
        }
        None
    }

    fn transition_ended(&mut self) -> Option<AnimationToken> {
        None
    }

    fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }
}
