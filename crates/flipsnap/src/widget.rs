//! Snap widget
//!
//! Owns one panel container: its layout, current panel, rendering adapter,
//! gesture recognizer and subscribers. The host feeds it [`InputEvent`]s and
//! animation ticks; the widget answers each input with the
//! [`EventDisposition`] the host should apply to the platform event.

use std::collections::VecDeque;
use std::rc::Rc;

use flipsnap_core::{
    EventDispatcher, EventDisposition, InputEvent, ListenerId, Modality, Navigate,
    Notification, NotificationKind, PagePoint, SettleOutcome, SnapEvent,
};
use flipsnap_platform::{
    select_adapter, AdapterKind, AnimationToken, Capabilities, ContainerRef, Document, Element,
    RenderingAdapter,
};
use tracing::{debug, trace, warn};

use crate::config::SnapConfig;
use crate::error::Result;
use crate::gesture::{target_point, GestureMachine, GestureState, Release, Sample};
use crate::layout::{Layout, OffsetRange};
use crate::navigation::{Navigator, Position};

/// Vertical snap-scrolling controller for one container
pub struct SnapWidget {
    element: Rc<dyn Element>,
    config: SnapConfig,
    layout: Layout,
    position: Position,
    adapter: Box<dyn RenderingAdapter>,
    gesture: GestureMachine,
    dispatcher: EventDispatcher,
    /// The current press cancelled an offset animation
    interrupted_settle: bool,
    now_ms: f64,
    destroyed: bool,
}

impl SnapWidget {
    /// Bind to `element`, detecting capabilities once per process
    pub fn new(element: Rc<dyn Element>, config: SnapConfig) -> Result<Self> {
        let capabilities = Capabilities::global(element.as_ref());
        Self::with_capabilities(element, config, capabilities)
    }

    /// Bind to `element` with an explicit capability descriptor
    pub fn with_capabilities(
        element: Rc<dyn Element>,
        config: SnapConfig,
        capabilities: &Capabilities,
    ) -> Result<Self> {
        config.validate()?;

        if capabilities.pointer_events {
            if let Some(touch_action) = capabilities.touch_action() {
                element.set_style(&touch_action.style_name, "none");
            }
        }

        let adapter = select_adapter(element.clone(), capabilities, config.disable_3d);
        let layout = Layout::measure(element.as_ref(), &config);
        debug!(
            adapter = ?adapter.kind(),
            max_point = layout.max_point,
            distance = layout.distance,
            "snap widget created"
        );

        let mut widget = Self {
            element,
            config,
            layout,
            position: Position::default(),
            adapter,
            gesture: GestureMachine::new(),
            dispatcher: EventDispatcher::new(),
            interrupted_settle: false,
            now_ms: 0.0,
            destroyed: false,
        };
        widget.refresh();
        Ok(widget)
    }

    /// Resolve `container` in `document` and bind to it
    pub fn attach(
        document: &dyn Document,
        container: impl Into<ContainerRef>,
        config: SnapConfig,
    ) -> Result<Self> {
        let element = container.into().resolve(document)?;
        Self::new(element, config)
    }

    /// [`SnapWidget::attach`] with an explicit capability descriptor
    pub fn attach_with_capabilities(
        document: &dyn Document,
        container: impl Into<ContainerRef>,
        config: SnapConfig,
        capabilities: &Capabilities,
    ) -> Result<Self> {
        let element = container.into().resolve(document)?;
        Self::with_capabilities(element, config, capabilities)
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Subscribe to a notification kind
    pub fn on<F>(&mut self, kind: NotificationKind, handler: F) -> ListenerId
    where
        F: FnMut(&mut SnapEvent, &mut dyn Navigate) + 'static,
    {
        self.dispatcher.register(kind, handler)
    }

    /// Unsubscribe. Returns false if the listener was already removed.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.dispatcher.remove(id)
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Process one platform event
    pub fn handle(&mut self, event: InputEvent) -> EventDisposition {
        if self.destroyed {
            trace!(?event, "input after destroy ignored");
            return EventDisposition::NONE;
        }
        if let Some(timestamp_ms) = event.timestamp_ms() {
            self.now_ms = timestamp_ms;
        }
        self.gesture.expire_click_guard(self.now_ms);

        match event {
            InputEvent::PointerDown {
                modality, position, ..
            } => self.pointer_down(modality, position),
            InputEvent::PointerMove {
                modality, position, ..
            } => self.pointer_move(modality, position),
            InputEvent::PointerUp { modality, .. } => self.pointer_up(modality),
            InputEvent::Click { .. } => {
                if self.gesture.swallows_click() {
                    trace!("click after drag swallowed");
                    EventDisposition::SWALLOW
                } else {
                    EventDisposition::NONE
                }
            }
            InputEvent::GestureStart => {
                self.gesture.set_platform_gesture(true);
                EventDisposition::NONE
            }
            InputEvent::GestureEnd => {
                self.gesture.set_platform_gesture(false);
                EventDisposition::NONE
            }
            InputEvent::TransitionEnd => {
                if let Some(token) = self.adapter.transition_ended() {
                    self.animation_finished(token);
                }
                EventDisposition::NONE
            }
        }
    }

    /// Advance fallback animation and timers
    pub fn tick(&mut self, now_ms: f64) {
        if self.destroyed {
            return;
        }
        self.now_ms = now_ms;
        self.gesture.expire_click_guard(now_ms);
        if let Some(token) = self.adapter.tick(now_ms) {
            self.animation_finished(token);
        }
    }

    fn pointer_down(&mut self, modality: Modality, position: PagePoint) -> EventDisposition {
        if !self
            .gesture
            .arm(modality, position, self.config.disable_touch)
        {
            trace!(%modality, "press rejected");
            return EventDisposition::NONE;
        }

        self.interrupted_settle = match self.gesture.take_animation() {
            Some(token) => {
                self.adapter.cancel(token);
                true
            }
            None => false,
        };
        self.adapter.freeze();
        self.position.offset = self.adapter.offset();
        debug!(%modality, x = position.x, y = position.y, "drag armed");

        self.emit(Notification::DragArmed);

        // Keeps the platform from starting text selection or image drags
        if modality == Modality::Mouse {
            EventDisposition::PREVENT
        } else {
            EventDisposition::NONE
        }
    }

    fn pointer_move(&mut self, modality: Modality, position: PagePoint) -> EventDisposition {
        match self
            .gesture
            .sample(modality, position, self.position.offset, self.layout.range)
        {
            Sample::Ignored | Sample::Pending => EventDisposition::NONE,
            Sample::PassThrough => {
                debug!("horizontal movement, gesture left to the platform");
                self.resume_interrupted_settle();
                EventDisposition::NONE
            }
            Sample::Committed => {
                debug!("vertical drag committed");
                EventDisposition::SWALLOW
            }
            Sample::Drag(step) => {
                trace!(delta = step.delta, offset = step.offset, "drag step");
                let proceed = self.emit(Notification::Moving {
                    delta: step.delta,
                    direction: step.direction,
                });
                if proceed {
                    self.position.offset = step.offset;
                    self.adapter.set_offset(step.offset, 0, self.now_ms);
                } else {
                    debug!("moving cancelled by subscriber");
                    let outcome = self.gesture.cancel_drag(self.position.point, self.now_ms);
                    self.emit(Notification::Settled(outcome));
                }
                EventDisposition::SWALLOW
            }
        }
    }

    fn pointer_up(&mut self, modality: Modality) -> EventDisposition {
        let direction = match self.gesture.release(modality, self.now_ms) {
            Release::Ignored => return EventDisposition::NONE,
            Release::Inert => {
                self.resume_interrupted_settle();
                return EventDisposition::NONE;
            }
            Release::Settle { direction } => direction,
        };
        self.interrupted_settle = false;

        let original = self.position.point;
        let new_point = target_point(
            self.position.offset,
            self.layout.distance,
            direction,
            self.layout.max_point,
        );
        debug!(original, new_point, ?direction, "drag released");

        self.emit(Notification::Settled(SettleOutcome::committed(original, new_point)));
        self.navigate(|nav| nav.move_to_point(Some(new_point as i64), None));

        if self.gesture.animation().is_none() {
            self.gesture.finish_settle();
        }
        EventDisposition::NONE
    }

    /// Snap back to the current panel if this press stopped an animation
    /// short of it and never turned into a drag
    fn resume_interrupted_settle(&mut self) {
        if !std::mem::take(&mut self.interrupted_settle) {
            return;
        }
        if self.position.offset != self.layout.offset_for(self.position.point) {
            debug!(
                point = self.position.point,
                offset = self.position.offset,
                "resuming interrupted settle"
            );
            self.navigate(|nav| nav.move_to_point(None, None));
        }
    }

    fn animation_finished(&mut self, token: AnimationToken) {
        if self.gesture.animation() == Some(token) {
            self.gesture.take_animation();
            self.gesture.finish_settle();
            trace!("offset animation finished");
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Move to `point`, clamped to `[0, max_point]`
    pub fn move_to_point(&mut self, point: i64, duration_ms: Option<u32>) {
        if self.warn_if_destroyed("move_to_point") {
            return;
        }
        self.navigate(|nav| nav.move_to_point(Some(point), duration_ms));
    }

    pub fn to_next(&mut self, duration_ms: Option<u32>) {
        if self.warn_if_destroyed("to_next") {
            return;
        }
        self.navigate(|nav| nav.to_next(duration_ms));
    }

    pub fn to_prev(&mut self, duration_ms: Option<u32>) {
        if self.warn_if_destroyed("to_prev") {
            return;
        }
        self.navigate(|nav| nav.to_prev(duration_ms));
    }

    /// Re-measure the container and re-anchor at the current panel
    pub fn refresh(&mut self) {
        if self.warn_if_destroyed("refresh") {
            return;
        }
        self.navigate(|nav| nav.refresh());
    }

    pub fn has_next(&self) -> bool {
        self.position.point < self.layout.max_point
    }

    pub fn has_prev(&self) -> bool {
        self.position.point > 0
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn current_point(&self) -> usize {
        self.position.point
    }

    /// Applied offset; during a drag this follows the pointer
    pub fn current_offset(&self) -> f32 {
        self.position.offset
    }

    pub fn max_point(&self) -> usize {
        self.layout.max_point
    }

    pub fn distance(&self) -> f32 {
        self.layout.distance
    }

    pub fn offset_range(&self) -> OffsetRange {
        self.layout.range
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn adapter_kind(&self) -> AdapterKind {
        self.adapter.kind()
    }

    pub fn is_animating(&self) -> bool {
        self.adapter.is_animating()
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    pub fn element(&self) -> &Rc<dyn Element> {
        &self.element
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Stop responding to input. Subscribers are kept but never invoked again.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        if let Some(token) = self.gesture.reset() {
            self.adapter.cancel(token);
        }
        self.destroyed = true;
        debug!("snap widget destroyed");
    }

    fn warn_if_destroyed(&self, operation: &str) -> bool {
        if self.destroyed {
            warn!(operation, "navigation on a destroyed snap widget ignored");
        }
        self.destroyed
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Run `f` against a navigator, then deliver the notifications it raised
    fn navigate<R>(&mut self, f: impl FnOnce(&mut Navigator<'_>) -> R) -> R {
        let mut pending = Vec::new();
        let result = {
            let mut nav = Navigator {
                element: self.element.as_ref(),
                config: &self.config,
                layout: &mut self.layout,
                position: &mut self.position,
                adapter: self.adapter.as_mut(),
                animation: self.gesture.animation_slot(),
                pending: &mut pending,
                now_ms: self.now_ms,
            };
            f(&mut nav)
        };
        for notification in pending {
            self.emit(notification);
        }
        result
    }

    /// Notify subscribers, then the element. Notifications raised by
    /// handlers are delivered in order after the current one.
    ///
    /// Returns false when the first notification was cancelled.
    fn emit(&mut self, notification: Notification) -> bool {
        let mut queue = VecDeque::from([notification]);
        let mut proceed = None;

        while let Some(notification) = queue.pop_front() {
            let mut event = SnapEvent::new(notification);
            let mut pending = Vec::new();
            {
                let mut nav = Navigator {
                    element: self.element.as_ref(),
                    config: &self.config,
                    layout: &mut self.layout,
                    position: &mut self.position,
                    adapter: self.adapter.as_mut(),
                    animation: self.gesture.animation_slot(),
                    pending: &mut pending,
                    now_ms: self.now_ms,
                };
                self.dispatcher.dispatch(&mut event, &mut nav);
            }
            self.element.dispatch(&mut event);
            trace!(
                kind = %event.kind(),
                cancelled = event.default_prevented(),
                "notification delivered"
            );

            proceed.get_or_insert(!event.default_prevented());
            queue.extend(pending);
        }
        proceed.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipsnap_platform::headless::{HeadlessElement, HeadlessProbe};

    fn make_widget(probe: HeadlessProbe, config: SnapConfig) -> (Rc<HeadlessElement>, SnapWidget) {
        let element = Rc::new(HeadlessElement::new(probe, 4, 400.0));
        let capabilities = Capabilities::detect(element.as_ref());
        let widget = SnapWidget::with_capabilities(element.clone(), config, &capabilities).unwrap();
        (element, widget)
    }

    #[test]
    fn test_construction_measures_and_anchors() {
        let (element, widget) = make_widget(HeadlessProbe::standard(), SnapConfig::default());
        assert_eq!(widget.max_point(), 3);
        assert_eq!(widget.distance(), 100.0);
        assert_eq!(widget.current_point(), 0);
        assert_eq!(widget.current_offset(), 0.0);
        assert_eq!(widget.adapter_kind(), AdapterKind::Transform3d);
        assert_eq!(widget.gesture_state(), GestureState::Idle);
        assert!(!widget.is_animating());
        assert!(element.dispatched().is_empty());
    }

    #[test]
    fn test_pointer_events_disable_touch_action() {
        let (element, _widget) = make_widget(
            HeadlessProbe::standard().with_pointer_events(true),
            SnapConfig::default(),
        );
        assert_eq!(element.style("touchAction").as_deref(), Some("none"));

        let (element, _widget) = make_widget(HeadlessProbe::standard(), SnapConfig::default());
        assert_eq!(element.style("touchAction"), None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let element = Rc::new(HeadlessElement::new(HeadlessProbe::standard(), 4, 400.0));
        let capabilities = Capabilities::detect(element.as_ref());
        let result = SnapWidget::with_capabilities(
            element,
            SnapConfig::new().with_distance(0.0),
            &capabilities,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_mouse_press_prevents_default() {
        let (_element, mut widget) = make_widget(HeadlessProbe::standard(), SnapConfig::default());
        let disposition = widget.handle(InputEvent::pointer_down(Modality::Mouse, 0.0, 0.0, 0.0));
        assert_eq!(disposition, EventDisposition::PREVENT);
        widget.handle(InputEvent::pointer_up(Modality::Mouse, 0.0, 0.0, 1.0));

        let disposition = widget.handle(InputEvent::pointer_down(Modality::Touch, 0.0, 0.0, 2.0));
        assert_eq!(disposition, EventDisposition::NONE);
    }

    #[test]
    fn test_nested_navigation_from_handler() {
        let (element, mut widget) = make_widget(HeadlessProbe::standard(), SnapConfig::default());
        widget.on(NotificationKind::DragArmed, |_, nav| {
            nav.to_next(Some(0));
        });

        widget.handle(InputEvent::pointer_down(Modality::Touch, 0.0, 0.0, 0.0));
        assert_eq!(widget.current_point(), 1);
        assert_eq!(
            element.dispatched_kinds(),
            vec![NotificationKind::DragArmed, NotificationKind::PointChanged]
        );
    }

    #[test]
    fn test_destroyed_widget_is_inert() {
        let (element, mut widget) = make_widget(HeadlessProbe::standard(), SnapConfig::default());
        widget.destroy();
        assert!(widget.is_destroyed());

        let disposition = widget.handle(InputEvent::pointer_down(Modality::Mouse, 0.0, 0.0, 0.0));
        assert!(disposition.is_none());
        widget.to_next(None);
        widget.refresh();
        assert_eq!(widget.current_point(), 0);
        assert!(element.dispatched().is_empty());
    }
}
