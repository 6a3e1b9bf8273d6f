//! In-memory host
//!
//! A DOM stand-in for tests and scripted replays: style writes are stored,
//! notifications forwarded to the element are logged, and element-level
//! cancellation of `moving` can be armed ahead of time.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use flipsnap_core::{Notification, NotificationKind, SnapEvent};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::element::{Document, Element, PlatformProbe};

/// Style properties a headless host claims to support
#[derive(Debug, Clone, Default)]
pub struct HeadlessProbe {
    properties: FxHashSet<String>,
    pointer_events: bool,
}

impl HeadlessProbe {
    /// No style support at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Unprefixed transforms, 3-D and transitions
    pub fn standard() -> Self {
        Self::legacy().with_properties([
            "perspective",
            "transform",
            "transitionProperty",
            "transitionDuration",
            "transitionTimingFunction",
            "touchAction",
        ])
    }

    /// Webkit-prefixed transforms and transitions
    pub fn webkit() -> Self {
        Self::legacy().with_properties([
            "WebkitPerspective",
            "WebkitTransform",
            "WebkitTransitionProperty",
            "WebkitTransitionDuration",
            "WebkitTransitionTimingFunction",
        ])
    }

    /// Flat transforms with transitions, no 3-D composition
    pub fn transform_2d() -> Self {
        Self::legacy().with_properties([
            "transform",
            "transitionProperty",
            "transitionDuration",
            "transitionTimingFunction",
        ])
    }

    /// Positioning only
    pub fn legacy() -> Self {
        Self::empty().with_properties(["position", "top"])
    }

    pub fn with_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties
            .extend(properties.into_iter().map(Into::into));
        self
    }

    pub fn with_pointer_events(mut self, enabled: bool) -> Self {
        self.pointer_events = enabled;
        self
    }
}

impl PlatformProbe for HeadlessProbe {
    fn has_style_property(&self, name: &str) -> bool {
        self.properties.contains(name)
    }

    fn pointer_events_enabled(&self) -> bool {
        self.pointer_events
    }
}

/// In-memory container element
#[derive(Debug)]
pub struct HeadlessElement {
    probe: HeadlessProbe,
    child_count: Cell<usize>,
    scroll_height: Cell<f32>,
    styles: RefCell<FxHashMap<String, String>>,
    dispatched: RefCell<Vec<Notification>>,
    cancel_moving: Cell<u32>,
}

impl HeadlessElement {
    pub fn new(probe: HeadlessProbe, child_count: usize, scroll_height: f32) -> Self {
        Self {
            probe,
            child_count: Cell::new(child_count),
            scroll_height: Cell::new(scroll_height),
            styles: RefCell::new(FxHashMap::default()),
            dispatched: RefCell::new(Vec::new()),
            cancel_moving: Cell::new(0),
        }
    }

    /// Simulate content changes; takes effect on the next refresh
    pub fn set_children(&self, child_count: usize) {
        self.child_count.set(child_count);
    }

    pub fn set_scroll_height(&self, scroll_height: f32) {
        self.scroll_height.set(scroll_height);
    }

    /// Cancel the next `count` `moving` notifications at the element level
    pub fn cancel_next_moving(&self, count: u32) {
        self.cancel_moving.set(self.cancel_moving.get() + count);
    }

    /// Notifications forwarded to this element, oldest first
    pub fn dispatched(&self) -> Vec<Notification> {
        self.dispatched.borrow().clone()
    }

    pub fn dispatched_kinds(&self) -> Vec<NotificationKind> {
        self.dispatched.borrow().iter().map(|n| n.kind()).collect()
    }

    pub fn take_dispatched(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.dispatched.borrow_mut())
    }

    /// Snapshot of all inline styles
    pub fn styles(&self) -> FxHashMap<String, String> {
        self.styles.borrow().clone()
    }
}

impl PlatformProbe for HeadlessElement {
    fn has_style_property(&self, name: &str) -> bool {
        self.probe.has_style_property(name)
    }

    fn pointer_events_enabled(&self) -> bool {
        self.probe.pointer_events_enabled()
    }
}

impl Element for HeadlessElement {
    fn child_element_count(&self) -> usize {
        self.child_count.get()
    }

    fn scroll_height(&self) -> f32 {
        self.scroll_height.get()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
    }

    fn style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }

    fn dispatch(&self, event: &mut SnapEvent) {
        if event.kind() == NotificationKind::Moving && self.cancel_moving.get() > 0 {
            self.cancel_moving.set(self.cancel_moving.get() - 1);
            event.prevent_default();
        }
        self.dispatched.borrow_mut().push(*event.notification());
    }
}

/// Selector-keyed element registry
#[derive(Default)]
pub struct HeadlessDocument {
    elements: FxHashMap<String, Rc<HeadlessElement>>,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, selector: impl Into<String>, element: Rc<HeadlessElement>) {
        self.elements.insert(selector.into(), element);
    }

    pub fn get(&self, selector: &str) -> Option<Rc<HeadlessElement>> {
        self.elements.get(selector).cloned()
    }
}

impl Document for HeadlessDocument {
    fn query_selector(&self, selector: &str) -> Option<Rc<dyn Element>> {
        self.elements
            .get(selector)
            .map(|element| element.clone() as Rc<dyn Element>)
    }
}
