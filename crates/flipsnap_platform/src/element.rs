//! Container element access
//!
//! The widget only needs a handful of operations from its container: child
//! and extent measurements, inline style access, and a way to forward
//! notifications as bubbling events. Methods take `&self`; hosts use
//! interior mutability the way a DOM node does.

use std::fmt;
use std::rc::Rc;

use flipsnap_core::SnapEvent;

use crate::error::{PlatformError, Result};

/// Feature probe for the host's style system
pub trait PlatformProbe {
    /// Whether the style declaration knows `name` (camelCase, possibly
    /// vendor-prefixed, e.g. `WebkitTransform`)
    fn has_style_property(&self, name: &str) -> bool;

    /// Whether the host delivers platform pointer events
    fn pointer_events_enabled(&self) -> bool {
        false
    }
}

/// A DOM-like container element
pub trait Element: PlatformProbe {
    /// Number of element-type children (text and comment nodes excluded)
    fn child_element_count(&self) -> usize;

    /// Full content extent along the scroll axis
    fn scroll_height(&self) -> f32;

    fn set_style(&self, property: &str, value: &str);

    fn style(&self, property: &str) -> Option<String>;

    /// Forward a notification as a bubbling event on the element.
    /// Element-level listeners may cancel cancelable events.
    fn dispatch(&self, _event: &mut SnapEvent) {}
}

/// Element lookup by key
pub trait Document {
    fn query_selector(&self, selector: &str) -> Option<Rc<dyn Element>>;
}

/// A container given either directly or by lookup key
#[derive(Clone)]
pub enum ContainerRef {
    Element(Rc<dyn Element>),
    Selector(String),
}

impl ContainerRef {
    /// Resolve to an element, failing with `ElementNotFound` when the
    /// lookup yields nothing. A blank key never matches.
    pub fn resolve(self, document: &dyn Document) -> Result<Rc<dyn Element>> {
        match self {
            ContainerRef::Element(element) => Ok(element),
            ContainerRef::Selector(selector) => {
                let found = if selector.trim().is_empty() {
                    None
                } else {
                    document.query_selector(&selector)
                };
                found.ok_or(PlatformError::ElementNotFound(selector))
            }
        }
    }
}

impl fmt::Debug for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerRef::Element(_) => f.write_str("ContainerRef::Element(..)"),
            ContainerRef::Selector(selector) => {
                f.debug_tuple("ContainerRef::Selector").field(selector).finish()
            }
        }
    }
}

impl From<Rc<dyn Element>> for ContainerRef {
    fn from(element: Rc<dyn Element>) -> Self {
        ContainerRef::Element(element)
    }
}

impl From<&str> for ContainerRef {
    fn from(selector: &str) -> Self {
        ContainerRef::Selector(selector.to_string())
    }
}

impl From<String> for ContainerRef {
    fn from(selector: String) -> Self {
        ContainerRef::Selector(selector)
    }
}

/// Parse a `px` length as written by the adapters
pub(crate) fn parse_px(value: &str) -> Option<f32> {
    value.trim().trim_end_matches("px").trim().parse().ok()
}
