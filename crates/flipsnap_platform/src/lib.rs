//! flipsnap platform layer
//!
//! Everything the gesture machine needs from its host, behind traits:
//!
//! - [`Element`] / [`Document`]: DOM-like container access and lookup
//! - [`Capabilities`]: one-time feature detection and vendor-prefixed
//!   property resolution
//! - [`RenderingAdapter`]: "set offset, optionally animated" and "read
//!   offset", as a composited transform or a timed positional fallback
//! - [`headless`]: in-memory host used by tests and the scenario runner

pub mod adapter;
pub mod capabilities;
pub mod element;
pub mod error;
pub mod headless;

pub use adapter::{
    select_adapter, AdapterKind, AnimationToken, PositionAdapter, RenderingAdapter,
    TransformAdapter,
};
pub use capabilities::{resolve_property, Capabilities, ResolvedProperty, TransformProperties};
pub use element::{ContainerRef, Document, Element, PlatformProbe};
pub use error::{PlatformError, Result};
