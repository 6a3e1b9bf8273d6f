//! Capability detection
//!
//! Feature flags and vendor-prefixed property names are resolved once and
//! carried in an immutable [`Capabilities`] descriptor. [`Capabilities::global`]
//! memoizes the first detection for the whole process; hosts that need a
//! specific descriptor (tests, multiple documents) build one with
//! [`Capabilities::detect`] and inject it.

use std::sync::OnceLock;

use crate::element::PlatformProbe;

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// Vendor prefixes in probe order, as `(style prefix, css prefix)`
const VENDOR_PREFIXES: [(&str, &str); 4] = [
    ("Webkit", "webkit"),
    ("Moz", "moz"),
    ("O", "o"),
    ("ms", "ms"),
];

const PERSPECTIVE_PROBES: [&str; 6] = [
    "perspective",
    "perspectiveProperty",
    "WebkitPerspective",
    "MozPerspective",
    "OPerspective",
    "msPerspective",
];

const TRANSFORM_PROBES: [&str; 6] = [
    "transform",
    "transformProperty",
    "WebkitTransform",
    "MozTransform",
    "OTransform",
    "msTransform",
];

const TRANSITION_PROBES: [&str; 5] = [
    "transitionProperty",
    "WebkitTransitionProperty",
    "MozTransitionProperty",
    "OTransitionProperty",
    "msTransitionProperty",
];

/// A style property resolved against the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProperty {
    /// Key used on the style declaration (`WebkitTransform`)
    pub style_name: String,
    /// Name used inside CSS values (`-webkit-transform`)
    pub css_name: String,
}

/// Resolve a camelCase style property to the name the host supports,
/// trying the unprefixed name first and then each vendor prefix.
pub fn resolve_property<P>(probe: &P, property: &str) -> Option<ResolvedProperty>
where
    P: PlatformProbe + ?Sized,
{
    if probe.has_style_property(property) {
        return Some(ResolvedProperty {
            style_name: property.to_string(),
            css_name: to_kebab_case(property),
        });
    }
    VENDOR_PREFIXES.iter().find_map(|(style_prefix, css_prefix)| {
        let style_name = format!("{style_prefix}{}", uc_first(property));
        probe
            .has_style_property(&style_name)
            .then(|| ResolvedProperty {
                css_name: format!("-{css_prefix}-{}", to_kebab_case(property)),
                style_name,
            })
    })
}

fn uc_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Property names used by the transform rendering path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformProperties {
    pub transform: ResolvedProperty,
    pub transition_property: ResolvedProperty,
    pub transition_duration: ResolvedProperty,
    pub transition_timing_function: ResolvedProperty,
}

/// Immutable description of what the host supports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    pub transform3d: bool,
    pub transform: bool,
    pub transition: bool,
    /// Platform pointer events are delivered (needs `touch-action: none`)
    pub pointer_events: bool,
    transform_properties: Option<TransformProperties>,
    touch_action: Option<ResolvedProperty>,
}

impl Capabilities {
    /// Probe the host. Pure: callers decide whether to memoize.
    pub fn detect<P: PlatformProbe + ?Sized>(probe: &P) -> Self {
        let has_any = |names: &[&str]| names.iter().any(|name| probe.has_style_property(name));

        let transform3d = has_any(&PERSPECTIVE_PROBES);
        let transform = has_any(&TRANSFORM_PROBES);
        let transition = has_any(&TRANSITION_PROBES);

        let transform_properties = if (transform3d || transform) && transition {
            match (
                resolve_property(probe, "transform"),
                resolve_property(probe, "transitionProperty"),
                resolve_property(probe, "transitionDuration"),
                resolve_property(probe, "transitionTimingFunction"),
            ) {
                (Some(transform), Some(property), Some(duration), Some(timing)) => {
                    Some(TransformProperties {
                        transform,
                        transition_property: property,
                        transition_duration: duration,
                        transition_timing_function: timing,
                    })
                }
                _ => None,
            }
        } else {
            None
        };

        let capabilities = Self {
            transform3d,
            transform,
            transition,
            pointer_events: probe.pointer_events_enabled(),
            transform_properties,
            touch_action: resolve_property(probe, "touchAction"),
        };
        tracing::debug!(
            transform3d,
            transform,
            transition,
            css_animation = capabilities.css_animation(),
            pointer_events = capabilities.pointer_events,
            "detected platform capabilities"
        );
        capabilities
    }

    /// Process-wide descriptor, detected on first use with `probe` and
    /// read-only afterwards
    pub fn global<P: PlatformProbe + ?Sized>(probe: &P) -> &'static Capabilities {
        CAPABILITIES.get_or_init(|| Capabilities::detect(probe))
    }

    /// Composited transform plus transition is available
    pub fn css_animation(&self) -> bool {
        self.transform_properties.is_some()
    }

    pub fn transform_properties(&self) -> Option<&TransformProperties> {
        self.transform_properties.as_ref()
    }

    pub fn touch_action(&self) -> Option<&ResolvedProperty> {
        self.touch_action.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessProbe;

    #[test]
    fn test_unprefixed_resolution() {
        let probe = HeadlessProbe::standard();
        let resolved = resolve_property(&probe, "transitionDuration").unwrap();
        assert_eq!(resolved.style_name, "transitionDuration");
        assert_eq!(resolved.css_name, "transition-duration");
    }

    #[test]
    fn test_prefixed_resolution() {
        let probe = HeadlessProbe::webkit();
        let resolved = resolve_property(&probe, "transform").unwrap();
        assert_eq!(resolved.style_name, "WebkitTransform");
        assert_eq!(resolved.css_name, "-webkit-transform");

        assert!(resolve_property(&probe, "columnRule").is_none());
    }

    #[test]
    fn test_ms_prefix_keeps_lowercase_style_name() {
        let probe = HeadlessProbe::empty().with_properties(["msTransform"]);
        let resolved = resolve_property(&probe, "transform").unwrap();
        assert_eq!(resolved.style_name, "msTransform");
        assert_eq!(resolved.css_name, "-ms-transform");
    }

    #[test]
    fn test_detect_modern_host() {
        let caps = Capabilities::detect(&HeadlessProbe::standard());
        assert!(caps.transform3d);
        assert!(caps.transform);
        assert!(caps.transition);
        assert!(caps.css_animation());
        let props = caps.transform_properties().unwrap();
        assert_eq!(props.transform.css_name, "transform");
    }

    #[test]
    fn test_detect_flat_transform_host() {
        let caps = Capabilities::detect(&HeadlessProbe::transform_2d());
        assert!(!caps.transform3d);
        assert!(caps.transform);
        assert!(caps.css_animation());
    }

    #[test]
    fn test_detect_legacy_host_falls_back() {
        let caps = Capabilities::detect(&HeadlessProbe::legacy());
        assert!(!caps.transform);
        assert!(!caps.transition);
        assert!(!caps.css_animation());
        assert!(caps.transform_properties().is_none());
    }

    #[test]
    fn test_transform_without_transition_falls_back() {
        let probe = HeadlessProbe::legacy().with_properties(["transform"]);
        let caps = Capabilities::detect(&probe);
        assert!(caps.transform);
        assert!(!caps.css_animation());
    }

    #[test]
    fn test_pointer_events_flag() {
        let caps = Capabilities::detect(&HeadlessProbe::standard().with_pointer_events(true));
        assert!(caps.pointer_events);
        assert_eq!(caps.touch_action().unwrap().style_name, "touchAction");
    }
}
