//! Programmatic navigation and container binding

use std::cell::RefCell;
use std::rc::Rc;

use flipsnap::prelude::*;
use flipsnap::{Element, Error};
use flipsnap_platform::headless::{HeadlessDocument, HeadlessElement, HeadlessProbe};
use flipsnap_platform::PlatformError;

fn setup(children: usize) -> (Rc<HeadlessElement>, SnapWidget) {
    let element = Rc::new(HeadlessElement::new(
        HeadlessProbe::standard(),
        children,
        children as f32 * 100.0,
    ));
    let capabilities = Capabilities::detect(element.as_ref());
    let widget =
        SnapWidget::with_capabilities(element.clone(), SnapConfig::default(), &capabilities)
            .unwrap();
    (element, widget)
}

#[test]
fn test_re_anchor_is_idempotent() {
    let (element, mut widget) = setup(4);
    for point in 0..=3 {
        widget.move_to_point(point, Some(0));
        element.take_dispatched();
        widget.refresh();
        assert_eq!(widget.current_point(), point as usize);
        assert_eq!(widget.current_offset(), -(point as f32) * 100.0);
        assert!(element.dispatched().is_empty());
    }
}

#[test]
fn test_out_of_range_points_clamp() {
    let (_element, mut widget) = setup(4);
    widget.move_to_point(-1, None);
    assert_eq!(widget.current_point(), 0);
    widget.move_to_point(4, None);
    assert_eq!(widget.current_point(), 3);
    widget.move_to_point(i64::MAX, None);
    assert_eq!(widget.current_point(), 3);
}

#[test]
fn test_has_next_and_prev_at_bounds() {
    let (_element, mut widget) = setup(4);
    assert!(widget.has_next());
    assert!(!widget.has_prev());

    widget.move_to_point(2, None);
    assert!(widget.has_next());
    assert!(widget.has_prev());

    widget.move_to_point(3, None);
    assert!(!widget.has_next());
    assert!(widget.has_prev());
}

#[test]
fn test_to_next_and_prev_stop_at_bounds() {
    let (element, mut widget) = setup(3);
    widget.to_prev(None);
    assert_eq!(widget.current_point(), 0);

    widget.to_next(None);
    widget.to_next(None);
    widget.to_next(None);
    assert_eq!(widget.current_point(), 2);
    assert_eq!(
        element.dispatched(),
        vec![
            Notification::PointChanged {
                previous: 0,
                current: 1
            },
            Notification::PointChanged {
                previous: 1,
                current: 2
            },
        ]
    );
}

#[test]
fn test_duration_override() {
    let (element, mut widget) = setup(4);
    widget.to_next(Some(800));
    assert_eq!(element.style("transitionDuration").as_deref(), Some("800ms"));
    widget.to_next(None);
    assert_eq!(element.style("transitionDuration").as_deref(), Some("350ms"));
}

#[test]
fn test_refresh_clamps_after_panels_removed() {
    let (element, mut widget) = setup(4);
    widget.move_to_point(3, Some(0));
    element.take_dispatched();

    element.set_children(2);
    element.set_scroll_height(200.0);
    widget.refresh();

    assert_eq!(widget.max_point(), 1);
    assert_eq!(widget.current_point(), 1);
    assert_eq!(widget.current_offset(), -100.0);
    assert_eq!(
        element.dispatched(),
        vec![Notification::PointChanged {
            previous: 3,
            current: 1
        }]
    );
}

#[test]
fn test_overrides_replace_measurement() {
    let element = Rc::new(HeadlessElement::new(HeadlessProbe::standard(), 10, 1000.0));
    let capabilities = Capabilities::detect(element.as_ref());
    let mut widget = SnapWidget::with_capabilities(
        element.clone(),
        SnapConfig::new().with_distance(250.0).with_max_point(2),
        &capabilities,
    )
    .unwrap();

    assert_eq!(widget.max_point(), 2);
    assert_eq!(widget.distance(), 250.0);
    widget.move_to_point(5, Some(0));
    assert_eq!(widget.current_offset(), -500.0);
    assert_eq!(element.style("transform").as_deref(), Some("translate3d(0,-500px,0)"));
}

#[test]
fn test_empty_container() {
    let (_element, mut widget) = setup(0);
    assert_eq!(widget.max_point(), 0);
    assert!(!widget.has_next());
    widget.to_next(None);
    assert_eq!(widget.current_point(), 0);
}

#[test]
fn test_point_changed_handler_can_chain_navigation() {
    let (element, mut widget) = setup(4);
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    widget.on(NotificationKind::PointChanged, move |event, nav| {
        if let Notification::PointChanged { current, .. } = *event.notification() {
            sink.borrow_mut().push(current);
            // Skip panel 1
            if current == 1 {
                nav.to_next(Some(0));
            }
        }
    });

    widget.to_next(Some(0));
    assert_eq!(widget.current_point(), 2);
    assert_eq!(*log.borrow(), vec![1, 2]);
    assert_eq!(element.dispatched().len(), 2);
}

#[test]
fn test_stop_propagation_skips_later_handlers() {
    let (_element, mut widget) = setup(4);
    let calls = Rc::new(RefCell::new(Vec::new()));

    let first = calls.clone();
    widget.on(NotificationKind::PointChanged, move |event, _| {
        first.borrow_mut().push("first");
        event.stop_propagation();
    });
    let second = calls.clone();
    widget.on(NotificationKind::PointChanged, move |_, _| {
        second.borrow_mut().push("second");
    });

    widget.to_next(None);
    assert_eq!(*calls.borrow(), vec!["first"]);
}

#[test]
fn test_attach_by_selector() {
    let mut document = HeadlessDocument::new();
    let element = Rc::new(HeadlessElement::new(HeadlessProbe::standard(), 3, 600.0));
    document.insert("#panels", element.clone());
    let capabilities = Capabilities::detect(element.as_ref());

    let widget = SnapWidget::attach_with_capabilities(
        &document,
        "#panels",
        SnapConfig::default(),
        &capabilities,
    )
    .unwrap();
    assert_eq!(widget.max_point(), 2);
    assert_eq!(widget.distance(), 200.0);

    let missing = SnapWidget::attach_with_capabilities(
        &document,
        "#missing",
        SnapConfig::default(),
        &capabilities,
    );
    assert!(matches!(
        missing,
        Err(Error::Platform(PlatformError::ElementNotFound(_)))
    ));
}

#[test]
fn test_destroy_is_idempotent_and_final() {
    let (element, mut widget) = setup(4);
    widget.to_next(Some(0));
    element.take_dispatched();

    widget.destroy();
    widget.destroy();
    widget.to_next(None);
    widget.move_to_point(3, None);
    widget.tick(1000.0);

    assert!(widget.is_destroyed());
    assert_eq!(widget.current_point(), 1);
    assert!(element.dispatched().is_empty());
}
