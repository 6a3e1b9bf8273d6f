//! Notification dispatch
//!
//! Subscribers register per [`NotificationKind`] and are invoked in
//! registration order. Each handler receives the event plus a [`Navigate`]
//! context, so it can move the widget from inside the callback without
//! holding a reference to the widget itself.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::events::{NotificationKind, SnapEvent};

new_key_type! {
    /// Handle returned by [`EventDispatcher::register`]
    pub struct ListenerId;
}

/// Navigation operations available to notification handlers
///
/// Calls take effect immediately. Notifications they raise are delivered
/// once the current notification has finished dispatching.
pub trait Navigate {
    fn current_point(&self) -> usize;

    fn max_point(&self) -> usize;

    fn has_next(&self) -> bool {
        self.current_point() < self.max_point()
    }

    fn has_prev(&self) -> bool {
        self.current_point() > 0
    }

    /// Move to `point` (clamped), or re-anchor at the current point when `None`
    fn move_to_point(&mut self, point: Option<i64>, duration_ms: Option<u32>);

    fn to_next(&mut self, duration_ms: Option<u32>) {
        if !self.has_next() {
            return;
        }
        let next = self.current_point() as i64 + 1;
        self.move_to_point(Some(next), duration_ms);
    }

    fn to_prev(&mut self, duration_ms: Option<u32>) {
        if !self.has_prev() {
            return;
        }
        let prev = self.current_point() as i64 - 1;
        self.move_to_point(Some(prev), duration_ms);
    }

    /// Re-measure the container and re-anchor
    fn refresh(&mut self);
}

/// Notification handler function type
pub type NotificationHandler = Box<dyn FnMut(&mut SnapEvent, &mut dyn Navigate)>;

struct Listener {
    kind: NotificationKind,
    handler: NotificationHandler,
}

/// Dispatches notifications to registered handlers
pub struct EventDispatcher {
    listeners: SlotMap<ListenerId, Listener>,
    by_kind: FxHashMap<NotificationKind, SmallVec<[ListenerId; 4]>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            by_kind: FxHashMap::default(),
        }
    }

    /// Register a handler for a notification kind
    pub fn register<F>(&mut self, kind: NotificationKind, handler: F) -> ListenerId
    where
        F: FnMut(&mut SnapEvent, &mut dyn Navigate) + 'static,
    {
        let id = self.listeners.insert(Listener {
            kind,
            handler: Box::new(handler),
        });
        self.by_kind.entry(kind).or_default().push(id);
        id
    }

    /// Remove a handler. Returns false if it was already removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(id) else {
            return false;
        };
        if let Some(ids) = self.by_kind.get_mut(&listener.kind) {
            ids.retain(|existing| *existing != id);
        }
        true
    }

    /// Dispatch an event to all handlers registered for its kind
    pub fn dispatch(&mut self, event: &mut SnapEvent, nav: &mut dyn Navigate) {
        let Some(ids) = self.by_kind.get(&event.kind()) else {
            return;
        };
        for id in ids.iter() {
            if event.propagation_stopped() {
                break;
            }
            if let Some(listener) = self.listeners.get_mut(*id) {
                (listener.handler)(event, nav);
            }
        }
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
        self.by_kind.clear();
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Direction, Notification};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Minimal navigation target for exercising handlers
    struct Pager {
        point: usize,
        max: usize,
    }

    impl Navigate for Pager {
        fn current_point(&self) -> usize {
            self.point
        }

        fn max_point(&self) -> usize {
            self.max
        }

        fn move_to_point(&mut self, point: Option<i64>, _duration_ms: Option<u32>) {
            let target = point.unwrap_or(self.point as i64);
            self.point = target.clamp(0, self.max as i64) as usize;
        }

        fn refresh(&mut self) {}
    }

    fn moving() -> SnapEvent {
        SnapEvent::new(Notification::Moving {
            delta: 1.0,
            direction: Direction::Backward,
        })
    }

    #[test]
    fn test_handlers_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();

        let first = log.clone();
        dispatcher.register(NotificationKind::Moving, move |_, _| first.borrow_mut().push(1));
        let second = log.clone();
        dispatcher.register(NotificationKind::Moving, move |_, _| second.borrow_mut().push(2));
        let other = log.clone();
        dispatcher.register(NotificationKind::Settled, move |_, _| other.borrow_mut().push(3));

        let mut pager = Pager { point: 0, max: 2 };
        dispatcher.dispatch(&mut moving(), &mut pager);

        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_stop_propagation_skips_later_handlers() {
        let calls = Rc::new(RefCell::new(0));
        let mut dispatcher = EventDispatcher::new();

        dispatcher.register(NotificationKind::Moving, |event, _| event.stop_propagation());
        let counter = calls.clone();
        dispatcher.register(NotificationKind::Moving, move |_, _| {
            *counter.borrow_mut() += 1;
        });

        let mut pager = Pager { point: 0, max: 2 };
        dispatcher.dispatch(&mut moving(), &mut pager);

        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_remove_listener() {
        let calls = Rc::new(RefCell::new(0));
        let mut dispatcher = EventDispatcher::new();

        let counter = calls.clone();
        let id = dispatcher.register(NotificationKind::Moving, move |_, _| {
            *counter.borrow_mut() += 1;
        });
        assert_eq!(dispatcher.len(), 1);

        assert!(dispatcher.remove(id));
        assert!(!dispatcher.remove(id));
        assert!(dispatcher.is_empty());

        let mut pager = Pager { point: 0, max: 2 };
        dispatcher.dispatch(&mut moving(), &mut pager);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_handler_can_navigate_and_cancel() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(NotificationKind::Moving, |event, nav| {
            nav.to_next(None);
            event.prevent_default();
        });

        let mut pager = Pager { point: 0, max: 2 };
        let mut event = moving();
        dispatcher.dispatch(&mut event, &mut pager);

        assert!(event.default_prevented());
        assert_eq!(pager.point, 1);
    }

    #[test]
    fn test_navigate_default_bounds() {
        let mut pager = Pager { point: 2, max: 2 };
        assert!(!pager.has_next());
        assert!(pager.has_prev());

        pager.to_next(None);
        assert_eq!(pager.point, 2);

        pager.to_prev(None);
        pager.to_prev(None);
        pager.to_prev(None);
        assert_eq!(pager.point, 0);
        assert!(!pager.has_prev());
    }
}
