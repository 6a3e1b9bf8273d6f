//! State transition runtime
//!
//! Widget interaction states are plain enums implementing
//! [`StateTransitions`]; a [`StateCell`] holds the current state and records
//! the transitions it takes.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

/// Identifier for an event fed to a state machine
pub type EventId = u32;

/// Maximum number of transitions kept in a [`StateCell`] history
const HISTORY_LIMIT: usize = 64;

/// Trait for state types that map events to transitions
///
/// # Example
///
/// ```
/// use flipsnap_core::fsm::{EventId, StateTransitions};
///
/// const PRESS: EventId = 1;
/// const RELEASE: EventId = 2;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Button {
///     Up,
///     Down,
/// }
///
/// impl StateTransitions for Button {
///     fn on_event(&self, event: EventId) -> Option<Self> {
///         match (self, event) {
///             (Button::Up, PRESS) => Some(Button::Down),
///             (Button::Down, RELEASE) => Some(Button::Up),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Button::Up.on_event(PRESS), Some(Button::Down));
/// assert_eq!(Button::Up.on_event(RELEASE), None);
/// ```
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;
}

/// Holds the current state of a machine and its recent history
#[derive(Debug, Clone)]
pub struct StateCell<S: StateTransitions> {
    current: S,
    /// Recent transitions (for debugging)
    history: VecDeque<(S, EventId, S)>,
}

impl<S: StateTransitions> StateCell<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: VecDeque::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: EventId) -> Option<S> {
        let from = self.current;
        let to = from.on_event(event)?;
        tracing::trace!(?from, ?to, event, "state transition");
        self.current = to;
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back((from, event, to));
        Some(to)
    }

    /// Force a state without recording a transition
    pub fn reset(&mut self, state: S) {
        self.current = state;
    }

    /// Recent transitions, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(S, EventId, S)> {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for StateCell<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
