//! State Machine Runtime
//!
//! Flat, event-driven state machines for widget interaction states.
//!
//! A state type describes its own transition table through
//! [`StateTransitions::on_event`]. [`StateMachine`] holds the current state
//! and a bounded log of the transitions taken, which is useful when tracing a
//! gesture after the fact.

use std::collections::VecDeque;
use std::hash::Hash;

use crate::events::EventType;

/// Default number of transitions kept in the log
pub const DEFAULT_HISTORY: usize = 32;

/// Trait for state types that handle their own transitions
///
/// # Example
///
/// ```rust
/// use flick_core::events::event_types::*;
/// use flick_core::fsm::StateTransitions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// enum Knob {
///     #[default]
///     Idle,
///     Held,
/// }
///
/// impl StateTransitions for Knob {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Knob::Idle, POINTER_DOWN) => Some(Knob::Held),
///             (Knob::Held, POINTER_UP) => Some(Knob::Idle),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Knob::Idle.on_event(POINTER_DOWN), Some(Knob::Held));
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// A transition that was taken
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition<S> {
    pub from: S,
    pub event: EventType,
    pub to: S,
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    history: VecDeque<Transition<S>>,
    history_limit: usize,
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: StateTransitions> StateMachine<S> {
    /// Create a new state machine in `initial_state`
    pub fn new(initial_state: S) -> Self {
        Self::with_history_limit(initial_state, DEFAULT_HISTORY)
    }

    /// Create a state machine that keeps at most `limit` transitions
    pub fn with_history_limit(initial_state: S, limit: usize) -> Self {
        Self {
            current_state: initial_state,
            history: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY)),
            history_limit: limit,
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.current_state.on_event(event).is_some()
    }

    /// Send an event, returning the transition if one was taken
    pub fn send(&mut self, event: EventType) -> Option<Transition<S>> {
        let from = self.current_state;
        let to = from.on_event(event)?;

        self.current_state = to;
        let transition = Transition { from, event, to };

        if self.history_limit > 0 {
            if self.history.len() == self.history_limit {
                self.history.pop_front();
            }
            self.history.push_back(transition);
        }

        tracing::trace!("fsm {:?} --{}--> {:?}", from, event, to);
        Some(transition)
    }

    /// Transition history, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Transition<S>> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
