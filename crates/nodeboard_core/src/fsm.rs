//! State Machine Runtime
//!
//! Flat state machines for widget interaction states. States are any small
//! `Copy` type (usually a fieldless enum); transitions are keyed by
//! [`EventType`] so widgets can feed dispatched events straight in.

use smallvec::SmallVec;

use crate::events::EventType;

/// A transition in the state machine
pub struct Transition<S> {
    pub from_state: S,
    pub event: EventType,
    pub to_state: S,
}

impl<S: Copy + PartialEq> Transition<S> {
    pub fn new(from: S, event: EventType, to: S) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }

    fn matches(&self, state: S, event: EventType) -> bool {
        self.from_state == state && self.event == event
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder<S> {
    initial_state: S,
    transitions: SmallVec<[Transition<S>; 8]>,
}

impl<S: Copy + PartialEq> StateMachineBuilder<S> {
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: SmallVec::new(),
        }
    }

    /// Add a transition
    pub fn transition(mut self, transition: Transition<S>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add a simple transition (from, event, to)
    pub fn on(mut self, from: S, event: EventType, to: S) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    pub fn build(self) -> StateMachine<S> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
        }
    }
}

/// A state machine instance
pub struct StateMachine<S> {
    current_state: S,
    transitions: SmallVec<[Transition<S>; 8]>,
}

impl<S: Copy + PartialEq> StateMachine<S> {
    pub fn builder(initial_state: S) -> StateMachineBuilder<S> {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Send an event, returning `(from, to)` if a transition fired
    pub fn send(&mut self, event: EventType) -> Option<(S, S)> {
        let from = self.current_state;
        let to = self
            .transitions
            .iter()
            .find(|t| t.matches(from, event))?
            .to_state;

        self.current_state = to;
        Some((from, to))
    }

    /// Jump to a state without going through a transition
    ///
    /// Used when the widget's configuration changes (e.g. enabling or
    /// disabling), not in response to input.
    pub fn reset(&mut self, state: S) {
        self.current_state = state;
    }
}
