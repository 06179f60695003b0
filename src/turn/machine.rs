//! Generic finite-state controller.
//!
//! States are registered by name with a handler. Running the machine calls
//! the current state's handler with the shared context; the handler returns
//! the next state or `Transition::Halt`.
//!
//! ```
//! use crown_duel::turn::{StateMachine, Transition};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Light { Red, Green }
//!
//! fn red(changes: &mut u32) -> Result<Transition<Light>, crown_duel::GameError> {
//!     *changes += 1;
//!     Ok(Transition::Next(Light::Green))
//! }
//!
//! fn green(_: &mut u32) -> Result<Transition<Light>, crown_duel::GameError> {
//!     Ok(Transition::Halt)
//! }
//!
//! let mut machine = StateMachine::new();
//! machine.add_state(Light::Red, red);
//! machine.add_state(Light::Green, green);
//! machine.set_state(Light::Red)?;
//!
//! let mut changes = 0;
//! machine.run_to_completion(&mut changes)?;
//! assert_eq!(changes, 1);
//! assert_eq!(machine.current(), None);
//! # Ok::<(), crown_duel::GameError>(())
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::{GameError, StateError};

/// What a handler asks the machine to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition<S> {
    Next(S),
    /// Stop: no state is current afterwards.
    Halt,
}

/// A state handler: a function of the shared context.
pub type StateHandler<S, C> = fn(&mut C) -> Result<Transition<S>, GameError>;

/// State machine over state names `S` sharing context `C`.
pub struct StateMachine<S, C> {
    handlers: FxHashMap<S, StateHandler<S, C>>,
    current: Option<S>,
}

impl<S, C> Default for StateMachine<S, C> {
    fn default() -> Self {
        Self {
            handlers: FxHashMap::default(),
            current: None,
        }
    }
}

impl<S, C> StateMachine<S, C>
where
    S: Copy + Eq + Hash + Debug,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the handler for a state.
    pub fn add_state(&mut self, state: S, handler: StateHandler<S, C>) {
        self.handlers.insert(state, handler);
    }

    #[must_use]
    pub fn has_state(&self, state: S) -> bool {
        self.handlers.contains_key(&state)
    }

    /// Make `state` current. Fails if it was never registered.
    pub fn set_state(&mut self, state: S) -> Result<(), StateError> {
        if !self.has_state(state) {
            return Err(StateError::UnknownState(format!("{:?}", state)));
        }
        self.current = Some(state);
        Ok(())
    }

    /// The current state, `None` before the first `set_state` or after a halt.
    #[must_use]
    pub fn current(&self) -> Option<S> {
        self.current
    }

    /// Run the current state's handler once and apply its transition.
    ///
    /// If the handler fails the current state is unchanged, so the same
    /// state can be run again. Returns the new current state.
    pub fn run(&mut self, context: &mut C) -> Result<Option<S>, GameError> {
        let state = self
            .current
            .ok_or_else(|| StateError::UnknownState("<none>".to_string()))?;
        let handler = *self
            .handlers
            .get(&state)
            .ok_or_else(|| StateError::UnknownState(format!("{:?}", state)))?;

        match handler(context)? {
            Transition::Next(next) => {
                trace!(from = ?state, to = ?next, "state transition");
                self.set_state(next)?;
            }
            Transition::Halt => {
                trace!(from = ?state, "machine halted");
                self.current = None;
            }
        }
        Ok(self.current)
    }

    /// Run until a handler halts or fails.
    pub fn run_to_completion(&mut self, context: &mut C) -> Result<(), GameError> {
        while self.current.is_some() {
            self.run(context)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Step {
        Start,
        Loop,
        Stop,
        Missing,
    }

    #[derive(Default)]
    struct Counter {
        loops: u32,
        log: Vec<Step>,
    }

    fn start(ctx: &mut Counter) -> Result<Transition<Step>, GameError> {
        ctx.log.push(Step::Start);
        Ok(Transition::Next(Step::Loop))
    }

    fn looping(ctx: &mut Counter) -> Result<Transition<Step>, GameError> {
        ctx.log.push(Step::Loop);
        ctx.loops += 1;
        if ctx.loops < 3 {
            Ok(Transition::Next(Step::Loop))
        } else {
            Ok(Transition::Next(Step::Stop))
        }
    }

    fn stop(ctx: &mut Counter) -> Result<Transition<Step>, GameError> {
        ctx.log.push(Step::Stop);
        Ok(Transition::Halt)
    }

    fn to_missing(_: &mut Counter) -> Result<Transition<Step>, GameError> {
        Ok(Transition::Next(Step::Missing))
    }

    fn machine() -> StateMachine<Step, Counter> {
        let mut machine = StateMachine::new();
        machine.add_state(Step::Start, start);
        machine.add_state(Step::Loop, looping);
        machine.add_state(Step::Stop, stop);
        machine
    }

    #[test]
    fn test_run_before_set_state() {
        let mut machine = machine();
        let err = machine.run(&mut Counter::default()).unwrap_err();
        assert!(matches!(err, GameError::State(StateError::UnknownState(_))));
    }

    #[test]
    fn test_set_unknown_state() {
        let mut machine = machine();
        assert_eq!(
            machine.set_state(Step::Missing),
            Err(StateError::UnknownState("Missing".to_string()))
        );
        assert_eq!(machine.current(), None);
    }

    #[test]
    fn test_context_accumulates_across_states() {
        let mut machine = machine();
        let mut ctx = Counter::default();
        machine.set_state(Step::Start).unwrap();

        assert_eq!(machine.run(&mut ctx).unwrap(), Some(Step::Loop));
        machine.run_to_completion(&mut ctx).unwrap();

        assert_eq!(
            ctx.log,
            vec![Step::Start, Step::Loop, Step::Loop, Step::Loop, Step::Stop]
        );
        assert_eq!(machine.current(), None);
    }

    #[test]
    fn test_transition_to_unregistered_state() {
        let mut machine = machine();
        machine.add_state(Step::Start, to_missing);
        machine.set_state(Step::Start).unwrap();

        assert!(machine.run(&mut Counter::default()).is_err());
        assert_eq!(machine.current(), Some(Step::Start));
    }

    #[test]
    fn test_run_after_halt() {
        let mut machine = machine();
        let mut ctx = Counter::default();
        machine.set_state(Step::Stop).unwrap();

        assert_eq!(machine.run(&mut ctx).unwrap(), None);
        assert!(machine.run(&mut ctx).is_err());
    }
}
