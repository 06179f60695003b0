//! Turn sequencing.
//!
//! `StateMachine` is a small registry of named states and handler
//! functions. The game session registers its four turn states on it.

pub mod machine;

pub use machine::{StateHandler, StateMachine, Transition};
