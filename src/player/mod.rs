//! Player holdings, derived scores and win detection.

pub mod holdings;
pub mod standing;

pub use holdings::Player;
pub use standing::{Standing, WinCondition};
