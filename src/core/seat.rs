//! Seats around the table.
//!
//! Seat numbers are 0-based, handed out in creation order during setup.
//! Play moves to the next seat number and wraps after the last one.

use serde::{Deserialize, Serialize};

/// One player's seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// Position in per-seat vectors.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_seated(self, player_count: usize) -> bool {
        self.index() < player_count
    }

    /// Who plays after this seat at a table of `player_count`.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        if self.index() + 1 >= player_count {
            Self(0)
        } else {
            Self(self.0 + 1)
        }
    }

    /// Every seat at a table of `player_count`, in turn order from seat 0.
    ///
    /// ```
    /// use crown_duel::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::seats(3).collect();
    /// assert_eq!(seats, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
    /// ```
    pub fn seats(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count).map(|seat| PlayerId(seat as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}
