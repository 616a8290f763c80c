//! Players and cell values.
//!
//! Board cells only ever hold [`Cell::Empty`] or [`Cell::Owned`]. Macro-board
//! cells use the full alphabet: a sub-board can additionally be
//! [`Cell::Available`] (legal destination for the next move) or
//! [`Cell::Tie`] (full with no winner).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two players. Player zero moves first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Player {
    Zero,
    One,
}

impl Player {
    /// Player to move after `move_number` moves have been played.
    pub fn from_move_number(move_number: u32) -> Self {
        if move_number % 2 == 0 {
            Player::Zero
        } else {
            Player::One
        }
    }

    /// Get the opposing player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Zero => Player::One,
            Player::One => Player::Zero,
        }
    }

    /// Numeric index (0 or 1).
    pub fn index(self) -> usize {
        match self {
            Player::Zero => 0,
            Player::One => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Value of a single board or macro-board cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Cell {
    /// Unclaimed. On the macro-board: undecided and not selectable.
    #[default]
    Empty,
    /// Claimed by a player. On the macro-board: sub-board won, frozen.
    Owned(Player),
    /// Macro-board only: sub-board full with no winner, frozen.
    Tie,
    /// Macro-board only: undecided and selectable for the next move.
    Available,
}

impl Cell {
    /// True for cells that still count as open space (`Empty` or `Available`).
    pub fn is_open(self) -> bool {
        matches!(self, Cell::Empty | Cell::Available)
    }

    /// The owning player, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Owned(player) => Some(player),
            _ => None,
        }
    }

    /// Single-character rendering used by board displays.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Owned(Player::Zero) => 'X',
            Cell::Owned(Player::One) => 'O',
            Cell::Tie => '#',
            Cell::Available => '*',
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        Cell::Owned(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_from_move_number() {
        assert_eq!(Player::from_move_number(0), Player::Zero);
        assert_eq!(Player::from_move_number(1), Player::One);
        assert_eq!(Player::from_move_number(80), Player::Zero);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Player::Zero.opponent(), Player::One);
        assert_eq!(Player::One.opponent().opponent(), Player::One);
    }

    #[test]
    fn test_cell_is_open() {
        assert!(Cell::Empty.is_open());
        assert!(Cell::Available.is_open());
        assert!(!Cell::Tie.is_open());
        assert!(!Cell::Owned(Player::One).is_open());
    }

    #[test]
    fn test_cell_owner() {
        assert_eq!(Cell::from(Player::Zero).owner(), Some(Player::Zero));
        assert_eq!(Cell::Tie.owner(), None);
    }
}
