//! Move representation.
//!
//! A move is a bare `(x, y)` coordinate on the 9x9 board. It carries no
//! player; the rule engine stamps the player to move when it is applied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the full board.
pub const BOARD_SIZE: u8 = 9;

/// Side length of a sub-board (and of the macro-board).
pub const BLOCK_SIZE: u8 = 3;

/// A move on the 9x9 board.
///
/// Coordinates are not validated on construction so that out-of-range
/// moves can be represented and rejected by the rule engine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub x: u8,
    pub y: u8,
}

impl Move {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// True if both coordinates are in `0..9`.
    pub fn is_on_board(self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// Macro-board coordinates of the sub-board this move lands in.
    pub fn sub_board(self) -> (u8, u8) {
        (self.x / BLOCK_SIZE, self.y / BLOCK_SIZE)
    }

    /// Coordinates within the sub-board. These also name the sub-board
    /// the opponent is sent to.
    pub fn local(self) -> (u8, u8) {
        (self.x % BLOCK_SIZE, self.y % BLOCK_SIZE)
    }

    /// Build a move from sub-board and local coordinates.
    pub fn from_parts(sub_board: (u8, u8), local: (u8, u8)) -> Self {
        Self::new(
            sub_board.0 * BLOCK_SIZE + local.0,
            sub_board.1 * BLOCK_SIZE + local.1,
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
