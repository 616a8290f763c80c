//! Game state: board, macro-board and counters.
//!
//! A `GameState` is a plain value. Bots clone the externally supplied state
//! before simulating, so the caller's copy is never touched.

use crate::cell::{Cell, Player};
use crate::grid::{Board, MacroBoard};
use crate::moves::Move;
use crate::rules;
use crate::types::Outcome;
use crate::{Result, UtttError};
use std::fmt;

/// Whether the game is still running.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum GameStatus {
    Active,
    Win(Player),
    Tie,
}

impl GameStatus {
    /// The final outcome, or `None` while the game is active.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GameStatus::Active => None,
            GameStatus::Win(player) => Some(Outcome::Win(player)),
            GameStatus::Tie => Some(Outcome::Tie),
        }
    }

    pub fn is_active(self) -> bool {
        self == GameStatus::Active
    }
}

/// Complete ultimate tic-tac-toe position.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) macro_board: MacroBoard,
    pub(crate) move_number: u32,
    pub(crate) round_number: u32,
    pub(crate) status: GameStatus,
}

impl GameState {
    /// Starting position: empty board, every sub-board available.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            macro_board: MacroBoard::filled(Cell::Available),
            move_number: 0,
            round_number: 0,
            status: GameStatus::Active,
        }
    }

    /// Adopt an externally supplied snapshot.
    ///
    /// The game status is derived from the macro-board.
    ///
    /// # Errors
    /// Returns `UtttError::InvalidSnapshot` if a board cell holds a
    /// macro-only value (`Tie` or `Available`).
    pub fn from_parts(
        board: Board,
        macro_board: MacroBoard,
        move_number: u32,
        round_number: u32,
    ) -> Result<Self> {
        if let Some((x, y, cell)) = board
            .iter()
            .find(|(_, _, c)| matches!(c, Cell::Tie | Cell::Available))
        {
            return Err(UtttError::InvalidSnapshot(format!(
                "board cell ({},{}) holds macro-board value {:?}",
                x, y, cell
            )));
        }

        Ok(Self {
            board,
            macro_board,
            move_number,
            round_number,
            status: rules::macro_status(&macro_board),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn macro_board(&self) -> &MacroBoard {
        &self.macro_board
    }

    /// Number of moves played so far.
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Number of completed rounds (pairs of moves).
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        !self.status.is_active()
    }

    /// Player to move.
    pub fn current_player(&self) -> Player {
        Player::from_move_number(self.move_number)
    }

    /// True if the sub-board containing `mv` is marked available.
    pub fn is_in_active_sub_board(&self, mv: Move) -> bool {
        let (mx, my) = mv.sub_board();
        self.macro_board.get(mx as usize, my as usize) == Cell::Available
    }

    /// All legal moves, in x-major order. Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }

        self.board
            .iter()
            .map(|(x, y, cell)| (Move::new(x as u8, y as u8), cell))
            .filter(|&(mv, cell)| cell == Cell::Empty && self.is_in_active_sub_board(mv))
            .map(|(mv, _)| mv)
            .collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for x in 0..9 {
            if x > 0 && x % 3 == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for y in 0..9 {
                if y > 0 && y % 3 == 0 {
                    write!(f, "| ")?;
                }
                write!(f, "{} ", self.board.get(x, y).symbol())?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        for x in 0..3 {
            for y in 0..3 {
                write!(f, "{}", self.macro_board.get(x, y).symbol())?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "move {} round {} to play: {}",
            self.move_number,
            self.round_number,
            self.current_player()
        )
    }
}
