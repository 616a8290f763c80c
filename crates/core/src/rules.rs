//! Rule engine.
//!
//! [`Simulator`] owns a private copy of a [`GameState`] and is the only way
//! to advance it. Win and tie detection is shared between the 9x9 board and
//! the 3x3 macro-board: both are [`Grid`]s, and on the macro-board the
//! "player token" is the macro-cell value a won sub-board carries.

use crate::cell::{Cell, Player};
use crate::error::IllegalMoveReason;
use crate::grid::{Grid, MacroBoard};
use crate::moves::Move;
use crate::state::{GameState, GameStatus};
use crate::{Result, UtttError};

const BLOCK: usize = 3;

/// Does `token` hold a full line through `(x, y)` in the 3x3 block containing it?
///
/// Row and column are always checked; a diagonal is only checked when
/// `(x, y)` lies on it.
pub fn is_win<const N: usize>(grid: &Grid<N>, x: usize, y: usize, token: Cell) -> bool {
    let (lx, ly) = (x % BLOCK, y % BLOCK);
    let (sx, sy) = (x - lx, y - ly);

    if (sy..sy + BLOCK).all(|j| grid.get(x, j) == token) {
        return true;
    }

    if (sx..sx + BLOCK).all(|i| grid.get(i, y) == token) {
        return true;
    }

    if lx == ly && (0..BLOCK).all(|k| grid.get(sx + k, sy + k) == token) {
        return true;
    }

    lx + ly == BLOCK - 1 && (0..BLOCK).all(|k| grid.get(sx + k, sy + BLOCK - 1 - k) == token)
}

/// Is the 3x3 block containing `(x, y)` full?
///
/// Callers check [`is_win`] first; a full block with a line is a win.
pub fn is_tie<const N: usize>(grid: &Grid<N>, x: usize, y: usize) -> bool {
    let (sx, sy) = (x - x % BLOCK, y - y % BLOCK);
    (sx..sx + BLOCK).all(|i| (sy..sy + BLOCK).all(|j| !grid.get(i, j).is_open()))
}

/// Derive the overall status from a macro-board alone.
pub fn macro_status(macro_board: &MacroBoard) -> GameStatus {
    for (x, y, cell) in macro_board.iter() {
        if let Cell::Owned(player) = cell {
            if is_win(macro_board, x, y, cell) {
                return GameStatus::Win(player);
            }
        }
    }

    if is_tie(macro_board, 0, 0) {
        GameStatus::Tie
    } else {
        GameStatus::Active
    }
}

/// Applies moves to a private snapshot of a game.
#[derive(Clone, Debug)]
pub struct Simulator {
    state: GameState,
}

impl Simulator {
    /// Start simulating from a deep copy of `state`.
    pub fn new(state: &GameState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Consume the simulator, returning the simulated state.
    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.state.legal_moves()
    }

    /// Check a move without applying it.
    ///
    /// # Errors
    /// Returns `UtttError::IllegalMove` describing the first rule violated.
    pub fn check_move(&self, mv: Move) -> Result<()> {
        let reason = if !self.state.status.is_active() {
            Some(IllegalMoveReason::GameOver)
        } else if !mv.is_on_board() {
            Some(IllegalMoveReason::OutOfBounds)
        } else if !self.state.is_in_active_sub_board(mv) {
            Some(IllegalMoveReason::InactiveSubBoard)
        } else if self.state.board.get(mv.x as usize, mv.y as usize) != Cell::Empty {
            Some(IllegalMoveReason::Occupied)
        } else {
            None
        };

        match reason {
            Some(reason) => Err(UtttError::IllegalMove { mv, reason }),
            None => Ok(()),
        }
    }

    /// Play `mv` for the player to move.
    ///
    /// On error the state is left untouched.
    pub fn apply_move(&mut self, mv: Move) -> Result<()> {
        self.check_move(mv)?;

        let player = self.current_player();
        let (x, y) = (mv.x as usize, mv.y as usize);

        self.state.board.set(x, y, Cell::Owned(player));
        self.state.move_number += 1;
        if self.state.move_number % 2 == 0 {
            self.state.round_number += 1;
        }

        self.update_sub_board(x, y, player);
        self.update_availability(mv);
        Ok(())
    }

    /// Resolve the sub-board the move landed in, then the macro-board.
    fn update_sub_board(&mut self, x: usize, y: usize, player: Player) {
        let (mx, my) = (x / BLOCK, y / BLOCK);
        let token = Cell::Owned(player);

        if !self.state.macro_board.get(mx, my).is_open() {
            return;
        }

        if is_win(&self.state.board, x, y, token) {
            self.state.macro_board.set(mx, my, token);
        } else if is_tie(&self.state.board, x, y) {
            self.state.macro_board.set(mx, my, Cell::Tie);
        }

        if is_win(&self.state.macro_board, mx, my, token) {
            self.state.status = GameStatus::Win(player);
        } else if is_tie(&self.state.macro_board, mx, my) {
            self.state.status = GameStatus::Tie;
        }
    }

    /// Point the opponent at the sub-board named by the move's local
    /// coordinates, or anywhere undecided if that one is closed.
    fn update_availability(&mut self, mv: Move) {
        let macro_board = &mut self.state.macro_board;
        macro_board.replace_all(Cell::Available, Cell::Empty);

        let (tx, ty) = mv.local();
        let (tx, ty) = (tx as usize, ty as usize);

        if macro_board.get(tx, ty) == Cell::Empty {
            macro_board.set(tx, ty, Cell::Available);
        } else {
            macro_board.replace_all(Cell::Empty, Cell::Available);
        }
    }
}

impl From<GameState> for Simulator {
    fn from(state: GameState) -> Self {
        Self { state }
    }
}
