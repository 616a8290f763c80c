//! Ultimate tic-tac-toe core - board model, rule engine and tactics
//!
//! Nine 3x3 sub-boards sit in a 3x3 macro-board. The local coordinates of
//! each move pick the sub-board the opponent must play in next.
//!
//! # Types
//!
//! - [`GameState`] - Board, macro-board and move/round counters
//! - [`Simulator`] - Applies moves to a private copy of a state
//! - [`winning_moves`] - Moves that immediately win a sub-board
//! - [`Bot`] - Trait for move-choosing strategies
//!
//! # Example
//!
//! ```
//! use uttt_core::{Cell, GameState, Move, Simulator};
//!
//! let state = GameState::new();
//! let mut sim = Simulator::new(&state);
//! sim.apply_move(Move::new(4, 4)).unwrap();
//!
//! assert_eq!(sim.state().macro_board().get(1, 1), Cell::Available);
//! assert_eq!(sim.state().macro_board().count(Cell::Available), 1);
//! assert_eq!(state.move_number(), 0);
//! ```

mod bot;
mod cell;
mod error;
mod grid;
mod moves;
pub mod rules;
mod state;
pub mod tactics;
mod types;

pub use bot::Bot;
pub use cell::{Cell, Player};
pub use error::{IllegalMoveReason, Result, UtttError};
pub use grid::{Board, Grid, MacroBoard};
pub use moves::{Move, BLOCK_SIZE, BOARD_SIZE};
pub use rules::Simulator;
pub use state::{GameState, GameStatus};
pub use tactics::{winning_moves, winning_moves_for_opponent};
pub use types::{Outcome, Reward};
