use crate::moves::Move;
use thiserror::Error;

/// Why the rule engine rejected a move.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    #[error("coordinates outside the 9x9 board")]
    OutOfBounds,

    #[error("target sub-board is not available")]
    InactiveSubBoard,

    #[error("target cell is already occupied")]
    Occupied,

    #[error("game is already over")]
    GameOver,
}

/// Errors that can occur in the ultimate tic-tac-toe core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtttError {
    #[error("Illegal move {mv}: {reason}")]
    IllegalMove {
        mv: Move,
        reason: IllegalMoveReason,
    },

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Invalid game snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Invalid reward: {0}")]
    InvalidReward(String),
}

/// Convenience Result type for core operations
pub type Result<T> = std::result::Result<T, UtttError>;
