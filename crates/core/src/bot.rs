use crate::moves::Move;
use crate::state::GameState;
use crate::Result;

/// A move-choosing strategy.
///
/// This trait is the seam between the strategies and whatever drives the
/// game. Implementations must treat `state` as read-only and return a
/// legal move for the player to move.
pub trait Bot {
    /// Display name for logs and match reports.
    fn name(&self) -> &str;

    /// Choose a move for the player to move in `state`.
    ///
    /// # Errors
    /// Returns `UtttError::NoLegalMoves` if the game is over or the
    /// available sub-boards are full.
    fn choose_move(&mut self, state: &GameState) -> Result<Move>;
}
