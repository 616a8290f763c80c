//! Immediate tactics detection.
//!
//! Finds legal moves that would complete a line in their sub-board. The test
//! runs against a throwaway copy of the board and never touches the
//! macro-board, so it is much cheaper than simulating each move.

use crate::cell::{Cell, Player};
use crate::grid::Board;
use crate::moves::Move;
use crate::state::GameState;

/// Would placing `player` at `mv` complete a row, column or diagonal of
/// the sub-board containing it?
pub fn is_winning_move(board: &Board, mv: Move, player: Player) -> bool {
    let token = Cell::Owned(player);
    let mut board = *board;
    let (x, y) = (mv.x as usize, mv.y as usize);
    board.set(x, y, token);

    let sx = x - x % 3;
    let sy = y - y % 3;
    let owned = |i: usize, j: usize| board.get(i, j) == token;

    (owned(sx, y) && owned(sx + 1, y) && owned(sx + 2, y))
        || (owned(x, sy) && owned(x, sy + 1) && owned(x, sy + 2))
        || (owned(sx, sy) && owned(sx + 1, sy + 1) && owned(sx + 2, sy + 2))
        || (owned(sx, sy + 2) && owned(sx + 1, sy + 1) && owned(sx + 2, sy))
}

/// Legal moves that immediately win a sub-board for `player`, in legal-move order.
pub fn winning_moves(state: &GameState, player: Player) -> Vec<Move> {
    let board = state.board();
    state
        .legal_moves()
        .into_iter()
        .filter(|&mv| is_winning_move(board, mv, player))
        .collect()
}

/// Same as [`winning_moves`] for the player who is not to move.
pub fn winning_moves_for_opponent(state: &GameState) -> Vec<Move> {
    winning_moves(state, state.current_player().opponent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MacroBoard;

    fn state_with(marks: &[(usize, usize, Player)], available: &[(usize, usize)]) -> GameState {
        let mut board = Board::new();
        for &(x, y, p) in marks {
            board.set(x, y, Cell::Owned(p));
        }
        let mut macro_board = MacroBoard::new();
        for &(x, y) in available {
            macro_board.set(x, y, Cell::Available);
        }
        GameState::from_parts(board, macro_board, marks.len() as u32, 0).unwrap()
    }

    #[test]
    fn test_finds_row_completion() {
        let state = state_with(
            &[(0, 0, Player::Zero), (5, 5, Player::One), (0, 1, Player::Zero), (8, 8, Player::One)],
            &[(0, 0)],
        );
        assert_eq!(winning_moves(&state, Player::Zero), vec![Move::new(0, 2)]);
        assert!(winning_moves(&state, Player::One).is_empty());
    }

    #[test]
    fn test_finds_anti_diagonal() {
        let state = state_with(
            &[(3, 8, Player::One), (4, 7, Player::One)],
            &[(1, 2)],
        );
        assert_eq!(winning_moves(&state, Player::One), vec![Move::new(5, 6)]);
    }

    #[test]
    fn test_opponent_uses_other_token() {
        // Zero to move; One threatens (7,4)
        let state = state_with(
            &[(6, 4, Player::One), (8, 4, Player::One)],
            &[(2, 1)],
        );
        assert_eq!(state.current_player(), Player::Zero);
        assert_eq!(winning_moves_for_opponent(&state), vec![Move::new(7, 4)]);
        assert!(winning_moves(&state, Player::Zero).is_empty());
    }

    #[test]
    fn test_ignores_unavailable_sub_boards() {
        let state = state_with(&[(0, 0, Player::Zero), (0, 1, Player::Zero)], &[(1, 1)]);
        assert!(winning_moves(&state, Player::Zero).is_empty());
    }

    #[test]
    fn test_does_not_mutate_state() {
        let state = state_with(&[(0, 0, Player::Zero), (0, 1, Player::Zero)], &[(0, 0)]);
        let before = state.clone();
        let _ = winning_moves(&state, Player::Zero);
        assert_eq!(state, before);
    }
}
