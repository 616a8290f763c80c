//! Fixed opening preference: center, then corners, then edges.

use uttt_core::{Cell, GameState, Move};

/// Number of opening moves answered from the book.
pub const OPENING_MOVES: u32 = 3;

/// Preference order, used both for choosing the sub-board and the cell in it.
const PREFERRED: [(u8, u8); 9] = [
    (1, 1),
    (0, 0),
    (2, 2),
    (0, 2),
    (2, 0),
    (0, 1),
    (2, 1),
    (1, 0),
    (1, 2),
];

/// Book move for `state`, if it is still early and a preferred cell is free.
pub fn opening_move(state: &GameState) -> Option<Move> {
    if state.move_number() >= OPENING_MOVES || state.is_terminal() {
        return None;
    }

    PREFERRED
        .iter()
        .filter(|&&(mx, my)| state.macro_board().get(mx as usize, my as usize) == Cell::Available)
        .find_map(|&sub_board| {
            PREFERRED
                .iter()
                .map(|&local| Move::from_parts(sub_board, local))
                .find(|mv| state.board().get(mv.x as usize, mv.y as usize) == Cell::Empty)
        })
}
