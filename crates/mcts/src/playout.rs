//! Playout policies for MCTS.
//!
//! The `Playout` trait lets the search swap how leaf positions are scored:
//! - `TacticalPlayout` plays random moves but stops as soon as either side
//!   can win a sub-board immediately
//! - `UniformPlayout` plays random moves until the rule engine ends the game

use rand::Rng;
use uttt_core::tactics::is_winning_move;
use uttt_core::{GameState, Outcome, Simulator};

/// Trait for estimating the outcome of a position.
pub trait Playout {
    /// Play out `state` and report how the game ended.
    ///
    /// Never mutates `state`; all moves are applied to a private copy.
    fn playout<R: Rng>(&self, state: &GameState, rng: &mut R) -> Outcome;
}

/// Random playout truncated by the immediate tactics check.
///
/// Before each random move: if the player to move can complete a sub-board
/// line they are scored the winner; otherwise if the opponent could, the
/// opponent is. No legal moves left scores a tie.
#[derive(Clone, Copy, Debug, Default)]
pub struct TacticalPlayout;

impl Playout for TacticalPlayout {
    fn playout<R: Rng>(&self, state: &GameState, rng: &mut R) -> Outcome {
        let mut sim = Simulator::new(state);

        loop {
            if let Some(outcome) = sim.status().outcome() {
                return outcome;
            }

            let moves = sim.legal_moves();
            if moves.is_empty() {
                return Outcome::Tie;
            }

            let mover = sim.current_player();
            let board = sim.state().board();
            if moves.iter().any(|&mv| is_winning_move(board, mv, mover)) {
                return Outcome::Win(mover);
            }
            if moves
                .iter()
                .any(|&mv| is_winning_move(board, mv, mover.opponent()))
            {
                return Outcome::Win(mover.opponent());
            }

            let mv = moves[rng.gen_range(0..moves.len())];
            sim.apply_move(mv)
                .expect("BUG: rule engine rejected one of its own legal moves");
        }
    }
}

/// Uniformly random moves until the game ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformPlayout;

impl Playout for UniformPlayout {
    fn playout<R: Rng>(&self, state: &GameState, rng: &mut R) -> Outcome {
        let mut sim = Simulator::new(state);

        loop {
            if let Some(outcome) = sim.status().outcome() {
                return outcome;
            }

            let moves = sim.legal_moves();
            if moves.is_empty() {
                return Outcome::Tie;
            }

            let mv = moves[rng.gen_range(0..moves.len())];
            sim.apply_move(mv)
                .expect("BUG: rule engine rejected one of its own legal moves");
        }
    }
}
