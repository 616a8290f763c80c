//! Random-playout baseline.
//!
//! Plays complete random games from the current position until the budget
//! runs out. Among the games the player to move went on to win, the first
//! move of the shortest one is played.

use crate::config::RandomPlayoutConfig;
use crate::search::Decision;
use rand::Rng;
use std::time::Duration;
use tracing::debug;
use uttt_core::{Bot, GameState, GameStatus, Move, Result, Simulator, UtttError};

/// Result of a random-playout decision.
#[derive(Clone, Debug)]
pub struct PlayoutSummary {
    pub best_move: Move,

    /// `Search` if a winning rollout was found, else `Fallback`.
    pub decision: Decision,

    /// Rollouts played.
    pub rollouts: usize,

    /// Rollouts won by the player to move.
    pub wins: usize,

    /// Moves taken by the shortest winning rollout, including the first.
    pub fewest_moves_to_win: Option<u32>,

    pub elapsed: Duration,
}

/// Bot that picks the opening move of the quickest random win.
pub struct RandomPlayoutBot<R: Rng> {
    config: RandomPlayoutConfig,
    rng: R,
}

impl<R: Rng> RandomPlayoutBot<R> {
    pub fn new(config: RandomPlayoutConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Run rollouts from `state` until the budget is spent.
    ///
    /// # Errors
    /// Returns `UtttError::NoLegalMoves` if there is nothing to play.
    pub fn run(&mut self, state: &GameState) -> Result<PlayoutSummary> {
        let budget = self.config.start_budget();

        let legal_moves = state.legal_moves();
        if legal_moves.is_empty() {
            return Err(UtttError::NoLegalMoves);
        }

        let tracked = state.current_player();
        let mut best: Option<(Move, u32)> = None;
        let mut rollouts = 0;
        let mut wins = 0;

        while !budget.exhausted(rollouts) {
            let (first_move, moves_played, status) = self.rollout(state, &legal_moves);
            rollouts += 1;

            if status == GameStatus::Win(tracked) {
                wins += 1;
                if best.map_or(true, |(_, fewest)| moves_played < fewest) {
                    best = Some((first_move, moves_played));
                }
            }
        }

        let (best_move, decision) = match best {
            Some((mv, _)) => (mv, Decision::Search),
            None => (
                legal_moves[self.rng.gen_range(0..legal_moves.len())],
                Decision::Fallback,
            ),
        };

        let summary = PlayoutSummary {
            best_move,
            decision,
            rollouts,
            wins,
            fewest_moves_to_win: best.map(|(_, n)| n),
            elapsed: budget.elapsed(),
        };

        debug!(
            best = %summary.best_move,
            decision = ?summary.decision,
            rollouts,
            wins,
            fewest_moves_to_win = ?summary.fewest_moves_to_win,
            "random playout search complete"
        );

        Ok(summary)
    }

    /// Play one uniformly random game to the end.
    ///
    /// Returns the first move, the number of moves played and the final status.
    fn rollout(&mut self, state: &GameState, legal_moves: &[Move]) -> (Move, u32, GameStatus) {
        let mut sim = Simulator::new(state);
        let first_move = legal_moves[self.rng.gen_range(0..legal_moves.len())];
        let mut mv = first_move;
        let mut moves_played = 0;

        loop {
            sim.apply_move(mv)
                .expect("BUG: rule engine rejected one of its own legal moves");
            moves_played += 1;

            let moves = sim.legal_moves();
            if !sim.status().is_active() || moves.is_empty() {
                return (first_move, moves_played, sim.status());
            }
            mv = moves[self.rng.gen_range(0..moves.len())];
        }
    }
}

impl<R: Rng> Bot for RandomPlayoutBot<R> {
    fn name(&self) -> &str {
        "random-playout"
    }

    fn choose_move(&mut self, state: &GameState) -> Result<Move> {
        self.run(state).map(|summary| summary.best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uttt_core::{Board, Cell, MacroBoard, Player};

    fn bot(config: RandomPlayoutConfig, seed: u64) -> RandomPlayoutBot<ChaCha8Rng> {
        RandomPlayoutBot::new(config, ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_returns_legal_move() {
        let state = GameState::new();
        let summary = bot(RandomPlayoutConfig::with_rollouts(50), 42)
            .run(&state)
            .unwrap();

        assert!(state.legal_moves().contains(&summary.best_move));
        assert_eq!(summary.rollouts, 50);
        assert!(summary.wins <= summary.rollouts);
    }

    #[test]
    fn test_winning_rollout_is_selected() {
        let state = GameState::new();
        let summary = bot(RandomPlayoutConfig::with_rollouts(200), 7)
            .run(&state)
            .unwrap();

        // Two hundred random games from the start virtually always include a win.
        assert!(summary.wins > 0);
        assert_eq!(summary.decision, Decision::Search);
        let fewest = summary.fewest_moves_to_win.unwrap();
        assert!((1..=81).contains(&fewest));
    }

    #[test]
    fn test_macro_win_in_one_takes_one_move() {
        // (2,6) is Zero's only line in sub-board (0,2) and completes macro column 0.
        let z = Cell::Owned(Player::Zero);
        let mut board = Board::new();
        board.set(0, 6, z);
        board.set(1, 6, z);
        board.set(2, 7, z);
        let mut macro_board = MacroBoard::new();
        macro_board.set(0, 0, z);
        macro_board.set(0, 1, z);
        macro_board.set(0, 2, Cell::Available);
        let state = GameState::from_parts(board, macro_board, 10, 5).unwrap();

        let summary = bot(RandomPlayoutConfig::with_rollouts(100), 3)
            .run(&state)
            .unwrap();

        assert_eq!(summary.fewest_moves_to_win, Some(1));
        assert_eq!(summary.best_move, Move::new(2, 6));
    }

    #[test]
    fn test_zero_budget_falls_back() {
        let state = GameState::new();
        let summary = bot(RandomPlayoutConfig::with_time_budget(0), 1)
            .run(&state)
            .unwrap();

        assert_eq!(summary.rollouts, 0);
        assert_eq!(summary.decision, Decision::Fallback);
        assert!(state.legal_moves().contains(&summary.best_move));
    }

    #[test]
    fn test_no_legal_moves() {
        let state =
            GameState::from_parts(Board::new(), MacroBoard::filled(Cell::Tie), 50, 25).unwrap();
        let mut bot = bot(RandomPlayoutConfig::with_rollouts(5), 1);
        assert_eq!(bot.choose_move(&state), Err(UtttError::NoLegalMoves));
    }
}
