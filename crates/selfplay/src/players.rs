//! Bot construction for matches.
//!
//! Every bot in a game owns its own seeded generator so that a series of
//! games is reproducible when the search is capped by iteration count.

use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use uttt_core::{
    winning_moves, winning_moves_for_opponent, Bot, GameState, Move, Result, UtttError,
};
use uttt_mcts::{Mcts, MctsConfig, RandomPlayoutBot, RandomPlayoutConfig};

/// Available players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BotKind {
    /// Time-boxed UCT search with tactical playouts.
    Mcts,
    /// First move of the quickest random win.
    Playout,
    /// Take a sub-board win, else block one, else play randomly.
    Greedy,
    /// Uniformly random legal move.
    Random,
}

impl BotKind {
    pub fn label(self) -> &'static str {
        match self {
            BotKind::Mcts => "mcts",
            BotKind::Playout => "random-playout",
            BotKind::Greedy => "greedy",
            BotKind::Random => "random",
        }
    }
}

/// Search settings shared by every bot of a match.
///
/// Loaded from a JSON file when one is given; missing fields take their
/// defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    pub mcts: MctsConfig,
    pub playout: RandomPlayoutConfig,
}

impl BotSettings {
    /// Settings with the same wall-clock budget for both strategies.
    pub fn with_time_budget(time_budget_ms: u64) -> Self {
        Self {
            mcts: MctsConfig::with_time_budget(time_budget_ms),
            playout: RandomPlayoutConfig::with_time_budget(time_budget_ms),
        }
    }

    /// Settings capped by iteration count, for reproducible runs.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            mcts: MctsConfig::with_iterations(iterations),
            playout: RandomPlayoutConfig::with_rollouts(iterations),
        }
    }
}

/// Plays a uniformly random legal move.
pub struct UniformBot<R: Rng> {
    rng: R,
}

impl<R: Rng> UniformBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for UniformBot<R> {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, state: &GameState) -> Result<Move> {
        state
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(UtttError::NoLegalMoves)
    }
}

/// One-ply tactical player.
///
/// Completes a sub-board line if it can, otherwise occupies a cell that
/// would complete one for the opponent, otherwise moves at random.
pub struct GreedyBot<R: Rng> {
    rng: R,
}

impl<R: Rng> GreedyBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for GreedyBot<R> {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_move(&mut self, state: &GameState) -> Result<Move> {
        if let Some(&mv) = winning_moves(state, state.current_player()).first() {
            return Ok(mv);
        }
        if let Some(&mv) = winning_moves_for_opponent(state).first() {
            return Ok(mv);
        }
        state
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(UtttError::NoLegalMoves)
    }
}

/// Build a bot of the given kind seeded with `seed`.
pub fn build_bot(kind: BotKind, settings: &BotSettings, seed: u64) -> Box<dyn Bot> {
    let rng = ChaCha8Rng::seed_from_u64(seed);
    match kind {
        BotKind::Mcts => Box::new(Mcts::tactical(settings.mcts.clone(), rng)),
        BotKind::Playout => Box::new(RandomPlayoutBot::new(settings.playout.clone(), rng)),
        BotKind::Greedy => Box::new(GreedyBot::new(rng)),
        BotKind::Random => Box::new(UniformBot::new(rng)),
    }
}
