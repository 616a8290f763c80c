//! Move search for ultimate tic-tac-toe.
//!
//! This crate provides two strategies built on the `uttt_core` rule engine:
//!
//! - **MCTS**: UCT selection over a per-decision arena tree, with playouts
//!   cut short by the immediate tactics check
//! - **Random playout**: whole random games, keeping the first move of the
//!   quickest win
//!
//! Both are bounded by a wall-clock budget, optionally capped by an
//! iteration count, and take an explicit random number generator.
//!
//! # Example
//!
//! ```
//! use uttt_core::{Bot, GameState};
//! use uttt_mcts::{Mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let state = GameState::new();
//!
//! let config = MctsConfig::with_iterations(100);
//! let mut mcts = Mcts::tactical(config, ChaCha8Rng::seed_from_u64(42));
//!
//! let result = mcts.search(&state).unwrap();
//! println!("Best move: {}", result.best_move);
//! assert!(state.legal_moves().contains(&mcts.choose_move(&state).unwrap()));
//! ```

pub mod baseline;
mod budget;
pub mod config;
mod node;
pub mod opening;
pub mod playout;
pub mod search;
mod tree;

pub use baseline::{PlayoutSummary, RandomPlayoutBot};
pub use budget::Budget;
pub use config::{MctsConfig, RandomPlayoutConfig};
pub use playout::{Playout, TacticalPlayout, UniformPlayout};
pub use search::{ChildStats, Decision, Mcts, SearchResult};
