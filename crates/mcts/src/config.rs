//! Search configuration parameters.
//!
//! Both strategies are bounded by wall-clock time. An optional iteration
//! cap makes seeded runs reproducible regardless of machine speed.

use crate::budget::Budget;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-move time budget in milliseconds.
pub const DEFAULT_TIME_BUDGET_MS: u64 = 1000;

/// Default UCT exploration constant.
pub const DEFAULT_EXPLORATION: f64 = 1.41;

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Wall-clock budget per decision.
    pub time_budget_ms: u64,

    /// Exploration constant `C` in `mean + C * sqrt(ln(N_parent) / N_child)`.
    pub exploration: f64,

    /// Stop after this many iterations even if time remains.
    pub max_iterations: Option<usize>,

    /// Play the fixed center/corner/edge preference for the first moves
    /// of the game instead of searching.
    pub opening_book: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            exploration: DEFAULT_EXPLORATION,
            max_iterations: None,
            opening_book: true,
        }
    }
}

impl MctsConfig {
    /// Create a config with the given time budget.
    pub fn with_time_budget(time_budget_ms: u64) -> Self {
        Self {
            time_budget_ms,
            ..Default::default()
        }
    }

    /// Create a config bounded only by iteration count.
    pub fn with_iterations(max_iterations: usize) -> Self {
        Self {
            time_budget_ms: u64::MAX,
            max_iterations: Some(max_iterations),
            ..Default::default()
        }
    }

    /// Small, reproducible search without the opening book.
    pub fn for_testing() -> Self {
        Self {
            opening_book: false,
            ..Self::with_iterations(200)
        }
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// Start the clock for one decision.
    pub fn start_budget(&self) -> Budget {
        Budget::start(self.time_budget(), self.max_iterations)
    }
}

/// Random-playout baseline configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomPlayoutConfig {
    /// Wall-clock budget per decision.
    pub time_budget_ms: u64,

    /// Stop after this many rollouts even if time remains.
    pub max_rollouts: Option<usize>,
}

impl Default for RandomPlayoutConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            max_rollouts: None,
        }
    }
}

impl RandomPlayoutConfig {
    pub fn with_time_budget(time_budget_ms: u64) -> Self {
        Self {
            time_budget_ms,
            ..Default::default()
        }
    }

    pub fn with_rollouts(max_rollouts: usize) -> Self {
        Self {
            time_budget_ms: u64::MAX,
            max_rollouts: Some(max_rollouts),
        }
    }

    pub fn start_budget(&self) -> Budget {
        Budget::start(Duration::from_millis(self.time_budget_ms), self.max_rollouts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.time_budget_ms, 1000);
        assert!((config.exploration - 1.41).abs() < 1e-9);
        assert_eq!(config.max_iterations, None);
        assert!(config.opening_book);
    }

    #[test]
    fn test_with_iterations() {
        let config = MctsConfig::with_iterations(100);
        assert_eq!(config.max_iterations, Some(100));
        assert!((config.exploration - DEFAULT_EXPLORATION).abs() < 1e-9);
    }

    #[test]
    fn test_for_testing() {
        let config = MctsConfig::for_testing();
        assert!(!config.opening_book);
        assert_eq!(config.max_iterations, Some(200));
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: MctsConfig = serde_json::from_str(r#"{"time_budget_ms": 250}"#).unwrap();
        assert_eq!(config.time_budget_ms, 250);
        assert!(config.opening_book);

        let baseline: RandomPlayoutConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(baseline, RandomPlayoutConfig::default());
    }

    #[test]
    fn test_with_rollouts() {
        let config = RandomPlayoutConfig::with_rollouts(10);
        assert_eq!(config.max_rollouts, Some(10));
    }
}
