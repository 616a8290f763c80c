//! Game outcome and reward types with enforced invariants.
//!
//! - Outcome: how a finished game (or a truncated playout) ended
//! - Reward: playout result in [0, 1] from one player's perspective

use crate::cell::Player;
use crate::{Result, UtttError};

/// How a game ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Outcome {
    Win(Player),
    Tie,
}

impl Outcome {
    /// The winning player, if the game was not a tie.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            Outcome::Tie => None,
        }
    }
}

/// A playout reward.
///
/// Invariant: value is in range [0, 1] where:
/// - 1 means the perspective player won
/// - 0 means the perspective player lost
/// - 0.5 is a tie
///
/// # Example
/// ```
/// use uttt_core::{Outcome, Player, Reward};
///
/// let reward = Reward::for_player(Outcome::Win(Player::Zero), Player::One);
/// assert_eq!(reward, Reward::LOSS);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Reward(f64);

impl Reward {
    /// Reward for a win.
    pub const WIN: Self = Self(1.0);

    /// Reward for a loss.
    pub const LOSS: Self = Self(0.0);

    /// Reward for a tie.
    pub const TIE: Self = Self(0.5);

    /// Create a new reward.
    ///
    /// # Errors
    /// Returns `UtttError::InvalidReward` if the value is outside [0, 1].
    pub fn new(value: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(UtttError::InvalidReward(format!(
                "reward {} is outside range [0, 1]",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Score `outcome` from `player`'s point of view.
    pub fn for_player(outcome: Outcome, player: Player) -> Self {
        match outcome {
            Outcome::Win(winner) if winner == player => Self::WIN,
            Outcome::Win(_) => Self::LOSS,
            Outcome::Tie => Self::TIE,
        }
    }

    /// Get the underlying value.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Reward {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<Reward> for f64 {
    fn from(r: Reward) -> f64 {
        r.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_new_valid() {
        assert!(Reward::new(0.0).is_ok());
        assert!(Reward::new(0.5).is_ok());
        assert!(Reward::new(1.0).is_ok());
    }

    #[test]
    fn test_reward_new_invalid() {
        assert!(Reward::new(-0.1).is_err());
        assert!(Reward::new(1.1).is_err());
        assert!(Reward::new(f64::NAN).is_err());
    }

    #[test]
    fn test_reward_for_player() {
        let win = Outcome::Win(Player::One);
        assert_eq!(Reward::for_player(win, Player::One), Reward::WIN);
        assert_eq!(Reward::for_player(win, Player::Zero), Reward::LOSS);
        assert_eq!(Reward::for_player(Outcome::Tie, Player::Zero), Reward::TIE);
    }

    #[test]
    fn test_outcome_winner() {
        assert_eq!(Outcome::Win(Player::Zero).winner(), Some(Player::Zero));
        assert_eq!(Outcome::Tie.winner(), None);
    }
}
