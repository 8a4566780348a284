//! Fixed-threshold hold policy.
//!
//! | Tier | Holds once | Trailing bonus |
//! | --- | --- | --- |
//! | easy | turn points >= 15 | +0 |
//! | normal | turn points >= 20 | +5 |
//! | hard | own total + turn points >= goal - 10 | +5 |
//!
//! "Trailing" means `own_total + 15 < opponent_total`; the bonus raises the
//! tier's threshold by that many points. Every tier holds when holding wins
//! and never holds with zero turn points.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{HoldPolicy, TurnContext};
use crate::core::PolicyError;

/// Easy tier: hold at this many turn points.
pub const EASY_HOLD_AT: u32 = 15;

/// Normal tier: hold at this many turn points.
pub const NORMAL_HOLD_AT: u32 = 20;

/// Hard tier: hold once within this many points of the goal.
pub const HARD_HOLD_MARGIN: u32 = 10;

/// Deficit beyond which a player counts as trailing.
pub const TRAILING_MARGIN: u32 = 15;

/// Threshold increase per tier while trailing.
pub const EASY_TRAILING_BONUS: u32 = 0;
pub const NORMAL_TRAILING_BONUS: u32 = 5;
pub const HARD_TRAILING_BONUS: u32 = 5;

/// Difficulty tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Threshold increase applied while trailing.
    #[must_use]
    pub const fn trailing_bonus(self) -> u32 {
        match self {
            Difficulty::Easy => EASY_TRAILING_BONUS,
            Difficulty::Normal => NORMAL_TRAILING_BONUS,
            Difficulty::Hard => HARD_TRAILING_BONUS,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = PolicyError;

    /// Case-insensitive; `medium` means normal and `smart` means hard.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" | "medium" => Ok(Difficulty::Normal),
            "hard" | "smart" => Ok(Difficulty::Hard),
            _ => Err(PolicyError::UnknownDifficulty { name: s.to_string() }),
        }
    }
}

/// Stateless policy parameterized by a [`Difficulty`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredPolicy {
    difficulty: Difficulty,
}

impl TieredPolicy {
    #[must_use]
    pub const fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    /// Build from a tier name, rejecting unknown names.
    pub fn from_name(name: &str) -> Result<Self, PolicyError> {
        name.parse().map(Self::new)
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Decide from raw numbers.
    #[must_use]
    pub fn decide(&self, turn_points: u32, own_total: u32, opponent_total: u32, goal: u32) -> bool {
        self.should_hold(&TurnContext::new(turn_points, own_total, opponent_total, goal))
    }
}

impl HoldPolicy for TieredPolicy {
    fn should_hold(&self, ctx: &TurnContext) -> bool {
        if ctx.turn_points == 0 {
            return false;
        }
        if ctx.can_win_now() {
            return true;
        }

        let bonus = if ctx.is_trailing() {
            self.difficulty.trailing_bonus()
        } else {
            0
        };

        match self.difficulty {
            Difficulty::Easy => ctx.turn_points >= EASY_HOLD_AT + bonus,
            Difficulty::Normal => ctx.turn_points >= NORMAL_HOLD_AT + bonus,
            Difficulty::Hard => {
                ctx.potential_total().saturating_add(HARD_HOLD_MARGIN)
                    >= ctx.goal.saturating_add(bonus)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("Normal".parse::<Difficulty>().unwrap(), Difficulty::Normal);
        assert_eq!("medium".parse::<Difficulty>().unwrap(), Difficulty::Normal);
        assert_eq!(" HARD ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("smart".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    }

    #[test]
    fn test_unknown_tier_rejected() {
        assert_eq!(
            TieredPolicy::from_name("unknown"),
            Err(PolicyError::UnknownDifficulty { name: "unknown".into() })
        );
    }

    #[test]
    fn test_tier_thresholds() {
        let cases = [
            ("easy", 15, 0, 0, 100, true),
            ("easy", 14, 0, 0, 100, false),
            ("medium", 20, 0, 0, 100, true),
            ("medium", 19, 0, 0, 100, false),
            ("hard", 5, 80, 0, 100, false),
            ("hard", 15, 85, 0, 100, true),
            ("hard", 10, 80, 0, 100, true),
        ];

        for (tier, turn, own, opp, goal, expected) in cases {
            let policy = TieredPolicy::from_name(tier).unwrap();
            assert_eq!(
                policy.decide(turn, own, opp, goal),
                expected,
                "{tier} turn={turn} own={own} opp={opp} goal={goal}"
            );
        }
    }

    #[test]
    fn test_always_takes_the_win() {
        for difficulty in Difficulty::ALL {
            let policy = TieredPolicy::new(difficulty);
            assert!(policy.decide(2, 98, 99, 100), "{difficulty}");
        }
    }

    #[test]
    fn test_never_holds_zero() {
        for difficulty in Difficulty::ALL {
            let policy = TieredPolicy::new(difficulty);
            assert!(!policy.decide(0, 95, 0, 100), "{difficulty}");
        }
    }

    #[test]
    fn test_trailing_raises_threshold() {
        let normal = TieredPolicy::new(Difficulty::Normal);
        assert!(normal.decide(20, 0, 15, 100));
        assert!(!normal.decide(20, 0, 16, 100));
        assert!(normal.decide(25, 0, 16, 100));

        let easy = TieredPolicy::new(Difficulty::Easy);
        assert!(easy.decide(15, 0, 50, 100));

        let hard = TieredPolicy::new(Difficulty::Hard);
        assert!(hard.decide(20, 70, 0, 100));
        assert!(!hard.decide(20, 70, 90, 100));
        assert!(hard.decide(25, 70, 90, 100));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>().unwrap(), difficulty);
        }
    }
}
