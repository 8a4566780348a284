//! Hold/continue decisions for computer-controlled seats.
//!
//! Policies are trait-based so drivers can plug in their own:
//! - `HoldPolicy`: decide whether to bank the turn total or roll again
//! - `TieredPolicy`: fixed-threshold policy chosen by `Difficulty`

mod tiered;

pub use tiered::{
    Difficulty, TieredPolicy, EASY_HOLD_AT, EASY_TRAILING_BONUS, HARD_HOLD_MARGIN,
    HARD_TRAILING_BONUS, NORMAL_HOLD_AT, NORMAL_TRAILING_BONUS, TRAILING_MARGIN,
};

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::rules::PigGame;

/// Everything a policy may look at when deciding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnContext {
    /// Unbanked points this turn.
    pub turn_points: u32,
    /// Deciding player's banked score.
    pub own_total: u32,
    /// Opponent's banked score.
    pub opponent_total: u32,
    /// Target score.
    pub goal: u32,
}

impl TurnContext {
    pub fn new(turn_points: u32, own_total: u32, opponent_total: u32, goal: u32) -> Self {
        Self {
            turn_points,
            own_total,
            opponent_total,
            goal,
        }
    }

    /// Context for the seat whose turn it is.
    pub fn for_active<D>(game: &PigGame<D>) -> Self {
        let me: PlayerId = game.active_player();
        Self::new(game.turn_total(), game.score(me), game.score(me.other()), game.goal())
    }

    /// Banked score plus the turn total.
    #[must_use]
    pub fn potential_total(&self) -> u32 {
        self.own_total.saturating_add(self.turn_points)
    }

    /// Whether holding now reaches the goal.
    #[must_use]
    pub fn can_win_now(&self) -> bool {
        self.potential_total() >= self.goal
    }

    /// Whether the deciding player is behind by more than [`TRAILING_MARGIN`].
    #[must_use]
    pub fn is_trailing(&self) -> bool {
        self.own_total.saturating_add(TRAILING_MARGIN) < self.opponent_total
    }
}

/// Decides whether a computer seat banks its turn total.
///
/// Implementations must be deterministic: the same context always yields the
/// same answer.
pub trait HoldPolicy {
    /// `true` to hold, `false` to roll again.
    fn should_hold(&self, ctx: &TurnContext) -> bool;
}

impl<P: HoldPolicy + ?Sized> HoldPolicy for &P {
    fn should_hold(&self, ctx: &TurnContext) -> bool {
        (**self).should_hold(ctx)
    }
}

impl<P: HoldPolicy + ?Sized> HoldPolicy for Box<P> {
    fn should_hold(&self, ctx: &TurnContext) -> bool {
        (**self).should_hold(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, ScriptedDie};

    #[test]
    fn test_context_for_active() {
        let mut game =
            PigGame::with_default_players(GameConfig::new().with_goal(50), ScriptedDie::new([4, 6, 3]))
                .unwrap();
        game.roll().unwrap();
        game.hold().unwrap();
        game.roll().unwrap();
        game.roll().unwrap();

        let ctx = TurnContext::for_active(&game);
        assert_eq!(ctx, TurnContext::new(9, 0, 4, 50));
    }

    #[test]
    fn test_trailing_and_win_checks() {
        assert!(TurnContext::new(0, 10, 26, 100).is_trailing());
        assert!(!TurnContext::new(0, 10, 25, 100).is_trailing());
        assert!(TurnContext::new(10, 90, 0, 100).can_win_now());
        assert!(!TurnContext::new(9, 90, 0, 100).can_win_now());
    }
}
