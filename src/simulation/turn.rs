//! Driving a single computer-controlled turn.

use serde::{Deserialize, Serialize};

use crate::core::{DieSource, GameError, PlayerId};
use crate::policy::{HoldPolicy, TurnContext};
use crate::rules::{HoldOutcome, PigGame};

/// How a turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEnding {
    /// Rolled the bust face; nothing banked.
    Bust,
    /// Banked `banked` points.
    Held { banked: u32, outcome: HoldOutcome },
}

/// What happened during one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub player: PlayerId,
    /// Every face rolled, including a final bust face.
    pub rolls: Vec<u8>,
    pub ending: TurnEnding,
}

impl TurnReport {
    /// Whether this turn won the game.
    #[must_use]
    pub fn won(&self) -> bool {
        matches!(
            self.ending,
            TurnEnding::Held {
                outcome: HoldOutcome::Win,
                ..
            }
        )
    }
}

/// Play the active seat's turn, asking `policy` before every roll.
///
/// The turn ends when the policy holds or the die busts. A policy that
/// never holds keeps rolling until it busts.
pub fn play_cpu_turn<D, P>(game: &mut PigGame<D>, policy: &P) -> Result<TurnReport, GameError>
where
    D: DieSource,
    P: HoldPolicy + ?Sized,
{
    let player = game.active_player();
    let bust_face = game.config().bust_face;
    let mut rolls = Vec::new();

    loop {
        let ctx = TurnContext::for_active(game);
        if ctx.turn_points > 0 && policy.should_hold(&ctx) {
            let outcome = game.hold()?;
            return Ok(TurnReport {
                player,
                rolls,
                ending: TurnEnding::Held {
                    banked: ctx.turn_points,
                    outcome,
                },
            });
        }

        let face = game.roll()?;
        rolls.push(face);
        if face == bust_face {
            return Ok(TurnReport {
                player,
                rolls,
                ending: TurnEnding::Bust,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, ScriptedDie};
    use crate::policy::{Difficulty, TieredPolicy};

    fn game(goal: u32, faces: impl IntoIterator<Item = u8>) -> PigGame<ScriptedDie> {
        PigGame::with_default_players(GameConfig::new().with_goal(goal), ScriptedDie::new(faces))
            .unwrap()
    }

    #[test]
    fn test_easy_holds_at_fifteen() {
        let mut g = game(100, [6, 6, 3, 6]);
        let report = play_cpu_turn(&mut g, &TieredPolicy::new(Difficulty::Easy)).unwrap();

        assert_eq!(report.player, PlayerId::FIRST);
        assert_eq!(report.rolls, vec![6, 6, 3]);
        assert_eq!(
            report.ending,
            TurnEnding::Held {
                banked: 15,
                outcome: HoldOutcome::Continue
            }
        );
        assert_eq!(g.score(PlayerId::FIRST), 15);
        assert_eq!(g.active_player(), PlayerId::SECOND);
    }

    #[test]
    fn test_bust_ends_turn() {
        let mut g = game(100, [4, 1]);
        let report = play_cpu_turn(&mut g, &TieredPolicy::new(Difficulty::Normal)).unwrap();

        assert_eq!(report.rolls, vec![4, 1]);
        assert_eq!(report.ending, TurnEnding::Bust);
        assert_eq!(g.score(PlayerId::FIRST), 0);
        assert_eq!(g.active_player(), PlayerId::SECOND);
    }

    #[test]
    fn test_winning_turn() {
        let mut g = game(10, [5, 5]);
        let report = play_cpu_turn(&mut g, &TieredPolicy::new(Difficulty::Normal)).unwrap();

        assert!(report.won());
        assert_eq!(g.winner(), Some(PlayerId::FIRST));
    }

    #[test]
    fn test_finished_game_is_an_error() {
        let mut g = game(2, [2]);
        play_cpu_turn(&mut g, &TieredPolicy::default()).unwrap();
        assert!(matches!(
            play_cpu_turn(&mut g, &TieredPolicy::default()),
            Err(GameError::GameOver { .. })
        ));
    }
}
