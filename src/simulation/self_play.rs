//! CPU-vs-CPU matches.
//!
//! Plays complete games between two tiered policies and summarizes them in
//! the shape the leaderboard records.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

use super::turn::play_cpu_turn;
use crate::core::{
    DieSource, GameConfig, GameError, GameRng, LeaderboardError, Player, PlayerId, PlayerPair,
    DEFAULT_GOAL,
};
use crate::leaderboard::{GameLogRecord, Leaderboard, PlayerKey};
use crate::policy::{Difficulty, TieredPolicy};
use crate::rules::PigGame;

/// Configuration for self-play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Target score for every match.
    pub goal: u32,

    /// Maximum turns per match (guards against policies that never win).
    /// 0 = unlimited.
    pub max_turns: u32,

    /// Seed offset (combined with match index for unique seeds).
    pub seed_offset: u64,

    /// Difficulty of the first and second seat.
    pub difficulties: PlayerPair<Difficulty>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            goal: DEFAULT_GOAL,
            max_turns: 1_000,
            seed_offset: 0,
            difficulties: PlayerPair::with_value(Difficulty::Normal),
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_goal(mut self, goal: u32) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_max_turns(mut self, max: u32) -> Self {
        self.max_turns = max;
        self
    }

    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    pub fn with_difficulties(mut self, first: Difficulty, second: Difficulty) -> Self {
        self.difficulties = PlayerPair::new(first, second);
        self
    }
}

/// Outcome of one simulated match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub players: PlayerPair<Player>,
    pub scores: PlayerPair<u32>,
    /// `None` if the turn limit was hit first.
    pub winner: Option<PlayerId>,
    pub turns: u32,
    pub duration: Duration,
}

impl MatchSummary {
    /// Register both players and record the result.
    ///
    /// Unfinished matches are not recorded and return `Ok(None)`. Seats whose
    /// names map to the same leaderboard id are rejected before anything is
    /// registered.
    pub fn record(&self, board: &mut Leaderboard) -> Result<Option<GameLogRecord>, LeaderboardError> {
        let Some(winner) = self.winner else {
            return Ok(None);
        };
        let loser = winner.other();

        let names = [self.players[winner].name.as_str(), self.players[loser].name.as_str()];
        ensure_distinct_ids(names)?;

        let winner_id = board.register_player(names[0])?;
        let loser_id = board.register_player(names[1])?;
        board
            .record_result(
                &winner_id,
                &loser_id,
                self.scores[winner],
                self.scores[loser],
                self.duration.as_secs(),
            )
            .map(Some)
    }
}

/// Check that two seat names would be recorded as different players.
pub fn ensure_distinct_ids(names: [&str; 2]) -> Result<[PlayerKey; 2], LeaderboardError> {
    let [first, second] = names;
    let first = PlayerKey::canonicalize(first).ok_or(LeaderboardError::EmptyName)?;
    let second = PlayerKey::canonicalize(second).ok_or(LeaderboardError::EmptyName)?;
    if first == second {
        return Err(LeaderboardError::SelfPlay { id: first.to_string() });
    }
    Ok([first, second])
}

/// Runs matches between two tiered policies.
#[derive(Clone, Debug)]
pub struct MatchRunner {
    config: SelfPlayConfig,
    policies: PlayerPair<TieredPolicy>,
}

impl MatchRunner {
    pub fn new(config: SelfPlayConfig) -> Self {
        let policies = PlayerPair::new(
            TieredPolicy::new(config.difficulties[PlayerId::FIRST]),
            TieredPolicy::new(config.difficulties[PlayerId::SECOND]),
        );
        Self { config, policies }
    }

    #[must_use]
    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    /// Play `game` until it is won or the turn limit is reached.
    ///
    /// Returns the winner, if any.
    pub fn run<D: DieSource>(&self, game: &mut PigGame<D>) -> Result<Option<PlayerId>, GameError> {
        while !game.is_over() {
            if self.config.max_turns > 0 && game.turns() >= self.config.max_turns {
                debug!(turns = game.turns(), "turn limit reached");
                break;
            }
            let policy = &self.policies[game.active_player()];
            play_cpu_turn(game, policy)?;
        }
        Ok(game.winner())
    }

    /// Play one seeded match between `names`.
    pub fn play_match(&self, names: [&str; 2], seed: u64) -> Result<MatchSummary, GameError> {
        let config = GameConfig::new().with_goal(self.config.goal);
        let players = names.map(Player::computer);
        let mut game = PigGame::new(config, players, GameRng::new(seed))?;

        let started = Instant::now();
        let winner = self.run(&mut game)?;
        let duration = started.elapsed();

        debug!(seed, ?winner, turns = game.turns(), "match finished");

        Ok(MatchSummary {
            seed,
            players: game.players().clone(),
            scores: game.scores().clone(),
            winner,
            turns: game.turns(),
            duration,
        })
    }

    /// Play `count` matches with seeds `seed_offset..seed_offset + count`.
    pub fn play_matches(&self, names: [&str; 2], count: usize) -> Result<Vec<MatchSummary>, GameError> {
        (0..count)
            .map(|i| {
                let seed = self.config.seed_offset.wrapping_add(i as u64);
                self.play_match(names, seed)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedDie;

    #[test]
    fn test_default_config() {
        let config = SelfPlayConfig::default();
        assert_eq!(config.goal, 100);
        assert_eq!(config.max_turns, 1_000);
        assert_eq!(config.difficulties.into_array(), [Difficulty::Normal; 2]);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SelfPlayConfig::new()
            .with_goal(30)
            .with_seed_offset(9)
            .with_difficulties(Difficulty::Easy, Difficulty::Hard);

        assert_eq!(config.goal, 30);
        assert_eq!(config.seed_offset, 9);
        assert_eq!(config.difficulties[PlayerId::SECOND], Difficulty::Hard);
    }

    #[test]
    fn test_run_with_scripted_die() {
        // Easy holds at 15: first seat banks 6+6+3, second busts, first banks again.
        let runner = MatchRunner::new(
            SelfPlayConfig::new().with_difficulties(Difficulty::Easy, Difficulty::Easy),
        );
        let mut game = PigGame::with_default_players(
            GameConfig::new().with_goal(30),
            ScriptedDie::new([6, 6, 3, 1, 6, 6, 3]),
        )
        .unwrap();

        let winner = runner.run(&mut game).unwrap();
        assert_eq!(winner, Some(PlayerId::FIRST));
        assert_eq!(game.scores().as_array(), &[30, 0]);
        assert_eq!(game.turns(), 3);
    }

    #[test]
    fn test_turn_limit() {
        let runner = MatchRunner::new(SelfPlayConfig::new().with_max_turns(2));
        let mut game =
            PigGame::with_default_players(GameConfig::new(), ScriptedDie::new([])).unwrap();

        assert_eq!(runner.run(&mut game).unwrap(), None);
        assert_eq!(game.turns(), 2);
    }

    #[test]
    fn test_distinct_ids() {
        let [a, b] = ensure_distinct_ids(["Ann", "Ben"]).unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("ann", "ben"));

        assert!(matches!(
            ensure_distinct_ids(["Bob", " bob "]),
            Err(LeaderboardError::SelfPlay { ref id }) if id == "bob"
        ));
        assert!(matches!(ensure_distinct_ids(["Bob", ""]), Err(LeaderboardError::EmptyName)));
    }

    #[test]
    fn test_seeded_matches_are_reproducible() {
        let runner = MatchRunner::new(SelfPlayConfig::new().with_goal(50));
        let a = runner.play_match(["Ann", "Ben"], 7).unwrap();
        let b = runner.play_match(["Ann", "Ben"], 7).unwrap();

        assert_eq!(a.scores, b.scores);
        assert_eq!(a.winner, b.winner);
        assert_eq!(a.turns, b.turns);
        assert!(a.winner.is_some());
    }
}
