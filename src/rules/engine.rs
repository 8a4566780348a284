//! Pig turn and scoring state machine.
//!
//! A `PigGame` models exactly one match between two seats:
//!
//! - `roll`: add the face to the turn total, or bust on the losing face
//!   (turn total discarded, turn passes)
//! - `hold`: bank the turn total; reaching the goal ends the game with the
//!   winner still active, otherwise the turn passes
//! - `switch_turn`: pass the turn without banking
//!
//! Once a hold reaches the goal the game is `Won` and every mutating call
//! returns [`GameError::GameOver`]. Queries keep working.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{DieSource, GameConfig, GameError, Player, PlayerId, PlayerPair};

/// Whether a match is still being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Rolls and holds are accepted.
    InProgress,
    /// Terminal. The seat that reached the goal.
    Won(PlayerId),
}

/// Result of a successful hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldOutcome {
    /// Points banked, turn passed to the other seat.
    Continue,
    /// Points banked and the goal reached. The winner stays active.
    Win,
}

/// Serializable view of a match for status displays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub goal: u32,
    pub players: PlayerPair<Player>,
    pub scores: PlayerPair<u32>,
    pub active: PlayerId,
    pub turn_total: u32,
    /// Faces rolled so far this turn.
    pub turn_rolls: Vec<u8>,
    pub status: GameStatus,
}

/// One match of Pig.
///
/// Generic over the die so tests can inject a [`ScriptedDie`](crate::core::ScriptedDie).
#[derive(Clone, Debug)]
pub struct PigGame<D> {
    config: GameConfig,
    players: PlayerPair<Player>,
    scores: PlayerPair<u32>,
    turn_total: u32,
    turn_rolls: SmallVec<[u8; 8]>,
    active: PlayerId,
    status: GameStatus,
    turns: u32,
    die: D,
}

impl<D: DieSource> PigGame<D> {
    /// Create a game between exactly two players.
    ///
    /// The configuration, the player count and every name are checked before
    /// any state is built.
    pub fn new<P>(
        config: GameConfig,
        players: impl IntoIterator<Item = P>,
        die: D,
    ) -> Result<Self, GameError>
    where
        P: Into<Player>,
    {
        config.validate()?;

        let players: Vec<Player> = players.into_iter().map(Into::into).collect();
        let [first, second]: [Player; 2] = players
            .try_into()
            .map_err(|p: Vec<Player>| GameError::PlayerCount { got: p.len() })?;

        for (slot, player) in [(PlayerId::FIRST, &first), (PlayerId::SECOND, &second)] {
            if player.name.trim().is_empty() {
                return Err(GameError::EmptyPlayerName { slot });
            }
        }

        debug!(goal = config.goal, first = %first.name, second = %second.name, "new game");

        Ok(Self {
            config,
            players: PlayerPair::new(first, second),
            scores: PlayerPair::with_value(0),
            turn_total: 0,
            turn_rolls: SmallVec::new(),
            active: PlayerId::FIRST,
            status: GameStatus::InProgress,
            turns: 0,
            die,
        })
    }

    /// Create a game between "Player 1" and "Player 2".
    pub fn with_default_players(config: GameConfig, die: D) -> Result<Self, GameError> {
        Self::new(config, ["Player 1", "Player 2"], die)
    }

    // === Play ===

    /// Roll the die for the active player and return the face.
    ///
    /// On the bust face the turn total is discarded and the other seat
    /// becomes active; callers detect a bust by comparing the returned face
    /// with the configured bust face. A face outside `1..=faces` from the die
    /// source is rejected with [`GameError::InvalidRoll`] and changes nothing.
    pub fn roll(&mut self) -> Result<u8, GameError> {
        self.ensure_in_progress()?;

        let faces = self.config.faces;
        let face = self.die.roll(faces);
        if !(1..=faces).contains(&face) {
            return Err(GameError::InvalidRoll { face, faces });
        }
        if face == self.config.bust_face {
            debug!(player = %self.active, face, lost = self.turn_total, "bust");
            self.end_turn();
        } else {
            self.turn_total = self.turn_total.saturating_add(u32::from(face));
            self.turn_rolls.push(face);
            debug!(player = %self.active, face, turn_total = self.turn_total, "rolled");
        }

        Ok(face)
    }

    /// Bank the turn total into the active player's score.
    pub fn hold(&mut self) -> Result<HoldOutcome, GameError> {
        self.ensure_in_progress()?;

        let player = self.active;
        let banked = self.turn_total;
        self.scores[player] = self.scores[player].saturating_add(banked);
        self.turn_total = 0;
        self.turn_rolls.clear();

        debug!(%player, banked, score = self.scores[player], "hold");

        if self.scores[player] >= self.config.goal {
            self.turns += 1;
            self.status = GameStatus::Won(player);
            debug!(%player, score = self.scores[player], "game won");
            return Ok(HoldOutcome::Win);
        }

        self.end_turn();
        Ok(HoldOutcome::Continue)
    }

    /// Pass the turn to the other seat.
    ///
    /// Unbanked points are discarded; scores are untouched.
    pub fn switch_turn(&mut self) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        self.pass_turn();
        Ok(())
    }

    /// Add the cheat bonus to the active player's banked score.
    ///
    /// Leaves the turn total, the active seat and the status as they are.
    /// Returns the new banked score.
    pub fn cheat(&mut self) -> Result<u32, GameError> {
        self.ensure_in_progress()?;

        let player = self.active;
        self.scores[player] = self.scores[player].saturating_add(self.config.cheat_bonus);
        debug!(%player, score = self.scores[player], "cheat");
        Ok(self.scores[player])
    }

    /// Change a seat's display name.
    ///
    /// Like every other mutation this is rejected once the game is won.
    pub fn rename_player(&mut self, slot: PlayerId, name: impl Into<String>) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GameError::EmptyPlayerName { slot });
        }
        self.players[slot].name = name;
        Ok(())
    }

    fn end_turn(&mut self) {
        self.turns += 1;
        self.pass_turn();
    }

    fn pass_turn(&mut self) {
        self.turn_total = 0;
        self.turn_rolls.clear();
        self.active = self.active.other();
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        match self.status {
            GameStatus::InProgress => Ok(()),
            GameStatus::Won(winner) => Err(GameError::GameOver { winner }),
        }
    }
}

impl<D> PigGame<D> {
    // === Queries ===

    /// Whether `player`'s banked score has reached the goal.
    ///
    /// The unbanked turn total never counts.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.scores[player] >= self.config.goal
    }

    /// `is_winner` for the active seat.
    #[must_use]
    pub fn active_is_winner(&self) -> bool {
        self.is_winner(self.active)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Won(_))
    }

    /// The winning seat, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Won(player) => Some(player),
            GameStatus::InProgress => None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn goal(&self) -> u32 {
        self.config.goal
    }

    #[must_use]
    pub fn players(&self) -> &PlayerPair<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, slot: PlayerId) -> &Player {
        &self.players[slot]
    }

    /// The seat whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active(&self) -> &Player {
        &self.players[self.active]
    }

    /// The player waiting for their turn.
    #[must_use]
    pub fn waiting(&self) -> &Player {
        &self.players[self.active.other()]
    }

    #[must_use]
    pub fn scores(&self) -> &PlayerPair<u32> {
        &self.scores
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player]
    }

    /// Unbanked points for the active player.
    #[must_use]
    pub fn turn_total(&self) -> u32 {
        self.turn_total
    }

    /// Faces rolled so far this turn.
    #[must_use]
    pub fn turn_rolls(&self) -> &[u8] {
        &self.turn_rolls
    }

    /// Completed turns, counting the winning one.
    #[must_use]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Capture the visible state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            goal: self.config.goal,
            players: self.players.clone(),
            scores: self.scores.clone(),
            active: self.active,
            turn_total: self.turn_total,
            turn_rolls: self.turn_rolls.to_vec(),
            status: self.status,
        }
    }
}
