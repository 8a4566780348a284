//! Error types for the engine, the hold policy and the leaderboard.
//!
//! Every error is raised before any state is touched, so a caller that
//! receives an `Err` can keep using the value it called into.

use thiserror::Error;

use super::player::PlayerId;

/// Errors raised by [`PigGame`](crate::rules::PigGame) construction and play.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Goal must be a positive score.
    #[error("goal must be positive (got {goal})")]
    InvalidGoal { goal: u32 },

    /// The die needs at least two faces, one of which is the bust face.
    #[error("die must have at least 2 faces (got {faces})")]
    InvalidFaces { faces: u8 },

    /// The bust face must lie on the die.
    #[error("bust face {bust} is outside the die range 1..={faces}")]
    InvalidBustFace { bust: u8, faces: u8 },

    /// Pig is played by exactly two players.
    #[error("pig requires exactly two players (got {got})")]
    PlayerCount { got: usize },

    /// Player names must contain at least one non-whitespace character.
    #[error("name for {slot} must not be empty")]
    EmptyPlayerName { slot: PlayerId },

    /// The die source produced a face that is not on the die.
    #[error("rolled {face}, outside the die range 1..={faces}")]
    InvalidRoll { face: u8, faces: u8 },

    /// The game already has a winner; only queries are allowed.
    #[error("game is over, {winner} has won")]
    GameOver { winner: PlayerId },
}

/// Errors raised when building a hold policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("unknown difficulty {name:?} (expected easy, normal or hard)")]
    UnknownDifficulty { name: String },
}

/// Errors raised by the [`Leaderboard`](crate::leaderboard::Leaderboard) store.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// Registration or rename with a blank name.
    #[error("player name must not be empty")]
    EmptyName,

    /// The id is not registered.
    #[error("unknown player id {id:?}")]
    UnknownPlayer { id: String },

    /// Winner and loser are the same player.
    #[error("player {id:?} cannot play against themselves")]
    SelfPlay { id: String },

    /// The requested name already belongs to another player.
    #[error("name {name:?} is already taken by player {owner:?}")]
    NameTaken { name: String, owner: String },

    /// Writing the backing document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the backing document failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
