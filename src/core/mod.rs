//! Core types: players, dice, configuration and errors.
//!
//! Shared by the engine, the hold policy and the leaderboard.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{GameConfig, DEFAULT_BUST_FACE, DEFAULT_CHEAT_BONUS, DEFAULT_FACES, DEFAULT_GOAL};
pub use error::{GameError, LeaderboardError, PolicyError};
pub use player::{Player, PlayerId, PlayerPair};
pub use rng::{DieSource, GameRng, ScriptedDie};
