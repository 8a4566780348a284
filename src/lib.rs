//! # pig-dice
//!
//! Two-player Pig: roll to build a turn total, hold to bank it, and lose
//! the turn total on a 1. First banked score to reach the goal wins.
//!
//! ## Design Principles
//!
//! 1. **Injected randomness**: the engine rolls through a `DieSource` passed
//!    in at construction, never a global generator. Tests script the faces.
//!
//! 2. **Validate before mutate**: every operation checks its input first and
//!    returns an explicit `Result`; a rejected call leaves state unchanged.
//!
//! 3. **Whole-document persistence**: the leaderboard rewrites its JSON
//!    document on every change, atomically.
//!
//! ## Modules
//!
//! - `core`: players, dice sources, configuration, errors
//! - `rules`: the `PigGame` turn/score state machine
//! - `policy`: hold/continue decisions for computer seats
//! - `leaderboard`: file-backed player rankings and match log
//! - `simulation`: CPU turns and CPU-vs-CPU matches

pub mod core;
pub mod leaderboard;
pub mod policy;
pub mod rules;
pub mod simulation;

// Re-export commonly used types
pub use crate::core::{
    DieSource, GameConfig, GameError, GameRng, LeaderboardError, Player, PlayerId, PlayerPair,
    PolicyError, ScriptedDie,
};

pub use crate::rules::{GameSnapshot, GameStatus, HoldOutcome, PigGame};

pub use crate::policy::{Difficulty, HoldPolicy, TieredPolicy, TurnContext};

pub use crate::leaderboard::{GameLogRecord, Leaderboard, LeaderboardEntry, PlayerKey};

pub use crate::simulation::{
    play_cpu_turn, MatchRunner, MatchSummary, SelfPlayConfig, TurnEnding, TurnReport,
};
