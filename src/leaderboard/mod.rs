//! Persistent leaderboard: registered players, win/loss counters and an
//! append-only match log, stored as one JSON document.
//!
//! Independent of the engine; drivers feed it finished matches.

pub mod schema;
pub mod store;

pub use schema::{
    GameLogRecord, LeaderboardDocument, LeaderboardEntry, PlayerKey, PlayerRecord, SCHEMA_VERSION,
};
pub use store::Leaderboard;
