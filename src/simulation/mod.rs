//! Driving computer-controlled play.
//!
//! - `play_cpu_turn`: one turn under a hold policy
//! - `MatchRunner`: whole CPU-vs-CPU matches from a seed

mod self_play;
mod turn;

pub use self_play::{ensure_distinct_ids, MatchRunner, MatchSummary, SelfPlayConfig};
pub use turn::{play_cpu_turn, TurnEnding, TurnReport};
