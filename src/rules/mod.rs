//! Game rules: the Pig turn/score state machine.

pub mod engine;

pub use engine::{GameSnapshot, GameStatus, HoldOutcome, PigGame};
