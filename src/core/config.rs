//! Game configuration.
//!
//! `GameConfig` fixes the rules of one match: the target score, the die, and
//! the bonus granted by the cheat command. It is validated once when a game
//! is created and never changes afterwards.

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Default target score.
pub const DEFAULT_GOAL: u32 = 100;

/// Default number of die faces.
pub const DEFAULT_FACES: u8 = 6;

/// Face that ends the turn and discards unbanked points.
pub const DEFAULT_BUST_FACE: u8 = 1;

/// Points added to the active player's banked score by `cheat`.
pub const DEFAULT_CHEAT_BONUS: u32 = 90;

/// Rules for a single match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Banked score that wins the game. Must be positive.
    pub goal: u32,

    /// Die faces; rolls are uniform in `1..=faces`.
    pub faces: u8,

    /// The losing face.
    pub bust_face: u8,

    /// Bonus applied by the cheat command.
    pub cheat_bonus: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            goal: DEFAULT_GOAL,
            faces: DEFAULT_FACES,
            bust_face: DEFAULT_BUST_FACE,
            cheat_bonus: DEFAULT_CHEAT_BONUS,
        }
    }
}

impl GameConfig {
    /// Create the standard configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target score.
    pub fn with_goal(mut self, goal: u32) -> Self {
        self.goal = goal;
        self
    }

    /// Set the number of die faces.
    pub fn with_faces(mut self, faces: u8) -> Self {
        self.faces = faces;
        self
    }

    /// Set the cheat bonus.
    pub fn with_cheat_bonus(mut self, bonus: u32) -> Self {
        self.cheat_bonus = bonus;
        self
    }

    /// Check the configuration before any game state is built.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.goal == 0 {
            return Err(GameError::InvalidGoal { goal: self.goal });
        }
        if self.faces < 2 {
            return Err(GameError::InvalidFaces { faces: self.faces });
        }
        if self.bust_face == 0 || self.bust_face > self.faces {
            return Err(GameError::InvalidBustFace {
                bust: self.bust_face,
                faces: self.faces,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.goal, 100);
        assert_eq!(config.faces, 6);
        assert_eq!(config.bust_face, 1);
        assert_eq!(config.cheat_bonus, 90);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::new().with_goal(50).with_faces(8).with_cheat_bonus(10);

        assert_eq!(config.goal, 50);
        assert_eq!(config.faces, 8);
        assert_eq!(config.cheat_bonus, 10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert_eq!(
            GameConfig::new().with_goal(0).validate(),
            Err(GameError::InvalidGoal { goal: 0 })
        );
        assert_eq!(
            GameConfig::new().with_faces(1).validate(),
            Err(GameError::InvalidFaces { faces: 1 })
        );

        let mut config = GameConfig::new();
        config.bust_face = 7;
        assert_eq!(
            config.validate(),
            Err(GameError::InvalidBustFace { bust: 7, faces: 6 })
        );
    }

    #[test]
    fn test_serialization_fills_missing_fields() {
        let config: GameConfig = serde_json::from_str(r#"{"goal": 30}"#).unwrap();
        assert_eq!(config.goal, 30);
        assert_eq!(config.faces, DEFAULT_FACES);
        assert_eq!(config.cheat_bonus, DEFAULT_CHEAT_BONUS);
    }
}
