//! Tree configuration
//!
//! Everything is defaulted, so `{}` is a valid configuration for a
//! 19x19 Go record with unlimited undo.

use crate::EditorError;
use kifu_board::{Game, MAX_BOARD_SIZE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeConfig {
    #[serde(default)]
    pub game: Game,

    #[serde(default = "default_board_size")]
    pub board_width: u8,

    #[serde(default = "default_board_size")]
    pub board_height: u8,

    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Without history every edit is final
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of undoable actions (0 = unlimited)
    #[serde(default)]
    pub max_actions: usize,
}

fn default_board_size() -> u8 {
    19
}

fn default_true() -> bool {
    true
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            game: Game::default(),
            board_width: default_board_size(),
            board_height: default_board_size(),
            history: HistoryConfig::default(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_actions: 0,
        }
    }
}

impl TreeConfig {
    pub fn new(game: Game, board_width: u8, board_height: u8) -> Self {
        Self {
            game,
            board_width,
            board_height,
            history: HistoryConfig::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        let valid = 1..=MAX_BOARD_SIZE;
        if !valid.contains(&self.board_width) || !valid.contains(&self.board_height) {
            return Err(EditorError::InvalidConfig(format!(
                "board size {}x{} is outside 1..={MAX_BOARD_SIZE}",
                self.board_width, self.board_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TreeConfig::from_json("{}").unwrap();
        assert_eq!(config, TreeConfig::default());
        assert_eq!(config.board_width, 19);
        assert!(config.history.enabled);
    }

    #[test]
    fn test_camel_case_fields() {
        let config = TreeConfig::from_json(
            r#"{ "game": "amazons", "boardWidth": 10, "boardHeight": 10, "history": { "maxActions": 50 } }"#,
        )
        .unwrap();

        assert_eq!(config.game, Game::Amazons);
        assert_eq!(config.board_height, 10);
        assert_eq!(config.history.max_actions, 50);
        assert!(config.history.enabled);
    }

    #[test]
    fn test_rejects_oversized_board() {
        let error = TreeConfig::from_json(r#"{ "boardWidth": 60 }"#).unwrap_err();
        assert!(matches!(error, EditorError::InvalidConfig(_)));

        let error = TreeConfig::from_json("not json").unwrap_err();
        assert!(matches!(error, EditorError::Config(_)));
    }
}
