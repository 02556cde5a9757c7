//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Board error: {0}")]
    Board(#[from] kifu_board::BoardError),

    #[error("Record error: {0}")]
    Sgf(#[from] kifu_sgf::SgfError),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Tree has no board attached")]
    NoBoard,
}
