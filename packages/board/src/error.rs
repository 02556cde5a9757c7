//! Error types for board geometry

use crate::Point;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error("Invalid board size {width}x{height} (each side must be 1..=52)")]
    InvalidSize { width: u8, height: u8 },

    #[error("Point {point} is outside a {width}x{height} board")]
    OutOfBounds { point: Point, width: u8, height: u8 },

    #[error("Grid size mismatch: expected {expected:?}, got {found:?}")]
    SizeMismatch { expected: (u8, u8), found: (u8, u8) },
}
