use serde::{Deserialize, Serialize};

/// Stone color of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The opponent's color
    pub fn other(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Index into per-color arrays (black first)
    pub fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    pub const BOTH: [Color; 2] = [Color::Black, Color::White];
}

/// Content of a single board intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
    /// Burnt square (Amazons)
    Arrow,
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }
}

impl Cell {
    pub fn stone(self) -> Option<Color> {
        match self {
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
            Cell::Empty | Cell::Arrow => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_color() {
        assert_eq!(Color::Black.other(), Color::White);
        assert_eq!(Color::White.other().other(), Color::White);
    }

    #[test]
    fn test_cell_stone_roundtrip() {
        for color in Color::BOTH {
            assert_eq!(Cell::from(color).stone(), Some(color));
        }
        assert_eq!(Cell::Arrow.stone(), None);
    }
}
