use serde::{Deserialize, Serialize};

/// Game played on the board, numbered as in the SGF `GM` property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Game {
    #[default]
    Go,
    Othello,
    Chess,
    Gomoku,
    NineMensMorris,
    Backgammon,
    ChineseChess,
    Shogi,
    LinesOfAction,
    Ataxx,
    Hex,
    Jungle,
    Neutron,
    PhilosophersFootball,
    Quadrature,
    Trax,
    Tantrix,
    Amazons,
    Octi,
    Gess,
}

impl Game {
    const ALL: [Game; 20] = [
        Game::Go,
        Game::Othello,
        Game::Chess,
        Game::Gomoku,
        Game::NineMensMorris,
        Game::Backgammon,
        Game::ChineseChess,
        Game::Shogi,
        Game::LinesOfAction,
        Game::Ataxx,
        Game::Hex,
        Game::Jungle,
        Game::Neutron,
        Game::PhilosophersFootball,
        Game::Quadrature,
        Game::Trax,
        Game::Tantrix,
        Game::Amazons,
        Game::Octi,
        Game::Gess,
    ];

    /// Value of the `GM` property for this game
    pub fn sgf_index(self) -> u32 {
        Self::ALL
            .iter()
            .position(|game| *game == self)
            .map(|index| index as u32 + 1)
            .unwrap_or(1)
    }

    pub fn from_sgf_index(index: u32) -> Option<Self> {
        let slot = usize::try_from(index).ok()?.checked_sub(1)?;
        Self::ALL.get(slot).copied()
    }

    /// Whether moves carry a second and third point (queen target and arrow)
    pub fn has_compound_moves(self) -> bool {
        self == Game::Amazons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sgf_index_roundtrip() {
        assert_eq!(Game::Go.sgf_index(), 1);
        assert_eq!(Game::Amazons.sgf_index(), 18);
        assert_eq!(Game::from_sgf_index(18), Some(Game::Amazons));
        assert_eq!(Game::from_sgf_index(0), None);
        assert_eq!(Game::from_sgf_index(21), None);
    }
}
