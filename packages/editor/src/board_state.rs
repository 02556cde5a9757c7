//! State derived from the path to the current node

use kifu_board::{Color, MovePoint};
use kifu_sgf::NodeId;

/// Cache of everything the replay engine derives while moving the
/// cursor, so callers never have to walk the tree themselves
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    /// Color to play as fixed by the record itself
    pub(crate) sgf_color_to_play: Option<Color>,
    pub(crate) color_to_play: Color,
    pub(crate) last_move: Option<MovePoint>,
    pub(crate) last_move_node: Option<NodeId>,
    /// Topmost game-info node on the path and its depth
    pub(crate) game_info: Option<(NodeId, usize)>,
    pub(crate) last_main_variation_node: Option<NodeId>,
    pub(crate) time_left: [Option<f64>; 2],
    pub(crate) moves_left: [Option<i32>; 2],
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            sgf_color_to_play: None,
            color_to_play: Color::Black,
            last_move: None,
            last_move_node: None,
            game_info: None,
            last_main_variation_node: None,
            time_left: [None; 2],
            moves_left: [None; 2],
        }
    }
}

impl BoardState {
    pub fn color_to_play(&self) -> Color {
        self.color_to_play
    }

    /// Color to play if some node on the path decides it
    pub fn recorded_color_to_play(&self) -> Option<Color> {
        self.sgf_color_to_play
    }

    /// Coordinates of the move that led to the current position, unless
    /// a setup node was replayed after it
    pub fn last_move(&self) -> Option<MovePoint> {
        self.last_move
    }

    pub fn last_move_node(&self) -> Option<NodeId> {
        self.last_move_node
    }

    pub fn game_info_node(&self) -> Option<NodeId> {
        self.game_info.map(|(node, _)| node)
    }

    pub fn game_info_node_depth(&self) -> Option<usize> {
        self.game_info.map(|(_, depth)| depth)
    }

    /// Shallowest node where the current path leaves the main line
    pub fn last_main_variation_node(&self) -> Option<NodeId> {
        self.last_main_variation_node
    }

    pub fn time_left(&self, color: Color) -> Option<f64> {
        self.time_left[color.index()]
    }

    pub fn moves_left(&self, color: Color) -> Option<i32> {
        self.moves_left[color.index()]
    }
}
