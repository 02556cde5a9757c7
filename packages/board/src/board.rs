use crate::{BoardError, Color, Game, Grid, MovePayload, MovePoint, SetupChanges};

/// Incremental replay target for a game record
///
/// Implementations keep their own ply stack. Each of [`play_move`],
/// [`apply_setup`] and [`add_dummy_move`] pushes exactly one ply and
/// [`undo`] pops plies in reverse order. The record never asks a board
/// to evaluate an arbitrary position.
///
/// [`play_move`]: Board::play_move
/// [`apply_setup`]: Board::apply_setup
/// [`add_dummy_move`]: Board::add_dummy_move
/// [`undo`]: Board::undo
pub trait Board: std::fmt::Debug {
    fn game(&self) -> Game;

    fn grid(&self) -> &Grid;

    /// Clear the position and the ply stack
    fn reset(&mut self);

    fn play_move(&mut self, color: Color, point: MovePoint, payload: Option<&MovePayload>);

    /// Place or remove content without changing the move number
    fn apply_setup(&mut self, changes: &SetupChanges);

    /// Push a ply that changes nothing, so node depth and ply count agree
    fn add_dummy_move(&mut self);

    /// Pop `plies` plies, stopping at the initial position
    fn undo(&mut self, plies: usize);

    fn move_number(&self) -> u32;

    fn set_move_number(&mut self, move_number: u32);

    /// Number of plies currently on the stack
    fn plies(&self) -> usize;

    fn width(&self) -> u8 {
        self.grid().width()
    }

    fn height(&self) -> u8 {
        self.grid().height()
    }

    /// Changes turning the live position into `desired`
    fn diff(&self, desired: &Grid) -> Result<SetupChanges, BoardError> {
        self.grid().diff(desired)
    }

    /// Final say on whose turn it is, given what the record specifies
    fn adjust_color_to_play(&self, recorded: Option<Color>) -> Color {
        recorded.unwrap_or(Color::Black)
    }
}
