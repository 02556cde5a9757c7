//! # Snapshot Board
//!
//! Rule-free [`Board`] that keeps one grid snapshot per ply.
//!
//! Moves place a stone (or, for Amazons, relocate a queen and burn a
//! square) and nothing else: no captures, no legality checks. That is
//! enough to drive the editor headlessly and in tests.

use crate::{Board, BoardError, Cell, Color, Game, Grid, MovePayload, MovePoint, SetupChanges};

#[derive(Debug, Clone)]
pub struct SnapshotBoard {
    game: Game,
    grid: Grid,
    move_number: u32,
    /// Position and move number before each ply (oldest first)
    history: Vec<(Grid, u32)>,
}

impl SnapshotBoard {
    pub fn new(game: Game, width: u8, height: u8) -> Result<Self, BoardError> {
        Ok(Self {
            game,
            grid: Grid::new(width, height)?,
            move_number: 0,
            history: Vec::new(),
        })
    }

    fn push_ply(&mut self) {
        self.history.push((self.grid.clone(), self.move_number));
    }
}

impl Board for SnapshotBoard {
    fn game(&self) -> Game {
        self.game
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn reset(&mut self) {
        self.grid.fill(Cell::Empty);
        self.move_number = 0;
        self.history.clear();
    }

    fn play_move(&mut self, color: Color, point: MovePoint, payload: Option<&MovePayload>) {
        self.push_ply();
        self.move_number += 1;

        let Some(point) = point.point() else {
            return;
        };

        match payload {
            Some(MovePayload::Amazons { queen_to, arrow_to }) => {
                let _ = self.grid.set(point, Cell::Empty);
                let _ = self.grid.set(*queen_to, Cell::from(color));
                let _ = self.grid.set(*arrow_to, Cell::Arrow);
            }
            None => {
                debug_assert!(self.grid.contains(point), "move {point} is off the board");
                let _ = self.grid.set(point, Cell::from(color));
            }
        }
    }

    fn apply_setup(&mut self, changes: &SetupChanges) {
        self.push_ply();
        self.grid.apply(changes);
    }

    fn add_dummy_move(&mut self) {
        self.push_ply();
    }

    fn undo(&mut self, plies: usize) {
        if plies == 0 {
            return;
        }

        let keep = self.history.len().saturating_sub(plies);
        self.history.truncate(keep + 1);
        if let Some((grid, move_number)) = self.history.pop() {
            self.grid = grid;
            self.move_number = move_number;
        }
    }

    fn move_number(&self) -> u32 {
        self.move_number
    }

    fn set_move_number(&mut self, move_number: u32) {
        self.move_number = move_number;
    }

    fn plies(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point, PointList};

    #[test]
    fn test_play_and_undo() {
        let mut board = SnapshotBoard::new(Game::Go, 9, 9).unwrap();
        board.play_move(Color::Black, Point::new(3, 3).into(), None);
        board.play_move(Color::White, MovePoint::Pass, None);

        assert_eq!(board.plies(), 2);
        assert_eq!(board.move_number(), 2);
        assert_eq!(board.grid().get(Point::new(3, 3)), Some(Cell::Black));

        board.undo(2);
        assert_eq!(board.plies(), 0);
        assert_eq!(board.move_number(), 0);
        assert_eq!(board.grid().count(Cell::Black), 0);
    }

    #[test]
    fn test_undo_more_than_available() {
        let mut board = SnapshotBoard::new(Game::Go, 9, 9).unwrap();
        board.play_move(Color::Black, Point::new(0, 0).into(), None);
        board.undo(5);
        assert_eq!(board.plies(), 0);
        assert_eq!(board.grid().count(Cell::Black), 0);
    }

    #[test]
    fn test_setup_keeps_move_number() {
        let mut board = SnapshotBoard::new(Game::Go, 9, 9).unwrap();
        board.apply_setup(&SetupChanges {
            black: PointList::new(vec![Point::new(2, 2), Point::new(6, 6)]),
            ..Default::default()
        });

        assert_eq!(board.move_number(), 0);
        assert_eq!(board.plies(), 1);
        assert_eq!(board.grid().count(Cell::Black), 2);
    }

    #[test]
    fn test_amazons_move() {
        let mut board = SnapshotBoard::new(Game::Amazons, 10, 10).unwrap();
        board.apply_setup(&SetupChanges {
            white: PointList::new(vec![Point::new(0, 3)]),
            ..Default::default()
        });
        board.play_move(
            Color::White,
            Point::new(0, 3).into(),
            Some(&MovePayload::Amazons {
                queen_to: Point::new(0, 5),
                arrow_to: Point::new(2, 5),
            }),
        );

        assert_eq!(board.grid().get(Point::new(0, 3)), Some(Cell::Empty));
        assert_eq!(board.grid().get(Point::new(0, 5)), Some(Cell::White));
        assert_eq!(board.grid().get(Point::new(2, 5)), Some(Cell::Arrow));
    }
}
