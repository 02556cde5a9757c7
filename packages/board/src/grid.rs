//! Board grids and the differences between them

use crate::{BoardError, Cell, Point, PointList, MAX_BOARD_SIZE};
use serde::{Deserialize, Serialize};

/// Rectangular array of cells, stored row by row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: u8, height: u8) -> Result<Self, BoardError> {
        if width == 0 || height == 0 || width > MAX_BOARD_SIZE || height > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidSize { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    pub fn get(&self, point: Point) -> Option<Cell> {
        if self.contains(point) {
            Some(self.cells[self.index(point)])
        } else {
            None
        }
    }

    pub fn set(&mut self, point: Point, cell: Cell) -> Result<(), BoardError> {
        if !self.contains(point) {
            return Err(BoardError::OutOfBounds {
                point,
                width: self.width,
                height: self.height,
            });
        }

        let index = self.index(point);
        self.cells[index] = cell;
        Ok(())
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Every point of the grid, row by row
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }

    /// Points currently holding `cell`
    pub fn points_with(&self, cell: Cell) -> PointList {
        self.points()
            .filter(|point| self.cells[self.index(*point)] == cell)
            .collect()
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// Changes that turn this grid into `desired`
    ///
    /// Only points whose content differs are listed, each in exactly one
    /// of the four lists.
    pub fn diff(&self, desired: &Grid) -> Result<SetupChanges, BoardError> {
        if (self.width, self.height) != (desired.width, desired.height) {
            return Err(BoardError::SizeMismatch {
                expected: (self.width, self.height),
                found: (desired.width, desired.height),
            });
        }

        let mut remove = Vec::new();
        let mut black = Vec::new();
        let mut white = Vec::new();
        let mut arrows = Vec::new();

        for point in self.points() {
            let index = self.index(point);
            let wanted = desired.cells[index];
            if self.cells[index] == wanted {
                continue;
            }

            match wanted {
                Cell::Empty => remove.push(point),
                Cell::Black => black.push(point),
                Cell::White => white.push(point),
                Cell::Arrow => arrows.push(point),
            }
        }

        Ok(SetupChanges {
            remove: PointList::new(remove),
            black: PointList::new(black),
            white: PointList::new(white),
            arrows: PointList::new(arrows),
        })
    }

    /// Apply setup changes in place, ignoring points outside the grid
    pub fn apply(&mut self, changes: &SetupChanges) {
        for (cell, list) in changes.lists() {
            for point in list {
                if self.contains(*point) {
                    let index = self.index(*point);
                    self.cells[index] = cell;
                }
            }
        }
    }

    fn index(&self, point: Point) -> usize {
        point.y as usize * self.width as usize + point.x as usize
    }
}

/// Point lists that place or remove content on a board
///
/// This is the shape of both a grid diff and a setup node's
/// `AE`/`AB`/`AW`/`AA` properties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetupChanges {
    pub remove: PointList,
    pub black: PointList,
    pub white: PointList,
    pub arrows: PointList,
}

impl SetupChanges {
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.black.is_empty() && self.white.is_empty() && self.arrows.is_empty()
    }

    /// The lists paired with the cell content they produce
    pub fn lists(&self) -> [(Cell, &PointList); 4] {
        [
            (Cell::Empty, &self.remove),
            (Cell::Black, &self.black),
            (Cell::White, &self.white),
            (Cell::Arrow, &self.arrows),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(width: u8, cells: &[(u8, u8, Cell)]) -> Grid {
        let mut grid = Grid::new(width, width).unwrap();
        for (x, y, cell) in cells {
            grid.set(Point::new(*x, *y), *cell).unwrap();
        }
        grid
    }

    #[test]
    fn test_rejects_invalid_sizes() {
        assert!(Grid::new(0, 9).is_err());
        assert!(Grid::new(53, 9).is_err());
        assert!(Grid::new(52, 1).is_ok());
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = Grid::new(9, 9).unwrap();
        let result = grid.set(Point::new(9, 0), Cell::Black);
        assert!(matches!(result, Err(BoardError::OutOfBounds { .. })));
    }

    #[test]
    fn test_diff_lists_only_changed_points() {
        let live = grid_with(9, &[(0, 0, Cell::Black), (1, 1, Cell::Black)]);
        let desired = grid_with(9, &[(1, 1, Cell::Black), (2, 2, Cell::Black)]);

        let changes = live.diff(&desired).unwrap();

        assert_eq!(changes.remove, PointList::new(vec![Point::new(0, 0)]));
        assert_eq!(changes.black, PointList::new(vec![Point::new(2, 2)]));
        assert!(changes.white.is_empty());
        assert!(changes.arrows.is_empty());
    }

    #[test]
    fn test_diff_then_apply_reaches_desired() {
        let mut live = grid_with(5, &[(0, 0, Cell::White), (4, 4, Cell::Arrow)]);
        let desired = grid_with(5, &[(0, 0, Cell::Black), (3, 1, Cell::White)]);

        let changes = live.diff(&desired).unwrap();
        live.apply(&changes);

        assert_eq!(live, desired);
        assert!(live.diff(&desired).unwrap().is_empty());
    }

    #[test]
    fn test_diff_size_mismatch() {
        let small = Grid::new(9, 9).unwrap();
        let large = Grid::new(19, 19).unwrap();
        assert!(matches!(small.diff(&large), Err(BoardError::SizeMismatch { .. })));
    }
}
